use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-signed statement amount in the host's internal number format.
///
/// Rendering uses a period as decimal mark, no grouping, and drops trailing
/// fractional zeros (`1838.00` renders as `1838`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn from_decimal(decimal: Decimal) -> Self {
        Amount(decimal.normalize())
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
