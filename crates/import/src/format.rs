use serde::{Deserialize, Serialize};
use stmtimport_core::{DateFormat, TransactionTable};

use crate::config::MalformedRowPolicy;
use crate::csv::RawRow;
use crate::error::ImportError;

/// Verdict of the per-row gates of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowGate {
    /// Wrong column count or no statement date.
    Rejected,
    /// Column count and date fit, but the secondary date check failed.
    DateOnly(DateFormat),
    /// Every gate passed.
    Accepted(DateFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    NoMatch,
    Matched(DateFormat),
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// How per-row verdicts add up to a verdict for the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// One accepted row is enough.
    #[default]
    Any,
    /// More than half of all rows must be accepted.
    Majority,
}

/// Combines row verdicts into a table verdict.
///
/// The long-year variant is reported as soon as any inspected row passed the
/// date gate with a four-digit year, even if that row later failed. `Any`
/// stops inspecting at the first accepted row.
pub fn decide<I>(gates: I, policy: MatchPolicy) -> MatchOutcome
where
    I: IntoIterator<Item = RowGate>,
{
    let mut variant = DateFormat::ShortYear;
    let mut accepted = 0usize;
    let mut total = 0usize;

    for gate in gates {
        total += 1;
        match gate {
            RowGate::Rejected => continue,
            RowGate::DateOnly(format) => {
                if format == DateFormat::LongYear {
                    variant = DateFormat::LongYear;
                }
            }
            RowGate::Accepted(format) => {
                if format == DateFormat::LongYear {
                    variant = DateFormat::LongYear;
                }
                if policy == MatchPolicy::Any {
                    return MatchOutcome::Matched(variant);
                }
                accepted += 1;
            }
        }
    }

    if policy == MatchPolicy::Majority && accepted * 2 > total {
        MatchOutcome::Matched(variant)
    } else {
        MatchOutcome::NoMatch
    }
}

/// A statement layout the adapter knows how to detect and convert.
pub trait BankFormat {
    fn name(&self) -> &'static str;

    /// Evaluates the layout's gates against a single row.
    fn classify_row(&self, row: &RawRow) -> RowGate;

    /// Converts every data row using the variant found by [`BankFormat::detect`].
    fn convert(
        &self,
        rows: &[RawRow],
        variant: DateFormat,
        malformed: MalformedRowPolicy,
    ) -> Result<TransactionTable, ImportError>;

    fn detect(&self, rows: &[RawRow], policy: MatchPolicy) -> MatchOutcome {
        decide(rows.iter().map(|row| self.classify_row(row)), policy)
    }
}

/// Tries `formats` in order and converts with the first one that matches.
pub fn convert_with_first_match(
    rows: &[RawRow],
    formats: &[Box<dyn BankFormat>],
    policy: MatchPolicy,
    malformed: MalformedRowPolicy,
) -> Result<TransactionTable, ImportError> {
    for format in formats {
        if let MatchOutcome::Matched(variant) = format.detect(rows, policy) {
            tracing::debug!(format = format.name(), %variant, "statement layout detected");
            return format.convert(rows, variant, malformed);
        }
        tracing::debug!(format = format.name(), "statement layout rejected");
    }

    Err(ImportError::UnknownFormat)
}
