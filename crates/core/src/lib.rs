pub mod locale;
pub mod money;
pub mod transaction;

pub use locale::{
    format_internal_date, to_internal_date, to_internal_number, ConvertError, DateFormat,
};
pub use money::Amount;
pub use transaction::{MappedRow, SourceOrder, TransactionTable, TABLE_HEADER};
