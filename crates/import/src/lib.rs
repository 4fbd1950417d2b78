pub mod config;
pub mod csv;
pub mod error;
pub mod format;
pub mod migrosbank;
pub mod separator;

pub use config::{ImportConfig, InputEncoding, MalformedRowPolicy};
pub use self::csv::{parse_rows, write_tsv, write_tsv_to, RawRow};
pub use error::ImportError;
pub use format::{convert_with_first_match, decide, BankFormat, MatchOutcome, MatchPolicy, RowGate};
pub use migrosbank::MigrosFormat1;
pub use separator::{sniff_separator, Separator};

pub mod import {
    use crate::*;

    pub fn import_migrosbank(text: &str, config: &ImportConfig) -> Result<String, ImportError> {
        crate::migrosbank::process_import(text, config)
    }

    pub fn import_migrosbank_bytes(
        data: &[u8],
        config: &ImportConfig,
    ) -> Result<String, ImportError> {
        let text = config.encoding.decode(data)?;
        crate::migrosbank::process_import(&text, config)
    }
}
