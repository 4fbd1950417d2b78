use stmtimport_core::ConvertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input is not valid {0}")]
    Encoding(&'static str),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Unknown format: the file does not match any supported layout")]
    UnknownFormat,
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: ConvertError },
}
