use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::format::MatchPolicy;

/// What to do with a row that passed detection but cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Abort the import.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    #[default]
    Latin1,
    Utf8,
}

impl InputEncoding {
    pub fn decode(self, bytes: &[u8]) -> Result<String, ImportError> {
        match self {
            InputEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            InputEncoding::Utf8 => {
                let text = std::str::from_utf8(bytes).map_err(|_| ImportError::Encoding("UTF-8"))?;
                Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub match_policy: MatchPolicy,
    pub malformed_rows: MalformedRowPolicy,
    pub encoding: InputEncoding,
}

impl ImportConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ImportError> {
        Ok(toml::from_str(toml_content)?)
    }
}
