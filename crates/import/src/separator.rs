use serde::{Deserialize, Serialize};

/// Number of leading characters inspected when guessing the delimiter.
pub const SNIFF_WINDOW: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    Comma,
    Semicolon,
    Tab,
}

impl Separator {
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Semicolon => b';',
            Separator::Tab => b'\t',
        }
    }
}

/// Guesses the field delimiter from the first [`SNIFF_WINDOW`] characters.
///
/// Tab wins only with a strict majority over both others; otherwise semicolon
/// beats comma, and comma is the fallback. Delimiters inside quoted fields
/// are counted too.
pub fn sniff_separator(text: &str) -> Separator {
    let (mut commas, mut semicolons, mut tabs) = (0usize, 0usize, 0usize);

    for c in text.chars().take(SNIFF_WINDOW) {
        match c {
            ',' => commas += 1,
            ';' => semicolons += 1,
            '\t' => tabs += 1,
            _ => {}
        }
    }

    if tabs > commas && tabs > semicolons {
        Separator::Tab
    } else if semicolons > commas {
        Separator::Semicolon
    } else {
        Separator::Comma
    }
}
