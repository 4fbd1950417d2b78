//! Migros Bank account statement export (`.csv` / `.txt`).
//!
//! Format 1 A, two-digit years, newest line first:
//!
//! ```text
//! Kontoauszug bis: 04.09.2023 ;;;
//! Kontonummer: 543.278.22;;;
//! ;;;
//! Datum;Buchungstext;Betrag;Valuta
//! 04.09.23;Zahlungseingang;1838.00;04.09.23
//! 04.09.23;Zahlungs;-204.45;04.09.23
//! ```
//!
//! Format 1 B, four-digit years, oldest line first:
//!
//! ```text
//! Moristra rerva eo:;2023-09-13
//! ;
//! Data;Testo di registrazione;Importo;Valuta
//! 15.09.2023;DIDUNT Humquit-Costripe EO, Dis Volluvis 1;-230.95;15.09.2023
//! 19.09.2023;CLAVIANTO AUFERVA EO, DIS MINENT 8;-150.80;19.09.2023
//! ```

use std::sync::OnceLock;

use regex::Regex;
use stmtimport_core::{
    to_internal_date, to_internal_number, ConvertError, DateFormat, MappedRow, SourceOrder,
    TransactionTable,
};

use crate::config::{ImportConfig, MalformedRowPolicy};
use crate::csv::{parse_rows, write_tsv, RawRow};
use crate::error::ImportError;
use crate::format::{convert_with_first_match, BankFormat, RowGate};
use crate::separator::sniff_separator;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_date_short_year,
    r"^(0[1-9]|[12][0-9]|3[01])[-.](0[1-9]|1[0-2])[-.]\d{2}$");
re!(re_date_long_year,
    r"^(0[1-9]|[12][0-9]|3[01])[-.](0[1-9]|1[0-2])[-.]\d{4}$");
re!(re_date_either_year,
    r"^(0[1-9]|[12][0-9]|3[01])[-.](0[1-9]|1[0-2])[-.](\d{4}|\d{2})$");
re!(re_valuta,
    r"\b\d{2}[.-]\d{2}[.-](?:\d{2}|\d{4})\b");

// ── Format 1 ─────────────────────────────────────────────────────────────────

pub struct MigrosFormat1 {
    col_date: usize,
    col_description: usize,
    col_amount: usize,
    col_valuta: usize,
    col_count: usize,
}

impl Default for MigrosFormat1 {
    fn default() -> Self {
        Self {
            col_date: 0,
            col_description: 1,
            col_amount: 2,
            col_valuta: 3,
            col_count: 4,
        }
    }
}

impl MigrosFormat1 {
    /// Maps a data row. `row` must have the layout's column count and
    /// `variant` must be the one detected for the file.
    pub fn map_row(&self, row: &RawRow, variant: DateFormat) -> Result<MappedRow, ConvertError> {
        let date = to_internal_date(&row[self.col_date], variant)?;
        let description = row[self.col_description].clone();

        let amount = &row[self.col_amount];
        if amount.is_empty() {
            return Ok(MappedRow::without_amount(date, description));
        }

        let amount = normalize_decimal_separator(amount);
        if amount.starts_with('-') {
            let unsigned = amount.replace('-', "");
            Ok(MappedRow::expense(date, description, to_internal_number(&unsigned)?))
        } else {
            Ok(MappedRow::income(date, description, to_internal_number(&amount)?))
        }
    }

    fn is_data_row(&self, row: &RawRow) -> bool {
        row.len() == self.col_count && re_date_either_year().is_match(&row[self.col_date])
    }
}

impl BankFormat for MigrosFormat1 {
    fn name(&self) -> &'static str {
        "Migros Bank Format 1"
    }

    fn classify_row(&self, row: &RawRow) -> RowGate {
        if row.len() != self.col_count {
            return RowGate::Rejected;
        }

        let date = &row[self.col_date];
        let variant = if re_date_short_year().is_match(date) {
            DateFormat::ShortYear
        } else if re_date_long_year().is_match(date) {
            DateFormat::LongYear
        } else {
            return RowGate::Rejected;
        };

        if re_valuta().is_match(&row[self.col_valuta]) {
            RowGate::Accepted(variant)
        } else {
            RowGate::DateOnly(variant)
        }
    }

    fn convert(
        &self,
        rows: &[RawRow],
        variant: DateFormat,
        malformed: MalformedRowPolicy,
    ) -> Result<TransactionTable, ImportError> {
        let mut mapped = Vec::new();

        for (index, row) in rows.iter().enumerate().filter(|(_, row)| self.is_data_row(row)) {
            match self.map_row(row, variant) {
                Ok(line) => mapped.push(line),
                Err(reason) => match malformed {
                    MalformedRowPolicy::Skip => {
                        tracing::warn!(row = index + 1, %reason, "skipping malformed row");
                    }
                    MalformedRowPolicy::Fail => {
                        return Err(ImportError::MalformedRow { row: index + 1, reason });
                    }
                },
            }
        }

        tracing::debug!(
            converted = mapped.len(),
            ignored = rows.len() - mapped.len(),
            "rows converted"
        );

        // Format 1 B lists lines oldest first already.
        let order = match variant {
            DateFormat::ShortYear => SourceOrder::NewestFirst,
            DateFormat::LongYear => SourceOrder::OldestFirst,
        };
        Ok(TransactionTable::assemble(mapped, order))
    }
}

/// Replaces the first `,` with `.`, for exports using a decimal comma.
pub fn normalize_decimal_separator(amount: &str) -> String {
    amount.replacen(',', ".", 1)
}

/// Layouts of the Migros Bank export, in detection priority order.
pub fn formats() -> Vec<Box<dyn BankFormat>> {
    vec![Box::new(MigrosFormat1::default())]
}

/// Detects the layout of `text` and converts it into a transaction table.
pub fn import_transactions(
    text: &str,
    config: &ImportConfig,
) -> Result<TransactionTable, ImportError> {
    let separator = sniff_separator(text);
    let rows = parse_rows(text, separator)?;
    tracing::debug!(?separator, rows = rows.len(), "statement parsed");

    convert_with_first_match(&rows, &formats(), config.match_policy, config.malformed_rows)
}

/// Converts a statement export into the host's tab-separated import table.
pub fn process_import(text: &str, config: &ImportConfig) -> Result<String, ImportError> {
    let table = import_transactions(text, config)?;
    write_tsv(&table)
}
