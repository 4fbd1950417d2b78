use std::io::Write;

use stmtimport_core::TransactionTable;

use crate::error::ImportError;
use crate::separator::Separator;

/// One input line split into its positional fields.
pub type RawRow = Vec<String>;

/// Splits delimited text into rows.
///
/// There is no header row, `"` quotes fields, rows may have any number of
/// fields and fields are kept untrimmed. Blank lines produce no row.
pub fn parse_rows(text: &str, separator: Separator) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(separator.as_byte())
        .quote(b'"')
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Writes the table, header first, as tab-separated lines.
pub fn write_tsv_to<W: Write>(out: W, table: &TransactionTable) -> Result<(), ImportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for record in table.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn write_tsv(table: &TransactionTable) -> Result<String, ImportError> {
    let mut buf = Vec::new();
    write_tsv_to(&mut buf, table)?;
    // Every field written is a `String`, so the output stays valid UTF-8.
    String::from_utf8(buf).map_err(|_| ImportError::Encoding("UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stmtimport_core::{to_internal_number, MappedRow, SourceOrder};

    // ── parse_rows ────────────────────────────────────────────────────────────

    #[test]
    fn splits_semicolon_rows() {
        let rows = parse_rows("a;b;c;d\n1;2;3;4\n", Separator::Semicolon).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn rows_keep_their_own_length() {
        let text = "Kontonummer: 543.278.22;;;\nMoristra rerva eo:;2023-09-13\n";
        let rows = parse_rows(text, Separator::Semicolon).unwrap();
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn quoted_fields_may_contain_the_delimiter() {
        let rows = parse_rows("04.09.23,\"Miete, Sept\",-1650.00,04.09.23\n", Separator::Comma)
            .unwrap();
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][1], "Miete, Sept");
    }

    #[test]
    fn fields_are_not_trimmed() {
        let rows = parse_rows("Kontoauszug bis: 04.09.2023 ;;;\n", Separator::Semicolon).unwrap();
        assert_eq!(rows[0][0], "Kontoauszug bis: 04.09.2023 ");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows("a\tb\n\n\nc\td\n", Separator::Tab).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(parse_rows("", Separator::Comma).unwrap().is_empty());
    }

    // ── write_tsv ─────────────────────────────────────────────────────────────

    #[test]
    fn tsv_has_header_and_rows() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 4).unwrap();
        let table = TransactionTable::assemble(
            vec![
                MappedRow::income(date, "Zahlungseingang".into(), to_internal_number("1838.00").unwrap()),
                MappedRow::expense(date, "Zahlungs".into(), to_internal_number("204.45").unwrap()),
            ],
            SourceOrder::OldestFirst,
        );
        let tsv = write_tsv(&table).unwrap();
        assert_eq!(
            tsv,
            "Date\tDoc\tDescription\tIncome\tExpenses\n\
             2023-09-04\t\tZahlungseingang\t1838\t\n\
             2023-09-04\t\tZahlungs\t\t204.45\n"
        );
    }

    #[test]
    fn empty_table_is_header_only() {
        let tsv = write_tsv(&TransactionTable::default()).unwrap();
        assert_eq!(tsv, "Date\tDoc\tDescription\tIncome\tExpenses\n");
    }
}
