use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::locale::format_internal_date;
use super::money::Amount;

/// Column titles of the normalized import table.
pub const TABLE_HEADER: [&str; 5] = ["Date", "Doc", "Description", "Income", "Expenses"];

/// One normalized statement line.
///
/// At most one of `income` / `expenses` is set; both are empty when the
/// source line carried no amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedRow {
    pub date: NaiveDate,
    pub doc: String,
    pub description: String,
    pub income: Option<Amount>,
    pub expenses: Option<Amount>,
}

impl MappedRow {
    pub fn income(date: NaiveDate, description: String, amount: Amount) -> Self {
        MappedRow {
            date,
            doc: String::new(),
            description,
            income: Some(amount),
            expenses: None,
        }
    }

    pub fn expense(date: NaiveDate, description: String, amount: Amount) -> Self {
        MappedRow {
            date,
            doc: String::new(),
            description,
            income: None,
            expenses: Some(amount),
        }
    }

    pub fn without_amount(date: NaiveDate, description: String) -> Self {
        MappedRow {
            date,
            doc: String::new(),
            description,
            income: None,
            expenses: None,
        }
    }

    /// The row as host-formatted text fields, in [`TABLE_HEADER`] order.
    pub fn to_fields(&self) -> [String; 5] {
        let amount = |a: Option<Amount>| a.map(|a| a.to_string()).unwrap_or_default();
        [
            format_internal_date(self.date),
            self.doc.clone(),
            self.description.clone(),
            amount(self.income),
            amount(self.expenses),
        ]
    }
}

/// Native ordering of the lines in a statement layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceOrder {
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTable {
    pub rows: Vec<MappedRow>,
}

impl TransactionTable {
    /// Builds the table from rows collected in source order, flipping
    /// newest-first layouts so the oldest line comes first.
    pub fn assemble(mut rows: Vec<MappedRow>, order: SourceOrder) -> Self {
        if order == SourceOrder::NewestFirst {
            rows.reverse();
        }
        TransactionTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by every data row as text fields.
    pub fn records(&self) -> impl Iterator<Item = [String; 5]> + '_ {
        std::iter::once(TABLE_HEADER.map(String::from))
            .chain(self.rows.iter().map(MappedRow::to_fields))
    }
}
