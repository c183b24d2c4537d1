use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;

use crate::config::ColumnRoles;

// ---------------------------------------------------------------------------
// Cell – a single value in a table column
// ---------------------------------------------------------------------------

/// One table cell: either missing or a present value of an inferred type.
///
/// Missing values are an explicit variant so every stage can treat them
/// uniformly regardless of the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Cell {
    /// Missing cells render as an empty string, matching how they are exported.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Missing => Ok(()),
        }
    }
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Textual form of a present value, `None` when missing.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Record / Table – raw rows as loaded
// ---------------------------------------------------------------------------

/// One row; cells are positionally aligned with [`Table::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub cells: Vec<Cell>,
}

impl Record {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn get(&self, column: usize) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Missing)
    }
}

/// An ordered sequence of records sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over one column's cells; yields nothing if the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.map(|i| row.get(i)))
    }

    /// Fraction of rows whose value in `column` is missing (0.0 for an empty table).
    pub fn missing_fraction(&self, column: usize) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let missing = self
            .rows
            .iter()
            .filter(|row| row.get(column).is_missing())
            .count();
        missing as f64 / self.rows.len() as f64
    }
}

// ---------------------------------------------------------------------------
// DerivedFields / CleanedTable – output of the cleaning pass
// ---------------------------------------------------------------------------

/// Per-row values computed during cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedFields {
    pub publish_date: Option<NaiveDate>,
    /// Present only when `publish_date` parsed.
    pub year: Option<i32>,
    /// Word-character runs in the abstract, 0 when the abstract is missing.
    pub abstract_word_count: usize,
}

impl DerivedFields {
    pub fn from_date(publish_date: Option<NaiveDate>, abstract_word_count: usize) -> Self {
        use chrono::Datelike;
        Self {
            publish_date,
            year: publish_date.map(|d| d.year()),
            abstract_word_count,
        }
    }
}

/// A cleaned table with its derived fields, row-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub table: Table,
    pub derived: Vec<DerivedFields>,
    pub roles: ColumnRoles,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over rows paired with their derived fields.
    pub fn rows(&self) -> impl Iterator<Item = (&Record, &DerivedFields)> {
        self.table.rows.iter().zip(self.derived.iter())
    }

    /// Value of `column` in row `row`, `Missing` if either is absent.
    pub fn cell(&self, row: usize, column: &str) -> &Cell {
        match (self.table.rows.get(row), self.table.column_index(column)) {
            (Some(record), Some(idx)) => record.get(idx),
            _ => &Cell::Missing,
        }
    }

    /// New table holding only the given rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> CleanedTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.table.rows.get(i).cloned())
            .collect();
        let derived = indices
            .iter()
            .filter_map(|&i| self.derived.get(i).copied())
            .collect();
        CleanedTable {
            table: Table::new(self.table.columns.clone(), rows),
            derived,
            roles: self.roles.clone(),
        }
    }

    /// Smallest and largest present publication year.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.derived.iter().filter_map(|d| d.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Sorted distinct present values of the journal column.
    pub fn journal_options(&self) -> Vec<String> {
        let mut journals: Vec<String> = self
            .table
            .column(&self.roles.journal)
            .filter_map(|c| c.as_text().map(Cow::into_owned))
            .collect();
        journals.sort();
        journals.dedup();
        journals
    }
}
