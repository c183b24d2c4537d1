//! Frequency counts over a (filtered) cleaned table
//!
//! Every ranking sorts by descending count and keeps first-seen order among
//! equal counts, scanning rows top to bottom.

use std::collections::{BTreeMap, HashMap};

use super::model::CleanedTable;
use super::text::TitleTokenizer;

/// Bucket for rows whose category value is missing.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Category → count, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Count keys in encounter order, then rank by descending count.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + Into<String>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();
        for key in keys {
            match positions.get(key.as_ref()) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    let key: String = key.into();
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, 1));
                }
            }
        }
        // stable: ties keep encounter order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// Keep the `n` most frequent entries.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, count)| count)
    }
}

/// Rows per publication year, ascending by year.  Undated rows are skipped.
pub fn by_year(table: &CleanedTable) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in table.derived.iter().filter_map(|d| d.year) {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Top `n` values of `column`, missing values counted as [`UNKNOWN_LABEL`].
///
/// Returns `None` when the column is not part of the table.
pub fn by_column(table: &CleanedTable, column: &str, n: usize) -> Option<FrequencyTable> {
    table.table.column_index(column)?;
    let keys = table.table.column(column).map(|cell| {
        cell.as_text()
            .map_or_else(|| UNKNOWN_LABEL.to_string(), |s| s.into_owned())
    });
    Some(FrequencyTable::from_keys(keys).top(n))
}

/// Top `n` journals.  A table without a journal column counts every row as unknown.
pub fn by_journal(table: &CleanedTable, n: usize) -> FrequencyTable {
    by_column(table, &table.roles.journal, n).unwrap_or_else(|| {
        FrequencyTable::from_keys(std::iter::repeat(UNKNOWN_LABEL).take(table.len())).top(n)
    })
}

/// Top `n` sources; `None` when the optional source column is absent.
pub fn by_source(table: &CleanedTable, n: usize) -> Option<FrequencyTable> {
    by_column(table, &table.roles.source, n)
}

/// Top `n` title words.
///
/// Returns `None` when the ranking would be empty (no word survives tokenizing,
/// or `n` is 0), so callers can tell "nothing to show" apart from a ranking.
pub fn by_title_word(
    table: &CleanedTable,
    tokenizer: &TitleTokenizer,
    n: usize,
) -> Option<FrequencyTable> {
    let words = table
        .table
        .column(&table.roles.title)
        .filter_map(|cell| cell.as_text())
        .flat_map(|title| tokenizer.tokenize(&title).collect::<Vec<_>>());
    let ranked = FrequencyTable::from_keys(words).top(n);
    (!ranked.is_empty()).then_some(ranked)
}

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub by_year: Vec<(i32, usize)>,
    pub top_journals: FrequencyTable,
    pub top_sources: Option<FrequencyTable>,
    pub top_words: Option<FrequencyTable>,
}

impl Summary {
    pub fn compute(
        table: &CleanedTable,
        tokenizer: &TitleTokenizer,
        config: &crate::config::ExplorerConfig,
    ) -> Self {
        Self {
            by_year: by_year(table),
            top_journals: by_journal(table, config.top_journals),
            top_sources: by_source(table, config.top_sources),
            top_words: by_title_word(table, tokenizer, config.top_words),
        }
    }
}
