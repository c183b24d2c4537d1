use crate::config::{ColumnRoles, ExplorerConfig};

use super::error::CleanError;
use super::model::{Cell, CleanedTable, DerivedFields, Record, Table};
use super::text::{parse_publish_date, word_count};

/// Prune sparse columns, drop untitled rows, then derive date, year and
/// abstract word count for every remaining row.
///
/// The column pass runs first, on the raw table; the row pass only looks at
/// the title column.
pub fn clean(raw: &Table, config: &ExplorerConfig) -> Result<CleanedTable, CleanError> {
    let roles = &config.columns;

    // -- 1. drop sparse columns --
    let kept: Vec<usize> = (0..raw.columns.len())
        .filter(|&col| {
            let fraction = raw.missing_fraction(col);
            let keep = fraction <= config.max_missing_fraction;
            if !keep {
                log::debug!(
                    "Dropping column '{}' ({:.1}% missing)",
                    raw.columns[col],
                    fraction * 100.0
                );
            }
            keep
        })
        .collect();

    let columns: Vec<String> = kept.iter().map(|&i| raw.columns[i].clone()).collect();
    let title_idx = columns
        .iter()
        .position(|c| *c == roles.title)
        .ok_or_else(|| CleanError::MissingRequiredColumn(roles.title.clone()))?;

    // -- 2. drop rows without a title --
    let rows: Vec<_> = raw
        .rows
        .iter()
        .map(|row| Record::new(kept.iter().map(|&i| row.get(i).clone()).collect()))
        .filter(|row| !row.get(title_idx).is_missing())
        .collect();

    let table = Table::new(columns, rows);

    // -- 3./4. derived fields --
    let derived = derive_fields(&table, roles);

    log::info!(
        "Cleaned table: {} of {} columns kept, {} of {} rows kept",
        table.columns.len(),
        raw.columns.len(),
        table.len(),
        raw.len()
    );

    Ok(CleanedTable {
        table,
        derived,
        roles: roles.clone(),
    })
}

fn derive_fields(table: &Table, roles: &ColumnRoles) -> Vec<DerivedFields> {
    let date_idx = table.column_index(&roles.publish_time);
    let abstract_idx = table.column_index(&roles.abstract_text);

    table
        .rows
        .iter()
        .map(|row| {
            let publish_date = date_idx
                .and_then(|i| row.get(i).as_text())
                .and_then(|s| parse_publish_date(&s));
            let words = abstract_idx
                .map(|i| row.get(i))
                .and_then(Cell::as_text)
                .map_or(0, |s| word_count(&s));
            DerivedFields::from_date(publish_date, words)
        })
        .collect()
}
