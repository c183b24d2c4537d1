use super::model::CleanedTable;

// ---------------------------------------------------------------------------
// Filter predicate: year window plus journal selection
// ---------------------------------------------------------------------------

/// Journal selector value.  `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JournalFilter {
    #[default]
    All,
    /// Exact, case-sensitive match; rows with a missing journal never match.
    Only(String),
}

impl JournalFilter {
    pub fn label(&self) -> &str {
        match self {
            JournalFilter::All => "All",
            JournalFilter::Only(journal) => journal,
        }
    }
}

/// Current selections from the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Inclusive on both ends.
    pub year_range: (i32, i32),
    pub journal: JournalFilter,
}

impl FilterState {
    /// Full year span of `table`, or `fallback` when it has no dated rows.
    pub fn for_table(table: &CleanedTable, fallback: (i32, i32)) -> Self {
        let year_range = table.year_bounds().unwrap_or_else(|| {
            log::warn!(
                "No parseable publish dates, using fallback year range {}–{}",
                fallback.0,
                fallback.1
            );
            fallback
        });
        Self {
            year_range,
            journal: JournalFilter::All,
        }
    }
}

/// Return indices of rows that pass the filter.
///
/// A row passes when:
/// * its year is present and inside `year_range` (undated rows never pass)
/// * the journal filter is `All`, or the row's journal equals the selection
pub fn filtered_indices(table: &CleanedTable, filters: &FilterState) -> Vec<usize> {
    let (min_year, max_year) = filters.year_range;
    let journal_idx = table.table.column_index(&table.roles.journal);

    table
        .rows()
        .enumerate()
        .filter(|(_, (record, derived))| {
            let Some(year) = derived.year else {
                return false;
            };
            if year < min_year || year > max_year {
                return false;
            }
            match &filters.journal {
                JournalFilter::All => true,
                JournalFilter::Only(wanted) => journal_idx
                    .and_then(|i| record.get(i).as_text())
                    .is_some_and(|journal| journal == wanted.as_str()),
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// Filtered copy of `table`.
pub fn apply(table: &CleanedTable, filters: &FilterState) -> CleanedTable {
    table.subset(&filtered_indices(table, filters))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::ColumnRoles;
    use crate::data::model::{Cell, DerivedFields, Record, Table};

    fn paper(journal: Option<&str>, year: Option<i32>) -> (Record, DerivedFields) {
        let journal = journal.map_or(Cell::Missing, |j| Cell::Text(j.to_string()));
        let date = year.and_then(|y| NaiveDate::from_ymd_opt(y, 6, 1));
        (
            Record::new(vec![Cell::Text("t".into()), journal]),
            DerivedFields::from_date(date, 0),
        )
    }

    fn table(papers: Vec<(Record, DerivedFields)>) -> CleanedTable {
        let (rows, derived) = papers.into_iter().unzip();
        CleanedTable {
            table: Table::new(vec!["title".into(), "journal".into()], rows),
            derived,
            roles: ColumnRoles::default(),
        }
    }

    fn sample() -> CleanedTable {
        table(vec![
            paper(Some("J1"), Some(2019)),
            paper(Some("J2"), Some(2019)),
            paper(Some("J1"), Some(2020)),
            paper(None, None),
        ])
    }

    #[test]
    fn year_range_is_inclusive_and_skips_undated_rows() {
        let t = sample();
        let filters = FilterState {
            year_range: (2019, 2019),
            journal: JournalFilter::All,
        };
        assert_eq!(filtered_indices(&t, &filters), vec![0, 1]);

        let wide = FilterState {
            year_range: (1900, 2100),
            journal: JournalFilter::All,
        };
        assert_eq!(filtered_indices(&t, &wide), vec![0, 1, 2]);
    }

    #[test]
    fn journal_match_is_exact() {
        let t = table(vec![
            paper(Some("J1"), Some(2020)),
            paper(Some("j1"), Some(2020)),
            paper(None, Some(2020)),
        ]);
        let filters = FilterState {
            year_range: (2020, 2020),
            journal: JournalFilter::Only("J1".into()),
        };
        assert_eq!(filtered_indices(&t, &filters), vec![0]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = sample();
        let filters = FilterState {
            year_range: (2019, 2020),
            journal: JournalFilter::Only("J1".into()),
        };
        let once = apply(&t, &filters);
        let twice = apply(&once, &filters);
        assert_eq!(once.len(), 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn initial_state_uses_fallback_without_years() {
        let undated = table(vec![paper(Some("J1"), None)]);
        assert_eq!(
            FilterState::for_table(&undated, (2015, 2022)).year_range,
            (2015, 2022)
        );
        assert!(apply(&undated, &FilterState::for_table(&undated, (2015, 2022))).is_empty());

        assert_eq!(FilterState::for_table(&sample(), (2015, 2022)).year_range, (2019, 2020));
    }
}
