use std::io::Write;
use std::path::Path;

use super::error::ExportError;
use super::model::CleanedTable;

/// Header of the derived word-count column in exported files.
pub const WORD_COUNT_COLUMN: &str = "abstract_word_count";

/// Column headers written by [`write_csv`], in order.
pub fn export_columns(table: &CleanedTable) -> [String; 6] {
    let roles = &table.roles;
    [
        roles.id.clone(),
        roles.title.clone(),
        roles.authors.clone(),
        roles.journal.clone(),
        roles.publish_time.clone(),
        WORD_COUNT_COLUMN.to_string(),
    ]
}

/// One row of the export column set, as text.  Missing values are empty.
pub fn export_row(table: &CleanedTable, row: usize) -> [String; 6] {
    let roles = &table.roles;
    let derived = table.derived.get(row).copied().unwrap_or_default();
    [
        table.cell(row, &roles.id).to_string(),
        table.cell(row, &roles.title).to_string(),
        table.cell(row, &roles.authors).to_string(),
        table.cell(row, &roles.journal).to_string(),
        derived
            .publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        derived.abstract_word_count.to_string(),
    ]
}

/// Write the export column set as comma-delimited UTF-8 with a header row,
/// quoting fields only where needed.
pub fn write_csv<W: Write>(table: &CleanedTable, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_columns(table))?;
    for row in 0..table.len() {
        csv_writer.write_record(export_row(table, row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_csv(table: &CleanedTable, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file))?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::ExplorerConfig;
    use crate::data::filter::{self, FilterState, JournalFilter};
    use crate::data::{clean, loader};

    const METADATA: &str = "\
cord_uid,source_x,title,authors,journal,abstract,publish_time,mag_id
u1,PMC,\"Masks, distancing and R0\",\"Smith, J; Doe, A\",BMJ,\"Short, quoted \"\"abstract\"\".\",2020-04-01,
u2,Medline,Ferret models,Lee K,Virology,,2019,
u3,PMC,Bat reservoirs,,BMJ,Bats carry many viruses,2020-11-30,
u4,PMC,,Nobody,BMJ,Untitled,2020-01-01,
u5,WHO,Undated work,Kim S,Lancet,Text here,unknown,
";

    fn to_csv_bytes(table: &CleanedTable) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        write_csv(table, &mut buf)?;
        Ok(buf)
    }

    fn cleaned() -> CleanedTable {
        let raw = loader::load_delimited(Cursor::new(METADATA), b',').unwrap();
        clean::clean(&raw, &ExplorerConfig::default()).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let table = cleaned();
        let text = String::from_utf8(to_csv_bytes(&table).unwrap()).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("cord_uid,title,authors,journal,publish_time,abstract_word_count")
        );
        assert_eq!(
            lines.next(),
            Some("u1,\"Masks, distancing and R0\",\"Smith, J; Doe, A\",BMJ,2020-04-01,3")
        );
        assert_eq!(lines.next(), Some("u2,Ferret models,Lee K,Virology,2019-01-01,0"));
        assert_eq!(lines.next(), Some("u3,Bat reservoirs,,BMJ,2020-11-30,4"));
        assert_eq!(lines.next(), Some("u5,Undated work,Kim S,Lancet,,2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn filtered_export_round_trips() {
        let table = cleaned();
        let filters = FilterState {
            year_range: (2020, 2020),
            journal: JournalFilter::Only("BMJ".into()),
        };
        let subset = filter::apply(&table, &filters);
        assert_eq!(subset.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata_filtered.csv");
        save_csv(&subset, &path).unwrap();

        let reloaded = loader::load_file(&path).unwrap();
        assert_eq!(reloaded.len(), subset.len());
        assert_eq!(reloaded.columns, export_columns(&subset).to_vec());
        for (row, record) in reloaded.rows.iter().enumerate() {
            let expected = export_row(&subset, row);
            let actual: Vec<String> = record.cells.iter().map(|c| c.to_string()).collect();
            assert_eq!(actual, expected.to_vec());
        }
    }

    #[test]
    fn columns_pruned_by_cleaning_export_empty() {
        let raw = loader::load_delimited(Cursor::new("title,publish_time\nOnly title,2021\n"), b',')
            .unwrap();
        let table = clean::clean(&raw, &ExplorerConfig::default()).unwrap();
        let text = String::from_utf8(to_csv_bytes(&table).unwrap()).unwrap();
        assert_eq!(
            text,
            "cord_uid,title,authors,journal,publish_time,abstract_word_count\n\
             ,Only title,,,2021-01-01,0\n"
        );
    }
}
