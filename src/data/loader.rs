use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Cell, Record, Table};

/// Text values read back as missing, in addition to the empty string.
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma-delimited with a header row
/// * `.tsv`, `.tab` – tab-delimited with a header row
/// * `.json`        – `[{ "cord_uid": "...", "title": "...", ... }, ...]`
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" | "tab" => b'\t',
        "json" => {
            let file = File::open(path)?;
            return load_json(BufReader::new(file));
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let file = File::open(path)?;
    load_delimited(BufReader::new(file), delimiter)
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.  Every record must have
/// as many fields as the header.
pub fn load_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(LoadError::InvalidFormat("no header row".into()));
    }

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw_rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|col| ColumnKind::infer(raw_rows.iter().map(|row| row[col].as_str())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|raw| {
            let cells = raw
                .iter()
                .zip(&kinds)
                .map(|(value, kind)| kind.parse(value))
                .collect();
            Record::new(cells)
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn is_missing_marker(s: &str) -> bool {
    s.is_empty() || MISSING_MARKERS.contains(&s)
}

/// Type shared by every present value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn infer<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let (mut int, mut float, mut boolean, mut any) = (true, true, true, false);
        for v in values.filter(|v| !is_missing_marker(v)) {
            any = true;
            int &= v.parse::<i64>().is_ok();
            float &= v.parse::<f64>().is_ok();
            boolean &= parse_bool(v).is_some();
            if !(int || float || boolean) {
                break;
            }
        }
        match (any, int, float, boolean) {
            (false, ..) => ColumnKind::Text,
            (true, true, _, _) => ColumnKind::Integer,
            (true, false, true, _) => ColumnKind::Float,
            (true, false, false, true) => ColumnKind::Bool,
            _ => ColumnKind::Text,
        }
    }

    fn parse(self, s: &str) -> Cell {
        if is_missing_marker(s) {
            return Cell::Missing;
        }
        let parsed = match self {
            ColumnKind::Integer => s.parse().ok().map(Cell::Integer),
            ColumnKind::Float => s.parse().ok().map(Cell::Float),
            ColumnKind::Bool => parse_bool(s).map(Cell::Bool),
            ColumnKind::Text => None,
        };
        parsed.unwrap_or_else(|| Cell::Text(s.to_string()))
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "cord_uid": "ug7v899j", "title": "Clinical features ...", "journal": "BMC Infect Dis" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys, `null` and
/// the same text markers as delimited files are missing.
pub fn load_json<R: Read>(reader: R) -> Result<Table, LoadError> {
    let root: JsonValue = serde_json::from_reader(reader)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::InvalidFormat("expected top-level JSON array".into()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::InvalidFormat(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            let cells = columns
                .iter()
                .map(|col| obj.get(col).map_or(Cell::Missing, json_to_cell))
                .collect();
            Record::new(cells)
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) if is_missing_marker(s) => Cell::Missing,
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn infers_column_types_and_missing_values() {
        let data = "cord_uid,title,year,score,flag\n\
                    a1,First paper,2020,1.5,true\n\
                    a2,,2021,NA,False\n\
                    a3,\"Third, with comma\",,2,\n";
        let table = load_delimited(Cursor::new(data), b',').unwrap();

        assert_eq!(table.columns, vec!["cord_uid", "title", "year", "score", "flag"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].cells[0], Cell::Text("a1".into()));
        assert_eq!(table.rows[0].cells[2], Cell::Integer(2020));
        assert_eq!(table.rows[0].cells[3], Cell::Float(1.5));
        assert_eq!(table.rows[2].cells[3], Cell::Float(2.0));
        assert_eq!(table.rows[1].cells[4], Cell::Bool(false));
        assert_eq!(table.rows[1].cells[1], Cell::Missing);
        assert_eq!(table.rows[1].cells[3], Cell::Missing);
        assert_eq!(table.rows[2].cells[2], Cell::Missing);
        assert_eq!(table.rows[2].cells[1], Cell::Text("Third, with comma".into()));
    }

    #[test]
    fn mixed_column_stays_text() {
        let data = "id,code\n1,007\n2,abc\n";
        let table = load_delimited(Cursor::new(data), b',').unwrap();
        assert_eq!(table.rows[0].cells[0], Cell::Integer(1));
        assert_eq!(table.rows[0].cells[1], Cell::Text("007".into()));
    }

    #[test]
    fn unequal_row_lengths_are_rejected() {
        let data = "a,b,c\n1,2,3\n4,5\n";
        let err = load_delimited(Cursor::new(data), b',').unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err:?}");
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = load_delimited(Cursor::new(""), b',').unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)), "{err:?}");
    }

    #[test]
    fn tab_delimited() {
        let data = "title\tjournal\nA, B and C\tLancet\n";
        let table = load_delimited(Cursor::new(data), b'\t').unwrap();
        assert_eq!(table.rows[0].cells[0], Cell::Text("A, B and C".into()));
    }

    #[test]
    fn json_records_union_columns() {
        let data = r#"[
            {"cord_uid": "x1", "title": "One", "n": 3},
            {"cord_uid": "x2", "journal": null, "n": 2.5, "extra": ""}
        ]"#;
        let table = load_json(Cursor::new(data)).unwrap();

        assert_eq!(table.columns, vec!["cord_uid", "title", "n", "journal", "extra"]);
        assert_eq!(table.rows[0].cells[2], Cell::Integer(3));
        assert_eq!(table.rows[0].cells[3], Cell::Missing);
        assert_eq!(table.rows[1].cells[1], Cell::Missing);
        assert_eq!(table.rows[1].cells[2], Cell::Float(2.5));
        assert_eq!(table.rows[1].cells[4], Cell::Missing);
    }

    #[test]
    fn json_columns_keep_key_order() {
        let data = r#"[{"title": "T", "journal": "J", "abstract": "A", "cord_uid": "c"}]"#;
        let table = load_json(Cursor::new(data)).unwrap();
        assert_eq!(table.columns, vec!["title", "journal", "abstract", "cord_uid"]);
    }

    #[test]
    fn json_text_markers_are_missing() {
        let data = r#"[
            {"title": "NA", "journal": "None"},
            {"title": "Kept", "journal": "N/A"}
        ]"#;
        let json = load_json(Cursor::new(data)).unwrap();
        let csv = load_delimited(Cursor::new("title,journal\nNA,None\nKept,N/A\n"), b',').unwrap();

        assert_eq!(json.rows[0].cells, vec![Cell::Missing, Cell::Missing]);
        assert_eq!(json.rows[1].cells[0], Cell::Text("Kept".into()));
        assert_eq!(json.rows, csv.rows);
    }

    #[test]
    fn json_must_be_array_of_objects() {
        assert!(matches!(
            load_json(Cursor::new(r#"{"a": 1}"#)),
            Err(LoadError::InvalidFormat(_))
        ));
        assert!(matches!(
            load_json(Cursor::new("[1, 2]")),
            Err(LoadError::InvalidFormat(_))
        ));
        assert!(matches!(load_json(Cursor::new("[{")), Err(LoadError::Json(_))));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("metadata.csv");
        std::fs::write(&csv_path, "title\nHello\n").unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 1);

        let tsv_path = dir.path().join("metadata.tsv");
        std::fs::write(&tsv_path, "title\tjournal\nA, B\tBMJ\n").unwrap();
        let tsv = load_file(&tsv_path).unwrap();
        assert_eq!(tsv.columns, vec!["title", "journal"]);
        assert_eq!(tsv.rows[0].cells[0], Cell::Text("A, B".into()));

        let tab_path = dir.path().join("metadata.TAB");
        std::fs::write(&tab_path, "title\tjournal\nC\tLancet\n").unwrap();
        assert_eq!(load_file(&tab_path).unwrap().rows[0].cells[1], Cell::Text("Lancet".into()));

        let json_path = dir.path().join("metadata.json");
        std::fs::write(&json_path, r#"[{"title": "D"}, {"title": "E"}]"#).unwrap();
        let json = load_file(&json_path).unwrap();
        assert_eq!(json.columns, vec!["title"]);
        assert_eq!(json.len(), 2);

        let xlsx_path = dir.path().join("metadata.xlsx");
        std::fs::write(&xlsx_path, "").unwrap();
        assert!(matches!(
            load_file(&xlsx_path),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));

        assert!(matches!(
            load_file(&dir.path().join("absent.csv")),
            Err(LoadError::Io(_))
        ));
    }
}
