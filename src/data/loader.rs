use std::path::Path;

use chrono::NaiveDateTime;

use super::error::Result;
use super::model::{Column, ColumnData, Dataset, Value};

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Load a comma-delimited CSV file with a header row into a [`Dataset`].
///
/// Column types are inferred from the cell contents, in order of priority:
/// * **numeric** – every non-empty cell parses as `f64` (`inf` and `nan`
///   included); empty cells become `NaN`. A column with no non-empty cell
///   at all is numeric too (all-`NaN`), matching how a fully blank column
///   reads from a sensor export.
/// * **timestamp** – every non-empty cell parses as `YYYY-MM-DD HH:MM` or
///   `YYYY-MM-DD HH:MM:SS`; empty cells become `None`.
/// * **text** – anything else; empty cells become `None`.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| Column {
            name: name.clone(),
            data: infer_column(&records, idx),
        })
        .collect();

    // Records all came from one reader, so the lengths agree by construction.
    Dataset::new(columns)
}

fn cell(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

/// Decide a column's type from one pass over its cells, then build it from
/// a second pass.
fn infer_column(records: &[csv::StringRecord], idx: usize) -> ColumnData {
    let mut all_numeric = true;
    let mut all_timestamp = true;
    for record in records {
        let c = cell(record, idx);
        if c.is_empty() {
            continue;
        }
        if c.parse::<f64>().is_err() {
            all_numeric = false;
        }
        if parse_timestamp(c).is_none() {
            all_timestamp = false;
        }
        if !all_numeric && !all_timestamp {
            break;
        }
    }

    if all_numeric {
        ColumnData::Numeric(
            records
                .iter()
                .map(|r| cell(r, idx).parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        )
    } else if all_timestamp {
        ColumnData::Timestamp(
            records
                .iter()
                .map(|r| parse_timestamp(cell(r, idx)))
                .collect(),
        )
    } else {
        ColumnData::Text(
            records
                .iter()
                .map(|r| {
                    let c = cell(r, idx);
                    (!c.is_empty()).then(|| c.to_string())
                })
                .collect(),
        )
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS`, falling back to `YYYY-MM-DD HH:MM`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write a [`Dataset`] as a comma-delimited CSV file with a header row.
///
/// Missing markers become empty cells; non-finite numbers are written as
/// `inf` / `-inf`, so a written file reloads with identical columns.
pub fn write_csv(ds: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ds.column_names())?;

    for row in 0..ds.len() {
        let record: Vec<String> = ds
            .columns
            .iter()
            .map(|col| cell_to_csv(&col.data, row))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn cell_to_csv(data: &ColumnData, row: usize) -> String {
    match data.value(row) {
        // `{}` keeps the shortest round-trippable form, unlike Value's
        // fixed-precision Display.
        Value::Number(v) => format!("{v}"),
        Value::Time(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        Value::Text(s) => s,
        Value::Null => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tmp(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_type_inference() {
        let (_dir, path) = write_tmp(
            "Timestamp,GHI,Cleaning,Comments,Site\n\
             2023-01-01 00:00,100.5,0,,bumbuna\n\
             2023-01-01 00:10,,1,,bumbuna\n\
             ,inf,0,,\n",
        );
        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.column("Timestamp").unwrap().data.type_name(),
            "timestamp"
        );
        assert_eq!(ds.column("GHI").unwrap().data.type_name(), "numeric");
        assert_eq!(ds.column("Cleaning").unwrap().data.type_name(), "numeric");
        // A fully blank column reads as all-NaN numeric.
        assert_eq!(ds.column("Comments").unwrap().data.type_name(), "numeric");
        assert!(ds.column("Comments").unwrap().is_all_missing());
        assert_eq!(ds.column("Site").unwrap().data.type_name(), "text");

        let ghi = ds.numeric("GHI").unwrap();
        assert_eq!(ghi[0], 100.5);
        assert!(ghi[1].is_nan());
        assert_eq!(ghi[2], f64::INFINITY);
        assert_eq!(ds.timestamps("Timestamp").unwrap()[2], None);
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2023-06-15 12:30").is_some());
        assert!(parse_timestamp("2023-06-15 12:30:45").is_some());
        assert!(parse_timestamp("15/06/2023").is_none());
        assert!(parse_timestamp("noon").is_none());
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let ds = Dataset::new(vec![
            Column::timestamps(
                "Timestamp",
                vec![parse_timestamp("2023-01-01 06:00:00"), None],
            ),
            Column::numeric("GHI", vec![233.33333333333334, f64::NAN]),
            Column::numeric("DNI", vec![f64::INFINITY, 450.0]),
            Column::text("Site", vec![Some("bumbuna".into()), None]),
        ])
        .unwrap();

        write_csv(&ds, &path).unwrap();
        let reloaded = load_csv(&path).unwrap();

        assert_eq!(reloaded.column_names(), ds.column_names());
        assert_eq!(
            reloaded.numeric("GHI").unwrap()[0],
            233.33333333333334
        );
        assert!(reloaded.numeric("GHI").unwrap()[1].is_nan());
        assert_eq!(reloaded.numeric("DNI").unwrap()[0], f64::INFINITY);
        assert_eq!(
            reloaded.timestamps("Timestamp").unwrap()[0],
            parse_timestamp("2023-01-01 06:00:00")
        );
        assert_eq!(reloaded.timestamps("Timestamp").unwrap()[1], None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_csv(&dir.path().join("absent.csv")).is_err());
    }
}
