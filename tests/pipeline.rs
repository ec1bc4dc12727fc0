//! End-to-end pipeline runs over real files: raw CSV in a scratch dir,
//! load, clean, outlier filter, write, reload, aggregate.

use std::fs;

use heliograph::data::aggregate;
use heliograph::data::clean;
use heliograph::data::loader;
use heliograph::data::model::ColumnData;
use heliograph::data::outlier;

#[test]
fn test_clean_and_filter_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("site.csv");
    fs::write(
        &raw_path,
        "Timestamp,GHI,DNI,Comments\n\
         2023-01-01 06:00,100,,\n\
         2023-01-01 06:10,200,150,\n\
         2023-01-01 06:20,,250,\n\
         2023-01-01 06:30,400,350,\n\
         2023-01-01 06:40,inf,450,\n",
    )
    .unwrap();

    let raw = loader::load_csv(&raw_path).unwrap();
    assert_eq!(raw.len(), 5);

    // Cleaning drops the all-empty column and fills from the finite mean.
    let (cleaned, report) = clean::clean(&raw);
    assert_eq!(report.dropped_columns, vec!["Comments".to_string()]);
    assert_eq!(report.filled_cells, 2);
    assert!(cleaned.column("Comments").is_none());

    let ghi = cleaned.numeric("GHI").unwrap();
    assert_eq!(ghi[2], 233.33333333333334);
    assert!(ghi[4].is_infinite());
    let dni = cleaned.numeric("DNI").unwrap();
    assert_eq!(dni[0], 300.0);

    // The z-score filter copes with the retained infinity by rejecting it.
    let kept = outlier::remove(&cleaned, &["GHI", "DNI"], 3.0).unwrap();
    assert_eq!(kept.len(), 4);
    assert!(kept
        .numeric("GHI")
        .unwrap()
        .iter()
        .all(|v| v.is_finite()));

    // Written output reloads identically.
    let out_path = dir.path().join("site-cleaned.csv");
    loader::write_csv(&kept, &out_path).unwrap();
    let reloaded = loader::load_csv(&out_path).unwrap();
    assert_eq!(reloaded, kept);
}

#[test]
fn test_aggregate_union_schema_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let files = [
        ("a.csv", "Timestamp,GHI\n2023-01-01 00:00,100\n"),
        ("b.csv", "Timestamp,GHI,Extra\n2023-02-01 00:00,200,7\n"),
        ("c.csv", "GHI,Note\n300,ok\n"),
    ];
    let mut datasets = Vec::new();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        datasets.push(loader::load_csv(&path).unwrap());
    }

    let combined = aggregate::concat(&datasets);
    assert_eq!(combined.len(), 3);
    assert_eq!(
        combined.column_names(),
        vec!["Timestamp", "GHI", "Extra", "Note"]
    );

    // Holes become typed missing markers of the owning column.
    let timestamps = combined.timestamps("Timestamp").unwrap();
    assert!(timestamps[0].is_some() && timestamps[1].is_some());
    assert!(timestamps[2].is_none());

    let extra = combined.numeric("Extra").unwrap();
    assert!(extra[0].is_nan());
    assert_eq!(extra[1], 7.0);
    assert!(extra[2].is_nan());

    match &combined.column("Note").unwrap().data {
        ColumnData::Text(values) => {
            assert_eq!(values[0], None);
            assert_eq!(values[2].as_deref(), Some("ok"));
        }
        other => panic!("Note should stay text, got {other:?}"),
    }

    // The combined file round-trips through CSV with the markers intact.
    let out_path = dir.path().join("combined.csv");
    loader::write_csv(&combined, &out_path).unwrap();
    let reloaded = loader::load_csv(&out_path).unwrap();
    assert_eq!(reloaded.column_names(), combined.column_names());
    assert!(reloaded.numeric("Extra").unwrap()[0].is_nan());
    assert!(reloaded.timestamps("Timestamp").unwrap()[2].is_none());
}

#[test]
fn test_batch_variant_drops_rows_without_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("site.csv");
    fs::write(
        &raw_path,
        "Timestamp,GHI,DNI,DHI\n\
         2023-01-01 06:00,100,70,30\n\
         ,200,80,40\n\
         2023-01-01 06:20,300,90,50\n",
    )
    .unwrap();

    let raw = loader::load_csv(&raw_path).unwrap();
    let (cleaned, mut report) = clean::clean(&raw);
    let (cleaned, dropped) = clean::drop_rows_missing(&cleaned, "Timestamp");
    report.dropped_rows = dropped;

    assert_eq!(report.dropped_rows, 1);
    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned.numeric("GHI").unwrap(), &[100.0, 300.0]);

    let kept = outlier::remove(&cleaned, &["GHI", "DNI", "DHI"], 3.0).unwrap();
    assert_eq!(kept.len(), 2);

    // Filtering again with the same columns and threshold changes nothing.
    let again = outlier::remove(&kept, &["GHI", "DNI", "DHI"], 3.0).unwrap();
    assert_eq!(again, kept);
}
