use serde::Serialize;

use super::model::{Column, ColumnData, Dataset};
use super::stats;

// ---------------------------------------------------------------------------
// Cleaner – missing-value handling
// ---------------------------------------------------------------------------

/// What one cleaning pass changed, for logging and the batch run report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanReport {
    pub dropped_columns: Vec<String>,
    pub filled_cells: usize,
    pub dropped_rows: usize,
}

/// Clean a dataset:
///
/// * columns whose every cell is a missing marker are removed;
/// * in each remaining numeric column, `NaN` cells are replaced by the
///   arithmetic mean of the column's original finite values.
///
/// Non-finite values (`±inf`) are not missing: they are excluded from the
/// imputation mean but stay in place for the outlier filter to reject. A
/// numeric column with `NaN`s but no finite value at all keeps its `NaN`s,
/// since no mean exists; the outlier filter drops those rows too.
pub fn clean(ds: &Dataset) -> (Dataset, CleanReport) {
    let mut report = CleanReport::default();
    let mut columns = Vec::with_capacity(ds.columns.len());

    for col in &ds.columns {
        if col.is_all_missing() {
            report.dropped_columns.push(col.name.clone());
            continue;
        }
        columns.push(match &col.data {
            ColumnData::Numeric(values) => {
                let (filled, n) = fill_with_mean(values);
                report.filled_cells += n;
                Column::numeric(col.name.clone(), filled)
            }
            _ => col.clone(),
        });
    }

    // Column lengths are untouched, so reassembly cannot fail.
    let cleaned = Dataset::new(columns).unwrap_or_default();
    (cleaned, report)
}

/// Replace `NaN`s with the precomputed finite mean, so fill order cannot
/// affect the result. Returns the filled column and the fill count.
fn fill_with_mean(values: &[f64]) -> (Vec<f64>, usize) {
    let Some(mean) = stats::mean(values) else {
        return (values.to_vec(), 0);
    };
    let mut filled = 0;
    let out = values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                filled += 1;
                mean
            } else {
                v
            }
        })
        .collect();
    (out, filled)
}

/// Drop rows whose cell in `column` is a missing marker (the batch
/// pipeline applies this to `Timestamp`). A dataset without that column is
/// returned unchanged; the second element is the dropped-row count.
pub fn drop_rows_missing(ds: &Dataset, column: &str) -> (Dataset, usize) {
    let Some(col) = ds.column(column) else {
        return (ds.clone(), 0);
    };
    let keep: Vec<bool> = (0..ds.len()).map(|row| !col.data.is_missing(row)).collect();
    let dropped = keep.iter().filter(|&&k| !k).count();
    (ds.filter_rows(&keep), dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_timestamp;

    /// The GHI/DNI/Comments table from the sensor-dataset regression notes.
    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::numeric("GHI", vec![100.0, 200.0, f64::NAN, 400.0, f64::INFINITY]),
            Column::numeric("DNI", vec![f64::NAN, 150.0, 250.0, 350.0, 450.0]),
            Column::text("Comments", vec![None, None, None, None, None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_missing_column_dropped() {
        let (cleaned, report) = clean(&sample());
        assert!(cleaned.column("Comments").is_none());
        assert_eq!(report.dropped_columns, vec!["Comments".to_string()]);
    }

    #[test]
    fn test_mean_fill_uses_original_finite_mean() {
        let (cleaned, report) = clean(&sample());

        let ghi = cleaned.numeric("GHI").unwrap();
        assert!((ghi[2] - 233.33333333333334).abs() < 1e-10);
        // The inf cell survives the cleaner untouched.
        assert_eq!(ghi[4], f64::INFINITY);

        let dni = cleaned.numeric("DNI").unwrap();
        assert!((dni[0] - 300.0).abs() < 1e-10);

        assert_eq!(report.filled_cells, 2);
        assert_eq!(report.dropped_rows, 0);
    }

    #[test]
    fn test_column_without_finite_values_keeps_nans() {
        let ds = Dataset::new(vec![Column::numeric(
            "GHI",
            vec![f64::INFINITY, f64::NAN, f64::INFINITY],
        )])
        .unwrap();
        let (cleaned, report) = clean(&ds);
        // Not all-missing (inf is data), but no mean exists to fill with.
        assert!(cleaned.numeric("GHI").unwrap()[1].is_nan());
        assert_eq!(report.filled_cells, 0);
    }

    #[test]
    fn test_drop_rows_missing_timestamp() {
        let ds = Dataset::new(vec![
            Column::timestamps(
                "Timestamp",
                vec![
                    parse_timestamp("2023-01-01 00:00:00"),
                    None,
                    parse_timestamp("2023-01-01 00:20:00"),
                ],
            ),
            Column::numeric("GHI", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap();

        let (kept, dropped) = drop_rows_missing(&ds, "Timestamp");
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(kept.numeric("GHI").unwrap(), &[1.0, 3.0]);
    }

    #[test]
    fn test_drop_rows_missing_absent_column_is_a_no_op() {
        let ds = Dataset::new(vec![Column::numeric("GHI", vec![1.0, 2.0])]).unwrap();
        let (kept, dropped) = drop_rows_missing(&ds, "Timestamp");
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, 0);
    }
}
