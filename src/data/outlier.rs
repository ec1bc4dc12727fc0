use super::error::Result;
use super::model::Dataset;
use super::stats;

// ---------------------------------------------------------------------------
// Outlier filter – z-score row rejection
// ---------------------------------------------------------------------------

/// Absolute z-score above which a row counts as an outlier.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Per-row retention mask over the designated numeric columns.
///
/// `mask[row]` is true iff, for every column in `columns`, the row's
/// z-score satisfies `|z| < threshold`. Z-scores use the column mean and
/// **population** standard deviation (ddof = 0) over finite values.
///
/// Explicit policies instead of NaN propagation:
/// * a non-finite cell always fails the threshold, so `±inf` spikes that
///   survived cleaning are rejected here;
/// * a zero-variance column has every finite cell equal to its mean, so
///   z = 0 and the cell always passes; no division is evaluated.
///
/// Fails with a validation error naming the first absent or non-numeric
/// column.
pub fn mask(ds: &Dataset, columns: &[&str], threshold: f64) -> Result<Vec<bool>> {
    let mut keep = vec![true; ds.len()];

    for &name in columns {
        let values = ds.numeric(name)?;
        let moments = stats::mean(values).zip(stats::std_population(values));

        for (row, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                keep[row] = false;
                continue;
            }
            // A finite cell implies the finite moments exist.
            let Some((mean, std)) = moments else { continue };
            if std > 0.0 && ((v - mean) / std).abs() >= threshold {
                keep[row] = false;
            }
        }
    }

    Ok(keep)
}

/// Remove outlier rows, keeping the column set unchanged.
pub fn remove(ds: &Dataset, columns: &[&str], threshold: f64) -> Result<Dataset> {
    Ok(ds.filter_rows(&mask(ds, columns, threshold)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use crate::data::model::Column;

    #[test]
    fn test_threshold_is_strict() {
        // Nine values at 10 and one at 110: mean 20, population std 30,
        // so the spike sits exactly at z = 3 and must be rejected.
        let mut values = vec![10.0; 9];
        values.push(110.0);
        let ds = Dataset::new(vec![Column::numeric("GHI", values)]).unwrap();

        let kept = remove(&ds, &["GHI"], DEFAULT_THRESHOLD).unwrap();
        assert_eq!(kept.len(), 9);
        assert!(kept.numeric("GHI").unwrap().iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_non_finite_rows_are_rejected() {
        let ds = Dataset::new(vec![
            Column::numeric(
                "GHI",
                vec![100.0, 200.0, 233.33333333333334, 400.0, f64::INFINITY],
            ),
            Column::numeric("DNI", vec![300.0, 150.0, 250.0, 350.0, 450.0]),
        ])
        .unwrap();

        let kept = remove(&ds, &["GHI", "DNI"], DEFAULT_THRESHOLD).unwrap();
        assert_eq!(kept.len(), 4);
        assert!(kept.numeric("GHI").unwrap().iter().all(|v| v.is_finite()));
        // Finite rows are judged against finite-value moments only.
        assert_eq!(kept.numeric("DNI").unwrap(), &[300.0, 150.0, 250.0, 350.0]);
    }

    #[test]
    fn test_zero_variance_keeps_all_finite_rows() {
        let ds = Dataset::new(vec![Column::numeric("WD", vec![180.0; 6])]).unwrap();
        let got = mask(&ds, &["WD"], DEFAULT_THRESHOLD).unwrap();
        assert_eq!(got, vec![true; 6]);
    }

    #[test]
    fn test_filtering_is_idempotent_on_its_output() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![100.0, 200.0, 233.0, 400.0, f64::INFINITY]),
            Column::numeric("DNI", vec![300.0, 150.0, 250.0, 350.0, 450.0]),
        ])
        .unwrap();

        let once = remove(&ds, &["GHI", "DNI"], DEFAULT_THRESHOLD).unwrap();
        let twice = remove(&once, &["GHI", "DNI"], DEFAULT_THRESHOLD).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_column_is_a_validation_error() {
        let ds = Dataset::new(vec![Column::numeric("GHI", vec![1.0])]).unwrap();
        assert!(matches!(
            mask(&ds, &["GHI", "DHI"], DEFAULT_THRESHOLD),
            Err(DataError::ColumnNotFound(name)) if name == "DHI"
        ));

        let with_text = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0]),
            Column::text("Comments", vec![Some("x".into())]),
        ])
        .unwrap();
        assert!(matches!(
            mask(&with_text, &["Comments"], DEFAULT_THRESHOLD),
            Err(DataError::NotNumeric(name)) if name == "Comments"
        ));
    }

    #[test]
    fn test_column_without_finite_values_rejects_every_row() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![f64::INFINITY, f64::NAN]),
            Column::numeric("DNI", vec![1.0, 2.0]),
        ])
        .unwrap();
        let got = mask(&ds, &["GHI", "DNI"], DEFAULT_THRESHOLD).unwrap();
        assert_eq!(got, vec![false, false]);
    }
}
