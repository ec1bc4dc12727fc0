use super::error::{DataError, Result};
use super::model::{Column, ColumnData};

// ---------------------------------------------------------------------------
// Scalar statistics over numeric slices
// ---------------------------------------------------------------------------
//
// All functions ignore non-finite values (NaN missing markers as well as
// ±inf sensor spikes); `None` means the statistic is undefined because no
// finite value exists.

fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| v.is_finite())
}

/// Arithmetic mean of the finite values.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (mut sum, mut count) = (0.0, 0usize);
    for v in finite(values) {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Population standard deviation (ddof = 0) of the finite values, the
/// convention z-scores are computed with.
pub fn std_population(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let (mut sum_sq, mut count) = (0.0, 0usize);
    for v in finite(values) {
        sum_sq += (v - m).powi(2);
        count += 1;
    }
    Some((sum_sq / count as f64).sqrt())
}

/// Sample standard deviation (ddof = 1) of the finite values, the
/// convention `describe` reports. Zero when fewer than two values exist.
pub fn std_sample(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let (mut sum_sq, mut count) = (0.0, 0usize);
    for v in finite(values) {
        sum_sq += (v - m).powi(2);
        count += 1;
    }
    if count < 2 {
        return Some(0.0);
    }
    Some((sum_sq / (count - 1) as f64).sqrt())
}

/// First quartile, median and third quartile of the finite values,
/// linearly interpolated.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64, f64)> {
    let mut sorted: Vec<f64> = finite(values).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some((
        percentile(&sorted, 0.25),
        percentile(&sorted, 0.5),
        percentile(&sorted, 0.75),
    ))
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = idx - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}

/// Pearson correlation over rows where both values are finite.
///
/// `Ok(None)` when the coefficient is undefined: fewer than two complete
/// pairs, or zero variance on either side.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    if x.len() != y.len() {
        return Err(DataError::LengthMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return Ok(None);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in &pairs {
        numerator += (a - mean_x) * (b - mean_y);
        sum_sq_x += (a - mean_x).powi(2);
        sum_sq_y += (b - mean_y).powi(2);
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator.abs() < f64::EPSILON {
        return Ok(None);
    }
    Ok(Some(numerator / denominator))
}

// ---------------------------------------------------------------------------
// Per-column summary (the overview table)
// ---------------------------------------------------------------------------

/// Descriptive summary of one numeric column's finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarize a numeric column, skipping non-finite values.
pub fn describe(column: &Column) -> Result<ColumnSummary> {
    let values = match &column.data {
        ColumnData::Numeric(v) => v,
        _ => return Err(DataError::NotNumeric(column.name.clone())),
    };

    let count = finite(values).count();
    if count == 0 {
        return Err(DataError::EmptyColumn(column.name.clone()));
    }
    let min = finite(values).fold(f64::INFINITY, f64::min);
    let max = finite(values).fold(f64::NEG_INFINITY, f64::max);

    // count > 0, so the moments and quartiles are all defined.
    let mean = mean(values).unwrap_or_default();
    let std = std_sample(values).unwrap_or_default();
    let (q1, median, q3) = quartiles(values).unwrap_or_default();

    Ok(ColumnSummary {
        count,
        mean,
        std,
        min,
        q1,
        median,
        q3,
        max,
    })
}
