use std::fmt;

use chrono::NaiveDateTime;

use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Value – a single dynamically-typed cell
// ---------------------------------------------------------------------------

/// One cell of a [`Dataset`], used at the loader boundary and in the
/// raw-data table view.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Time(NaiveDateTime),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v:.4}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::Null => Ok(()),
        }
    }
}

impl Value {
    /// Interpret the cell as an `f64` where possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnData – homogeneous columnar storage
// ---------------------------------------------------------------------------

/// Column storage. Missing markers are `NaN` in numeric columns and `None`
/// in timestamp/text columns; a non-finite value (`±inf`) is present data,
/// not a missing marker.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Timestamp(Vec<Option<NaiveDateTime>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Timestamp(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at `row` as a dynamically-typed [`Value`].
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Numeric(v) => {
                let x = v[row];
                if x.is_nan() {
                    Value::Null
                } else {
                    Value::Number(x)
                }
            }
            ColumnData::Timestamp(v) => match v[row] {
                Some(t) => Value::Time(t),
                None => Value::Null,
            },
            ColumnData::Text(v) => match &v[row] {
                Some(s) => Value::Text(s.clone()),
                None => Value::Null,
            },
        }
    }

    /// Whether the cell at `row` is a missing marker.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Numeric(v) => v[row].is_nan(),
            ColumnData::Timestamp(v) => v[row].is_none(),
            ColumnData::Text(v) => v[row].is_none(),
        }
    }

    /// Count of missing markers in the column.
    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Numeric(_) => "numeric",
            ColumnData::Timestamp(_) => "timestamp",
            ColumnData::Text(_) => "text",
        }
    }

    fn take(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => {
                ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect())
            }
            ColumnData::Timestamp(v) => {
                ColumnData::Timestamp(rows.iter().map(|&r| v[r]).collect())
            }
            ColumnData::Text(v) => {
                ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Column – a named column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn timestamps(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Timestamp(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Whether every cell of the column is a missing marker.
    pub fn is_all_missing(&self) -> bool {
        (0..self.data.len()).all(|row| self.data.is_missing(row))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete in-memory table
// ---------------------------------------------------------------------------

/// An ordered collection of equally-long columns. Column order is preserved
/// from the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset, validating that all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |c| c.data.len());
        for col in &columns {
            if col.data.len() != n_rows {
                return Err(DataError::LengthMismatch {
                    expected: n_rows,
                    found: col.data.len(),
                });
            }
        }
        Ok(Dataset { columns, n_rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The values of a numeric column, or a validation error naming it.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        let col = self
            .column(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
        match &col.data {
            ColumnData::Numeric(v) => Ok(v),
            _ => Err(DataError::NotNumeric(name.to_string())),
        }
    }

    /// The values of a timestamp column, or a validation error naming it.
    pub fn timestamps(&self, name: &str) -> Result<&[Option<NaiveDateTime>]> {
        let col = self
            .column(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
        match &col.data {
            ColumnData::Timestamp(v) => Ok(v),
            _ => Err(DataError::NotTimestamp(name.to_string())),
        }
    }

    /// A new dataset containing the given rows, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(rows),
                })
                .collect(),
            n_rows: rows.len(),
        }
    }

    /// A new dataset keeping the rows where `keep` is true.
    pub fn filter_rows(&self, keep: &[bool]) -> Dataset {
        let rows: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter(|(_, &k)| k)
            .map(|(i, _)| i)
            .collect();
        self.take_rows(&rows)
    }

    /// Per-column missing-marker counts, in column order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.data.missing_count()))
            .collect()
    }

    /// Earliest and latest present timestamps of a column, if any.
    pub fn time_bounds(&self, name: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let stamps = self.timestamps(name).ok()?;
        let min = stamps.iter().flatten().min()?;
        let max = stamps.iter().flatten().max()?;
        Some((*min, *max))
    }

    /// Indices of rows whose timestamp lies in the inclusive range
    /// `[from, to]`. Rows with a missing timestamp are excluded; a dataset
    /// without the timestamp column keeps every row.
    pub fn rows_in_time_range(
        &self,
        name: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Vec<usize> {
        match self.timestamps(name) {
            Ok(stamps) => stamps
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_some_and(|t| from <= t && t <= to))
                .map(|(i, _)| i)
                .collect(),
            Err(_) => (0..self.n_rows).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0, 2.0]),
            Column::numeric("DNI", vec![1.0, 2.0, 3.0]),
        ]);
        assert!(matches!(
            result,
            Err(DataError::LengthMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_missing_markers() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0, f64::NAN, f64::INFINITY]),
            Column::text("Comments", vec![None, Some("ok".into()), None]),
        ])
        .unwrap();

        // NaN is missing; inf is present data.
        assert!(ds.columns[0].data.is_missing(1));
        assert!(!ds.columns[0].data.is_missing(2));
        assert_eq!(
            ds.missing_counts(),
            vec![("GHI".to_string(), 1), ("Comments".to_string(), 2)]
        );
    }

    #[test]
    fn test_numeric_accessor_errors() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0]),
            Column::text("Comments", vec![Some("x".into())]),
        ])
        .unwrap();

        assert!(ds.numeric("GHI").is_ok());
        assert!(matches!(
            ds.numeric("Tamb"),
            Err(DataError::ColumnNotFound(name)) if name == "Tamb"
        ));
        assert!(matches!(
            ds.numeric("Comments"),
            Err(DataError::NotNumeric(name)) if name == "Comments"
        ));
    }

    #[test]
    fn test_take_and_filter_rows() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![10.0, 20.0, 30.0, 40.0]),
            Column::timestamps(
                "Timestamp",
                vec![Some(ts(1, 0)), Some(ts(2, 0)), None, Some(ts(4, 0))],
            ),
        ])
        .unwrap();

        let subset = ds.filter_rows(&[true, false, true, false]);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.numeric("GHI").unwrap(), &[10.0, 30.0]);

        let reordered = ds.take_rows(&[3, 0]);
        assert_eq!(reordered.numeric("GHI").unwrap(), &[40.0, 10.0]);
    }

    #[test]
    fn test_time_bounds_and_range() {
        let ds = Dataset::new(vec![Column::timestamps(
            "Timestamp",
            vec![Some(ts(1, 6)), None, Some(ts(3, 12)), Some(ts(2, 0))],
        )])
        .unwrap();

        assert_eq!(ds.time_bounds("Timestamp"), Some((ts(1, 6), ts(3, 12))));
        // Inclusive on both ends; missing timestamps excluded.
        assert_eq!(
            ds.rows_in_time_range("Timestamp", ts(2, 0), ts(3, 12)),
            vec![2, 3]
        );
    }
}
