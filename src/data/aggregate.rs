use super::model::{Column, ColumnData, Dataset, Value};

// ---------------------------------------------------------------------------
// Aggregator – union-schema concatenation of per-region datasets
// ---------------------------------------------------------------------------

/// Concatenate datasets into one combined dataset.
///
/// The combined column set is the union of the inputs' columns, in first
/// appearance order; rows keep their input order. A dataset lacking a
/// column contributes missing markers for those rows. No deduplication is
/// performed.
///
/// When the same column name carries different types across inputs, the
/// combined column degrades to text (cells formatted, missing markers
/// preserved) rather than coercing values.
pub fn concat(datasets: &[Dataset]) -> Dataset {
    let total_rows: usize = datasets.iter().map(|ds| ds.len()).sum();

    let mut names: Vec<&str> = Vec::new();
    for ds in datasets {
        for col in &ds.columns {
            if !names.contains(&col.name.as_str()) {
                names.push(&col.name);
            }
        }
    }

    let columns = names
        .iter()
        .map(|&name| build_column(name, datasets, total_rows))
        .collect();

    // All built columns span `total_rows`, so this cannot fail.
    Dataset::new(columns).unwrap_or_default()
}

fn build_column(name: &str, datasets: &[Dataset], total_rows: usize) -> Column {
    let mut kinds = datasets
        .iter()
        .filter_map(|ds| ds.column(name))
        .map(|col| col.data.type_name());
    let first = kinds.next().unwrap_or("numeric");
    let uniform = kinds.all(|k| k == first);

    match (uniform, first) {
        (true, "numeric") => {
            let mut values = Vec::with_capacity(total_rows);
            for ds in datasets {
                match ds.column(name) {
                    Some(Column {
                        data: ColumnData::Numeric(v),
                        ..
                    }) => values.extend_from_slice(v),
                    _ => values.extend(std::iter::repeat(f64::NAN).take(ds.len())),
                }
            }
            Column::numeric(name, values)
        }
        (true, "timestamp") => {
            let mut values = Vec::with_capacity(total_rows);
            for ds in datasets {
                match ds.column(name) {
                    Some(Column {
                        data: ColumnData::Timestamp(v),
                        ..
                    }) => values.extend_from_slice(v),
                    _ => values.extend(std::iter::repeat(None).take(ds.len())),
                }
            }
            Column::timestamps(name, values)
        }
        _ => {
            let mut values = Vec::with_capacity(total_rows);
            for ds in datasets {
                match ds.column(name) {
                    Some(col) => {
                        values.extend((0..ds.len()).map(|row| cell_to_text(&col.data, row)))
                    }
                    None => values.extend(std::iter::repeat(None).take(ds.len())),
                }
            }
            Column::text(name, values)
        }
    }
}

fn cell_to_text(data: &ColumnData, row: usize) -> Option<String> {
    match data.value(row) {
        Value::Null => None,
        Value::Number(v) => Some(format!("{v}")),
        Value::Time(t) => Some(t.format("%Y-%m-%d %H:%M:%S").to_string()),
        Value::Text(s) => Some(s),
    }
}
