use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, Points};

use crate::color;
use crate::data::error::Result;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Bubble chart
// ---------------------------------------------------------------------------

const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 14.0;

pub struct BubblePoint {
    x: f64,
    y: f64,
    radius: f32,
    color: Color32,
}

pub struct BubbleData {
    x_label: String,
    y_label: String,
    size_label: String,
    color_label: Option<String>,
    points: Vec<BubblePoint>,
}

/// Scatter with a third column mapped to bubble radius and an optional
/// fourth mapped through the sequential colormap. Rows with a non-finite
/// value in any used column are skipped.
pub fn prepare(
    ds: &Dataset,
    x: &str,
    y: &str,
    size: &str,
    color_by: Option<&str>,
) -> Result<BubbleData> {
    let xs = ds.numeric(x)?;
    let ys = ds.numeric(y)?;
    let sizes = ds.numeric(size)?;
    let colors = match color_by {
        Some(name) => Some(ds.numeric(name)?),
        None => None,
    };

    let stride = super::stride_for(ds.len(), super::MAX_BUBBLES);
    let mut rows: Vec<(f64, f64, f64, f64)> = Vec::new();
    for k in (0..ds.len()).step_by(stride) {
        let (x, y, s) = (xs[k], ys[k], sizes[k]);
        let c = colors.map(|col| col[k]).unwrap_or(0.0);
        if x.is_finite() && y.is_finite() && s.is_finite() && c.is_finite() {
            rows.push((x, y, s, c));
        }
    }

    let size_range = value_range(rows.iter().map(|r| r.2));
    let color_range = value_range(rows.iter().map(|r| r.3));

    let points = rows
        .iter()
        .map(|&(x, y, s, c)| {
            let t_size = normalize(s, size_range);
            let radius = MIN_RADIUS + t_size as f32 * (MAX_RADIUS - MIN_RADIUS);
            let color = if color_by.is_some() {
                color::sequential(normalize(c, color_range)).gamma_multiply(0.65)
            } else {
                Color32::LIGHT_BLUE.gamma_multiply(0.65)
            };
            BubblePoint { x, y, radius, color }
        })
        .collect();

    Ok(BubbleData {
        x_label: x.to_string(),
        y_label: y.to_string(),
        size_label: size.to_string(),
        color_label: color_by.map(|c| c.to_string()),
        points,
    })
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn normalize(v: f64, (min, max): (f64, f64)) -> f64 {
    if max > min {
        (v - min) / (max - min)
    } else {
        0.5
    }
}

pub fn show(ui: &mut Ui, data: &BubbleData) {
    let title = match &data.color_label {
        Some(color) => format!(
            "size: {}, color: {color}",
            data.size_label
        ),
        None => format!("size: {}", data.size_label),
    };
    ui.label(title);

    Plot::new("bubble_chart")
        .x_axis_label(&data.x_label)
        .y_axis_label(&data.y_label)
        .show(ui, |plot_ui| {
            // One element per bubble, radius is per-element in egui_plot.
            for p in &data.points {
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .radius(p.radius)
                        .color(p.color),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use crate::data::model::Column;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::numeric("GHI", vec![100.0, 200.0, 300.0]),
            Column::numeric("Tamb", vec![20.0, 25.0, 30.0]),
            Column::numeric("RH", vec![0.0, 50.0, 100.0]),
            Column::numeric("WS", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_radius_spans_configured_range() {
        let data = prepare(&dataset(), "GHI", "Tamb", "RH", Some("WS")).unwrap();
        assert_eq!(data.points.len(), 3);
        assert_eq!(data.points[0].radius, MIN_RADIUS);
        assert_eq!(data.points[1].radius, (MIN_RADIUS + MAX_RADIUS) / 2.0);
        assert_eq!(data.points[2].radius, MAX_RADIUS);
    }

    #[test]
    fn test_without_color_column() {
        let data = prepare(&dataset(), "GHI", "Tamb", "RH", None).unwrap();
        assert!(data.color_label.is_none());
        assert_eq!(data.points.len(), 3);
        assert_eq!(data.points[0].color, data.points[2].color);
    }

    #[test]
    fn test_constant_size_uses_midpoint() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0, 2.0]),
            Column::numeric("Tamb", vec![1.0, 2.0]),
            Column::numeric("RH", vec![40.0, 40.0]),
        ])
        .unwrap();
        let data = prepare(&ds, "GHI", "Tamb", "RH", None).unwrap();
        assert_eq!(data.points[0].radius, (MIN_RADIUS + MAX_RADIUS) / 2.0);
    }

    #[test]
    fn test_non_finite_rows_dropped() {
        let ds = Dataset::new(vec![
            Column::numeric("GHI", vec![1.0, f64::NAN]),
            Column::numeric("Tamb", vec![1.0, 2.0]),
            Column::numeric("RH", vec![40.0, 50.0]),
        ])
        .unwrap();
        let data = prepare(&ds, "GHI", "Tamb", "RH", None).unwrap();
        assert_eq!(data.points.len(), 1);
    }

    #[test]
    fn test_absent_color_column() {
        let ds = dataset();
        match prepare(&ds, "GHI", "Tamb", "RH", Some("Nope")) {
            Err(DataError::ColumnNotFound(name)) => assert_eq!(name, "Nope"),
            Err(e) => panic!("unexpected error: {e:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
