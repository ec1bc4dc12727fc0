use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::data::error::Result;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

pub struct ScatterData {
    x_label: String,
    y_label: String,
    points: Vec<[f64; 2]>,
}

/// Plain x/y scatter over two numeric columns, rows with a non-finite
/// value on either axis skipped.
pub fn prepare(ds: &Dataset, x: &str, y: &str) -> Result<ScatterData> {
    let xs = ds.numeric(x)?;
    let ys = ds.numeric(y)?;

    let stride = super::stride_for(ds.len(), super::MAX_POINTS);
    let points = xs
        .iter()
        .zip(ys.iter())
        .step_by(stride)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x, y])
        .collect();

    Ok(ScatterData {
        x_label: x.to_string(),
        y_label: y.to_string(),
        points,
    })
}

pub fn show(ui: &mut Ui, data: &ScatterData) {
    Plot::new("scatter")
        .x_axis_label(&data.x_label)
        .y_axis_label(&data.y_label)
        .show(ui, |plot_ui| {
            let points: PlotPoints = data.points.iter().copied().collect();
            plot_ui.points(Points::new(points).radius(1.5).color(Color32::LIGHT_BLUE));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use crate::data::model::Column;

    #[test]
    fn test_finite_pairs_only() {
        let ds = Dataset::new(vec![
            Column::numeric("RH", vec![10.0, f64::NAN, 30.0, 40.0]),
            Column::numeric("GHI", vec![1.0, 2.0, f64::INFINITY, 4.0]),
        ])
        .unwrap();
        let data = prepare(&ds, "RH", "GHI").unwrap();
        assert_eq!(data.points, vec![[10.0, 1.0], [40.0, 4.0]]);
        assert_eq!(data.x_label, "RH");
        assert_eq!(data.y_label, "GHI");
    }

    #[test]
    fn test_absent_column() {
        let ds = Dataset::new(vec![Column::numeric("RH", vec![1.0])]).unwrap();
        match prepare(&ds, "RH", "GHI") {
            Err(DataError::ColumnNotFound(name)) => assert_eq!(name, "GHI"),
            Err(e) => panic!("unexpected error: {e:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
