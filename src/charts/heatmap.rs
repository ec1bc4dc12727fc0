use eframe::egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color;
use crate::data::error::Result;
use crate::data::model::Dataset;
use crate::data::stats;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

pub struct HeatmapData {
    labels: Vec<String>,
    /// `cells[row][col]`, `None` where the coefficient is undefined
    /// (zero variance or fewer than two complete pairs).
    cells: Vec<Vec<Option<f64>>>,
}

/// Pairwise Pearson correlation over an explicit column list.
pub fn prepare(ds: &Dataset, columns: &[&str]) -> Result<HeatmapData> {
    let mut values = Vec::with_capacity(columns.len());
    for name in columns {
        values.push(ds.numeric(name)?);
    }

    let mut cells = Vec::with_capacity(columns.len());
    for row in &values {
        let mut line = Vec::with_capacity(columns.len());
        for col in &values {
            line.push(stats::pearson(row, col)?);
        }
        cells.push(line);
    }

    Ok(HeatmapData {
        labels: columns.iter().map(|c| c.to_string()).collect(),
        cells,
    })
}

pub fn show(ui: &mut Ui, data: &HeatmapData) {
    let n = data.labels.len();

    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-2.5)
        .include_x(n as f64 + 0.5)
        .include_y(-1.5)
        .include_y(n as f64 + 0.5)
        .show(ui, |plot_ui| {
            for (i, row) in data.cells.iter().enumerate() {
                // First row at the top.
                let y0 = (n - 1 - i) as f64;
                for (j, cell) in row.iter().enumerate() {
                    let x0 = j as f64;
                    let square: PlotPoints = vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]
                    .into();

                    let fill = match cell {
                        Some(r) => color::diverging(*r),
                        None => Color32::from_gray(60),
                    };
                    plot_ui.polygon(
                        Polygon::new(square)
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::from_gray(25))),
                    );

                    if let Some(r) = cell {
                        let ink = if r.abs() > 0.55 {
                            Color32::WHITE
                        } else {
                            Color32::BLACK
                        };
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(x0 + 0.5, y0 + 0.5),
                                format!("{r:.2}"),
                            )
                            .color(ink),
                        );
                    }
                }
            }

            for (i, label) in data.labels.iter().enumerate() {
                let y0 = (n - 1 - i) as f64;
                plot_ui.text(
                    Text::new(PlotPoint::new(-0.15, y0 + 0.5), label.clone())
                        .anchor(Align2::RIGHT_CENTER),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64 + 0.5, -0.15), label.clone())
                        .anchor(Align2::CENTER_TOP),
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
            Column::numeric("A", vec![1.0, 2.0, 3.0, 4.0]),
            Column::numeric("B", vec![2.0, 4.0, 6.0, 8.0]),
            Column::numeric("C", vec![4.0, 3.0, 2.0, 1.0]),
            Column::numeric("Flat", vec![5.0, 5.0, 5.0, 5.0]),
            Column::text("Comments", vec![None, None, None, None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_correlation_matrix() {
        let data = prepare(&dataset(), &["A", "B", "C"]).unwrap();
        assert_eq!(data.labels, vec!["A", "B", "C"]);

        let r_ab = data.cells[0][1].unwrap();
        let r_ac = data.cells[0][2].unwrap();
        assert!((r_ab - 1.0).abs() < 1e-12);
        assert!((r_ac + 1.0).abs() < 1e-12);
        // Matrix is symmetric with unit diagonal.
        assert!((data.cells[1][0].unwrap() - r_ab).abs() < 1e-12);
        assert!((data.cells[0][0].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_pair_is_blank() {
        let data = prepare(&dataset(), &["A", "Flat"]).unwrap();
        assert!(data.cells[0][1].is_none());
        assert!(data.cells[1][1].is_none());
    }

    #[test]
    fn test_absent_and_non_numeric_columns() {
        let ds = dataset();
        match prepare(&ds, &["A", "Nope"]) {
            Err(DataError::ColumnNotFound(name)) => assert_eq!(name, "Nope"),
            Err(e) => panic!("unexpected error: {e:?}"),
            Ok(_) => panic!("expected an error"),
        }
        match prepare(&ds, &["A", "Comments"]) {
            Err(DataError::NotNumeric(name)) => assert_eq!(name, "Comments"),
            Err(e) => panic!("unexpected error: {e:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
