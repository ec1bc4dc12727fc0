use eframe::egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::error::Result;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Pair plot (lower-triangle scatter matrix, histograms on the diagonal)
// ---------------------------------------------------------------------------

/// Per-panel point budget. A pair plot multiplies the point count by the
/// number of panels, so it gets a far smaller budget than a single scatter.
const PANEL_BUDGET: usize = 1_500;

/// Histogram bins on the diagonal panels.
const DIAG_BINS: usize = 12;

/// Inner margin of each unit cell.
const MARGIN: f64 = 0.05;

const SPAN: f64 = 1.0 - 2.0 * MARGIN;

pub struct PairPlotData {
    labels: Vec<String>,
    n: usize,
    /// Scatter points of every lower-triangle panel, in grid coordinates.
    points: Vec<[f64; 2]>,
    /// Bar rectangles of the diagonal histograms as `[x0, y0, x1, y1]`.
    bars: Vec<[f64; 4]>,
}

/// Lays the whole matrix out in one plot: unit cell (col `i`, row `j`)
/// holds the scatter of variable `i` against variable `j` for `i < j`, and
/// the histogram of variable `i` on the diagonal. Every variable is
/// min-max normalized into its cell, so panels share scale per variable
/// the way a pair plot does.
pub fn prepare(ds: &Dataset, columns: &[&str]) -> Result<PairPlotData> {
    let mut values = Vec::with_capacity(columns.len());
    for name in columns {
        values.push(ds.numeric(name)?);
    }
    let n = values.len();

    let ranges: Vec<(f64, f64)> = values.iter().map(|v| finite_range(v)).collect();
    let norm = |idx: usize, v: f64| -> f64 {
        let (min, max) = ranges[idx];
        if max > min {
            (v - min) / (max - min)
        } else {
            0.5
        }
    };

    let stride = super::stride_for(ds.len(), PANEL_BUDGET);
    let mut points = Vec::new();
    for j in 1..n {
        for i in 0..j {
            let cell_x = i as f64;
            let cell_y = (n - 1 - j) as f64;
            for k in (0..ds.len()).step_by(stride) {
                let (x, y) = (values[i][k], values[j][k]);
                if x.is_finite() && y.is_finite() {
                    points.push([
                        cell_x + MARGIN + norm(i, x) * SPAN,
                        cell_y + MARGIN + norm(j, y) * SPAN,
                    ]);
                }
            }
        }
    }

    let mut bars = Vec::new();
    for (i, column) in values.iter().enumerate() {
        let cell_x = i as f64;
        let cell_y = (n - 1 - i) as f64;
        let (min, max) = ranges[i];
        if !min.is_finite() {
            continue;
        }

        let mut counts = vec![0usize; DIAG_BINS];
        for &v in column.iter().filter(|v| v.is_finite()) {
            let bin = if max > min {
                (((v - min) / (max - min) * DIAG_BINS as f64) as usize).min(DIAG_BINS - 1)
            } else {
                0
            };
            counts[bin] += 1;
        }
        let peak = counts.iter().max().copied().unwrap_or(0).max(1) as f64;

        let bin_width = SPAN / DIAG_BINS as f64;
        for (bin, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x0 = cell_x + MARGIN + bin as f64 * bin_width;
            let height = count as f64 / peak * SPAN;
            bars.push([x0, cell_y + MARGIN, x0 + bin_width, cell_y + MARGIN + height]);
        }
    }

    Ok(PairPlotData {
        labels: columns.iter().map(|c| c.to_string()).collect(),
        n,
        points,
        bars,
    })
}

fn finite_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

pub fn show(ui: &mut Ui, data: &PairPlotData) {
    let n = data.n;
    let frame_stroke = Stroke::new(1.0, Color32::from_gray(90));
    let bar_fill = Color32::from_gray(140);

    Plot::new("pair_plot")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-0.5)
        .include_x(n as f64 + 0.5)
        .include_y(-0.5)
        .include_y(n as f64 + 0.7)
        .show(ui, |plot_ui| {
            // Panel frames for the diagonal and the lower triangle.
            for j in 0..n {
                for i in 0..=j {
                    let x0 = i as f64;
                    let y0 = (n - 1 - j) as f64;
                    let frame: PlotPoints = vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]
                    .into();
                    plot_ui.polygon(
                        Polygon::new(frame)
                            .fill_color(Color32::TRANSPARENT)
                            .stroke(frame_stroke),
                    );
                }
            }

            for &[x0, y0, x1, y1] in &data.bars {
                let rect: PlotPoints =
                    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]].into();
                plot_ui.polygon(Polygon::new(rect).fill_color(bar_fill).stroke(Stroke::NONE));
            }

            let points: PlotPoints = data.points.iter().copied().collect();
            plot_ui.points(Points::new(points).radius(1.2).color(Color32::LIGHT_BLUE));

            for (i, label) in data.labels.iter().enumerate() {
                let x = i as f64 + 0.5;
                let y = (n - i) as f64 + 0.05;
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), label.clone())
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
