use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::error::{DataError, Result};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

pub const DEFAULT_BINS: usize = 20;

pub struct HistogramData {
    label: String,
    /// Bin centers and counts.
    bars: Vec<(f64, f64)>,
    bar_width: f64,
}

/// Equal-width bins over the finite range of one numeric column. Values
/// exactly on the upper edge land in the last bin.
pub fn prepare(ds: &Dataset, column: &str, bins: usize) -> Result<HistogramData> {
    let values = ds.numeric(column)?;
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(DataError::EmptyColumn(column.to_string()));
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let bins = bins.max(1);
    let (bins, bin_width) = if range > 0.0 {
        (bins, range / bins as f64)
    } else {
        // Degenerate single-value column, one bar of nominal width.
        (1, 1.0)
    };

    let mut counts = vec![0usize; bins];
    for &v in &finite {
        let bin = if range > 0.0 {
            (((v - min) / range * bins as f64) as usize).min(bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }

    let bars = counts
        .iter()
        .enumerate()
        .map(|(k, &count)| (min + (k as f64 + 0.5) * bin_width, count as f64))
        .collect();

    Ok(HistogramData {
        label: column.to_string(),
        bars,
        bar_width: bin_width,
    })
}

pub fn show(ui: &mut Ui, data: &HistogramData) {
    let bars: Vec<Bar> = data
        .bars
        .iter()
        .map(|&(center, count)| Bar::new(center, count).width(data.bar_width * 0.95))
        .collect();

    Plot::new("histogram")
        .x_axis_label(&data.label)
        .y_axis_label("Frequency")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(Color32::LIGHT_BLUE)
                    .name(&data.label),
            );
        });
}
