use chrono::NaiveDateTime;
use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color;
use crate::data::error::{DataError, Result};
use crate::data::model::Dataset;
use crate::data::schema;

// ---------------------------------------------------------------------------
// Time series (GHI / DNI / DHI over the Timestamp column)
// ---------------------------------------------------------------------------

pub struct TimeSeriesData {
    start: NaiveDateTime,
    series: Vec<(String, Vec<[f64; 2]>)>,
}

/// One line per irradiance component, x measured in days since the first
/// timestamp so the plot stays unit-free.
pub fn prepare(ds: &Dataset) -> Result<TimeSeriesData> {
    let times = ds.timestamps(schema::TIMESTAMP)?;
    let start = times
        .iter()
        .flatten()
        .min()
        .copied()
        .ok_or_else(|| DataError::EmptyColumn(schema::TIMESTAMP.to_string()))?;

    let stride = super::stride_for(ds.len(), super::MAX_POINTS);
    let mut series = Vec::new();
    for name in [schema::GHI, schema::DNI, schema::DHI] {
        let values = ds.numeric(name)?;
        let points: Vec<[f64; 2]> = times
            .iter()
            .zip(values.iter())
            .step_by(stride)
            .filter_map(|(t, &v)| {
                let t = (*t)?;
                if !v.is_finite() {
                    return None;
                }
                let days = (t - start).num_seconds() as f64 / 86_400.0;
                Some([days, v])
            })
            .collect();
        series.push((name.to_string(), points));
    }

    Ok(TimeSeriesData { start, series })
}

pub fn show(ui: &mut Ui, data: &TimeSeriesData) {
    let palette = color::series_palette(data.series.len());
    let x_label = format!("Days since {}", data.start.format("%Y-%m-%d %H:%M"));

    Plot::new("time_series")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Radiation (W/m²)")
        .show(ui, |plot_ui| {
            for ((name, points), &color) in data.series.iter().zip(palette.iter()) {
                let points: PlotPoints = points.iter().copied().collect();
                plot_ui.line(Line::new(points).name(name).color(color).width(1.2));
            }
        });
}
