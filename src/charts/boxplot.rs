use eframe::egui::{Align2, Color32, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::data::error::{DataError, Result};
use crate::data::model::Dataset;
use crate::data::schema;
use crate::data::stats;

// ---------------------------------------------------------------------------
// Cleaning-impact boxplot
// ---------------------------------------------------------------------------

struct BoxStats {
    lower_whisker: f64,
    q1: f64,
    median: f64,
    q3: f64,
    upper_whisker: f64,
}

struct Group {
    label: &'static str,
    stats: BoxStats,
    fliers: Vec<f64>,
}

pub struct BoxplotData {
    groups: Vec<Group>,
}

/// Distribution of `ModA` split by the `Cleaning` flag. Whiskers reach the
/// furthest value within 1.5 IQR of the box, values beyond them are drawn
/// as individual fliers.
pub fn prepare(ds: &Dataset) -> Result<BoxplotData> {
    let cleaning = ds.numeric(schema::CLEANING)?;
    let moda = ds.numeric(schema::MOD_A)?;

    let mut groups = Vec::new();
    for (label, flag) in [("Cleaned", 1.0), ("Not cleaned", 0.0)] {
        let values: Vec<f64> = cleaning
            .iter()
            .zip(moda.iter())
            .filter(|&(&c, &v)| c == flag && v.is_finite())
            .map(|(_, &v)| v)
            .collect();
        if let Some(group) = summarize(label, &values) {
            groups.push(group);
        }
    }
    if groups.is_empty() {
        return Err(DataError::EmptyColumn(schema::MOD_A.to_string()));
    }

    Ok(BoxplotData { groups })
}

fn summarize(label: &'static str, values: &[f64]) -> Option<Group> {
    let (q1, median, q3) = stats::quartiles(values)?;
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let mut lower_whisker = q1;
    let mut upper_whisker = q3;
    let mut fliers = Vec::new();
    for &v in values {
        if v < low_fence || v > high_fence {
            fliers.push(v);
        } else {
            lower_whisker = lower_whisker.min(v);
            upper_whisker = upper_whisker.max(v);
        }
    }

    Some(Group {
        label,
        stats: BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        },
        fliers,
    })
}

pub fn show(ui: &mut Ui, data: &BoxplotData) {
    Plot::new("cleaning_impact")
        .y_axis_label("ModA (W/m²)")
        .show_grid(true)
        .show(ui, |plot_ui| {
            let elems: Vec<BoxElem> = data
                .groups
                .iter()
                .enumerate()
                .map(|(i, group)| {
                    let s = &group.stats;
                    BoxElem::new(
                        i as f64,
                        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                    )
                    .name(group.label)
                    .box_width(0.5)
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(elems));

            for (i, group) in data.groups.iter().enumerate() {
                let fliers: PlotPoints =
                    group.fliers.iter().map(|&v| [i as f64, v]).collect();
                plot_ui.points(Points::new(fliers).radius(2.0).color(Color32::GRAY));

                let y = group.stats.lower_whisker.min(
                    group.fliers.iter().copied().fold(f64::INFINITY, f64::min),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, y), group.label)
                        .anchor(Align2::CENTER_TOP),
                );
            }
        });
}
