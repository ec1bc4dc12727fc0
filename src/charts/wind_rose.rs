use eframe::egui::{Align2, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color;
use crate::data::error::{DataError, Result};
use crate::data::model::Dataset;
use crate::data::schema;

// ---------------------------------------------------------------------------
// Wind rose
// ---------------------------------------------------------------------------

/// Compass sectors (22.5° each).
const SECTORS: usize = 16;

/// Wind-speed bins stacked within each sector.
const SPEED_BINS: usize = 6;

/// Fraction of the sector width a wedge fills, leaving a gap between
/// neighbouring sectors.
const OPENING: f64 = 0.8;

const ARC_STEPS: usize = 6;

struct Wedge {
    bin: usize,
    points: Vec<[f64; 2]>,
}

pub struct WindRoseData {
    wedges: Vec<Wedge>,
    bin_labels: Vec<String>,
    max_radius: f64,
}

/// Bins wind direction (degrees, 0 = north, clockwise) into 16 compass
/// sectors and wind speed into stacked rings, frequency-normalized to
/// percent of all samples.
pub fn prepare(ds: &Dataset) -> Result<WindRoseData> {
    let directions = ds.numeric(schema::WD)?;
    let speeds = ds.numeric(schema::WS)?;

    let ws_max = speeds
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut counts = [[0usize; SPEED_BINS]; SECTORS];
    let mut total = 0usize;
    for (&wd, &ws) in directions.iter().zip(speeds.iter()) {
        if !wd.is_finite() || !ws.is_finite() {
            continue;
        }
        let bin = if ws_max > 0.0 {
            ((ws / ws_max * SPEED_BINS as f64) as usize).min(SPEED_BINS - 1)
        } else {
            0
        };
        counts[sector_index(wd)][bin] += 1;
        total += 1;
    }
    if total == 0 {
        return Err(DataError::EmptyColumn(schema::WD.to_string()));
    }

    let mut wedges = Vec::new();
    let mut max_radius = 0.0_f64;
    for (sector, bins) in counts.iter().enumerate() {
        let mut inner = 0.0;
        for (bin, &count) in bins.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let pct = count as f64 / total as f64 * 100.0;
            wedges.push(Wedge {
                bin,
                points: wedge_polygon(sector, inner, inner + pct),
            });
            inner += pct;
        }
        max_radius = max_radius.max(inner);
    }

    let bin_width = ws_max / SPEED_BINS as f64;
    let bin_labels = (0..SPEED_BINS)
        .map(|bin| {
            format!(
                "{:.1} to {:.1} m/s",
                bin as f64 * bin_width,
                (bin + 1) as f64 * bin_width
            )
        })
        .collect();

    Ok(WindRoseData {
        wedges,
        bin_labels,
        max_radius,
    })
}

/// Sector of a wind direction, sector 0 centered on north.
fn sector_index(wd: f64) -> usize {
    let wd = wd.rem_euclid(360.0);
    ((wd + 11.25) / 22.5) as usize % SECTORS
}

/// Annular sector between `r0` and `r1`, compass angles mapped so north
/// points up and angles grow clockwise.
fn wedge_polygon(sector: usize, r0: f64, r1: f64) -> Vec<[f64; 2]> {
    let center = sector as f64 * 22.5;
    let half = 22.5 / 2.0 * OPENING;
    let arc = |step: usize| center - half + (2.0 * half) * step as f64 / ARC_STEPS as f64;

    let mut points = Vec::with_capacity(2 * ARC_STEPS + 2);
    for step in 0..=ARC_STEPS {
        points.push(compass_point(arc(step), r1));
    }
    if r0 > 0.0 {
        for step in (0..=ARC_STEPS).rev() {
            points.push(compass_point(arc(step), r0));
        }
    } else {
        points.push([0.0, 0.0]);
    }
    points
}

fn compass_point(degrees: f64, radius: f64) -> [f64; 2] {
    let rad = degrees.to_radians();
    [radius * rad.sin(), radius * rad.cos()]
}

pub fn show(ui: &mut Ui, data: &WindRoseData) {
    let extent = data.max_radius * 1.2;

    Plot::new("wind_rose")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-extent)
        .include_x(extent)
        .include_y(-extent)
        .include_y(extent)
        .show(ui, |plot_ui| {
            for wedge in &data.wedges {
                let t = wedge.bin as f64 / (SPEED_BINS - 1) as f64;
                let points: PlotPoints = wedge.points.iter().copied().collect();
                plot_ui.polygon(
                    Polygon::new(points)
                        .fill_color(color::sequential(t))
                        .name(&data.bin_labels[wedge.bin]),
                );
            }

            let mark = data.max_radius * 1.1;
            for (label, degrees) in [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
                let [x, y] = compass_point(degrees, mark);
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), label).anchor(Align2::CENTER_CENTER),
                );
            }
        });
}
