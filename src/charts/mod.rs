use eframe::egui::Ui;

use crate::data::error::Result;
use crate::data::model::Dataset;
use crate::data::schema;

pub mod boxplot;
pub mod bubble;
pub mod heatmap;
pub mod histogram;
pub mod pair_plot;
pub mod scatter;
pub mod time_series;
pub mod wind_rose;

// ---------------------------------------------------------------------------
// Chart catalogue
// ---------------------------------------------------------------------------

/// Point budget for scatter-like charts. Rows beyond the budget are
/// stride-downsampled before rendering so a year of 1-minute data stays
/// interactive.
pub const MAX_POINTS: usize = 10_000;

/// Bubble charts draw one plot element per point, so they get a tighter
/// budget than plain scatters.
pub const MAX_BUBBLES: usize = 2_500;

/// Smallest stride that brings `len` points under `budget`.
pub(crate) fn stride_for(len: usize, budget: usize) -> usize {
    if len <= budget {
        1
    } else {
        len.div_ceil(budget)
    }
}

/// Every chart the dashboard can render, one variant per trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TimeSeries,
    CleaningImpact,
    WindRose,
    CorrelationSolar,
    PairPlotSolar,
    CorrelationWind,
    PairPlotWind,
    RhVsModuleTemp,
    RhVsGhi,
    HistogramGhi,
    HistogramWs,
    HistogramModuleTemp,
    Bubble,
}

impl ChartKind {
    pub const ALL: [ChartKind; 13] = [
        ChartKind::TimeSeries,
        ChartKind::CleaningImpact,
        ChartKind::WindRose,
        ChartKind::CorrelationSolar,
        ChartKind::PairPlotSolar,
        ChartKind::CorrelationWind,
        ChartKind::PairPlotWind,
        ChartKind::RhVsModuleTemp,
        ChartKind::RhVsGhi,
        ChartKind::HistogramGhi,
        ChartKind::HistogramWs,
        ChartKind::HistogramModuleTemp,
        ChartKind::Bubble,
    ];

    /// Button label on the Charts tab.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "Time series",
            ChartKind::CleaningImpact => "Cleaning impact",
            ChartKind::WindRose => "Wind rose",
            ChartKind::CorrelationSolar => "Correlation (solar & temp)",
            ChartKind::PairPlotSolar => "Pair plot (solar & temp)",
            ChartKind::CorrelationWind => "Correlation (wind)",
            ChartKind::PairPlotWind => "Pair plot (wind & solar)",
            ChartKind::RhVsModuleTemp => "RH vs TModA",
            ChartKind::RhVsGhi => "RH vs GHI",
            ChartKind::HistogramGhi => "Histogram of GHI",
            ChartKind::HistogramWs => "Histogram of WS",
            ChartKind::HistogramModuleTemp => "Histogram of TModA",
            ChartKind::Bubble => "Bubble (GHI / Tamb / RH)",
        }
    }

    /// Extract everything the chart needs from the dataset. The result is
    /// cached by the app and redrawn every frame without touching `ds`
    /// again.
    pub fn prepare(&self, ds: &Dataset) -> Result<PreparedChart> {
        Ok(match self {
            ChartKind::TimeSeries => PreparedChart::TimeSeries(time_series::prepare(ds)?),
            ChartKind::CleaningImpact => PreparedChart::Boxplot(boxplot::prepare(ds)?),
            ChartKind::WindRose => PreparedChart::WindRose(wind_rose::prepare(ds)?),
            ChartKind::CorrelationSolar => {
                PreparedChart::Heatmap(heatmap::prepare(ds, &schema::SOLAR_TEMP_COLUMNS)?)
            }
            ChartKind::PairPlotSolar => {
                PreparedChart::PairPlot(pair_plot::prepare(ds, &schema::SOLAR_TEMP_COLUMNS)?)
            }
            ChartKind::CorrelationWind => {
                PreparedChart::Heatmap(heatmap::prepare(ds, &schema::WIND_COLUMNS)?)
            }
            ChartKind::PairPlotWind => {
                PreparedChart::PairPlot(pair_plot::prepare(ds, &schema::WIND_COLUMNS)?)
            }
            ChartKind::RhVsModuleTemp => {
                PreparedChart::Scatter(scatter::prepare(ds, schema::RH, schema::TMOD_A)?)
            }
            ChartKind::RhVsGhi => {
                PreparedChart::Scatter(scatter::prepare(ds, schema::RH, schema::GHI)?)
            }
            ChartKind::HistogramGhi => PreparedChart::Histogram(histogram::prepare(
                ds,
                schema::GHI,
                histogram::DEFAULT_BINS,
            )?),
            ChartKind::HistogramWs => PreparedChart::Histogram(histogram::prepare(
                ds,
                schema::WS,
                histogram::DEFAULT_BINS,
            )?),
            ChartKind::HistogramModuleTemp => PreparedChart::Histogram(histogram::prepare(
                ds,
                schema::TMOD_A,
                histogram::DEFAULT_BINS,
            )?),
            ChartKind::Bubble => PreparedChart::Bubble(bubble::prepare(
                ds,
                schema::GHI,
                schema::TAMB,
                schema::RH,
                Some(schema::WS),
            )?),
        })
    }
}

// ---------------------------------------------------------------------------
// Prepared charts
// ---------------------------------------------------------------------------

/// A chart reduced to plain plot-space data, ready to draw.
pub enum PreparedChart {
    TimeSeries(time_series::TimeSeriesData),
    Heatmap(heatmap::HeatmapData),
    PairPlot(pair_plot::PairPlotData),
    Scatter(scatter::ScatterData),
    Histogram(histogram::HistogramData),
    Bubble(bubble::BubbleData),
    WindRose(wind_rose::WindRoseData),
    Boxplot(boxplot::BoxplotData),
}

impl PreparedChart {
    pub fn show(&self, ui: &mut Ui) {
        match self {
            PreparedChart::TimeSeries(data) => time_series::show(ui, data),
            PreparedChart::Heatmap(data) => heatmap::show(ui, data),
            PreparedChart::PairPlot(data) => pair_plot::show(ui, data),
            PreparedChart::Scatter(data) => scatter::show(ui, data),
            PreparedChart::Histogram(data) => histogram::show(ui, data),
            PreparedChart::Bubble(data) => bubble::show(ui, data),
            PreparedChart::WindRose(data) => wind_rose::show(ui, data),
            PreparedChart::Boxplot(data) => boxplot::show(ui, data),
        }
    }
}
