use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::charts::{ChartKind, PreparedChart};
use crate::data::clean::{self, CleanReport};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::outlier;
use crate::data::schema;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Charts,
    RawData,
}

/// The full UI state, independent of rendering. Loading runs the whole
/// pipeline once (clean, outlier filter), after that every frame draws
/// from the cached `view` and `prepared` chart.
pub struct AppState {
    /// Index into [`schema::REGIONS`], None when a file was opened by path.
    pub selected_region: Option<usize>,

    /// Human-readable name of the loaded source, shown in the top bar.
    pub source_label: Option<String>,

    /// Per-column missing counts of the raw load, before cleaning.
    pub raw_missing: Vec<(String, usize)>,

    /// What the cleaning pass changed.
    pub clean_report: Option<CleanReport>,

    /// Rows the z-score filter removed after cleaning.
    pub outliers_removed: usize,

    /// Cleaned and outlier-filtered dataset for the session.
    pub cleaned: Option<Dataset>,

    /// `cleaned` restricted to the selected time range (cached).
    pub view: Option<Dataset>,

    /// Earliest and latest timestamps of the cleaned dataset.
    pub bounds: Option<(NaiveDateTime, NaiveDateTime)>,

    /// Inclusive day range selected in the side panel.
    pub range_from: NaiveDate,
    pub range_to: NaiveDate,

    pub tab: Tab,

    /// Chart picked on the Charts tab, if any.
    pub active_chart: Option<ChartKind>,

    /// Chart data extracted from the current `view` (cached).
    pub prepared: Option<PreparedChart>,

    /// Whether the Overview tab shows the per-column missing counts.
    pub show_missing: bool,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Current page of the Raw Data table.
    pub raw_page: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_region: None,
            source_label: None,
            raw_missing: Vec::new(),
            clean_report: None,
            outliers_removed: 0,
            cleaned: None,
            view: None,
            bounds: None,
            range_from: NaiveDate::default(),
            range_to: NaiveDate::default(),
            tab: Tab::default(),
            active_chart: None,
            prepared: None,
            show_missing: false,
            status_message: None,
            raw_page: 0,
        }
    }
}

impl AppState {
    /// Load one of the built-in regions from its fixed raw path.
    pub fn load_region(&mut self, idx: usize) {
        let region = &schema::REGIONS[idx];
        if self.load(Path::new(region.raw_path), region.label.to_string()) {
            self.selected_region = Some(idx);
        }
    }

    /// Load an arbitrary CSV with the expected headers. On failure the
    /// previous session stays untouched and the error lands in the status
    /// line.
    pub fn load_path(&mut self, path: &Path, label: String) {
        self.load(path, label);
    }

    fn load(&mut self, path: &Path, label: String) -> bool {
        match run_pipeline(path) {
            Ok(loaded) => {
                log::info!(
                    "loaded {label}: {} rows after cleaning, {} outlier rows removed",
                    loaded.cleaned.len(),
                    loaded.outliers_removed
                );
                self.install(loaded, label);
                true
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    fn install(&mut self, loaded: LoadedData, label: String) {
        self.selected_region = None;
        self.source_label = Some(label);
        self.raw_missing = loaded.raw_missing;
        self.clean_report = Some(loaded.report);
        self.outliers_removed = loaded.outliers_removed;
        self.bounds = loaded.cleaned.time_bounds(schema::TIMESTAMP);

        if let Some((first, last)) = self.bounds {
            self.range_from = first.date();
            self.range_to = last.date();
        }

        self.cleaned = Some(loaded.cleaned);
        self.status_message = None;
        self.raw_page = 0;
        self.apply_time_range();
    }

    /// Rebuild `view` from the current day range, then the active chart.
    pub fn apply_time_range(&mut self) {
        if self.range_to < self.range_from {
            self.range_to = self.range_from;
        }
        self.view = self.cleaned.as_ref().map(|ds| {
            let from = self.range_from.and_time(NaiveTime::MIN);
            let to = self
                .range_to
                .and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| self.range_to.and_time(NaiveTime::MIN));
            let rows = ds.rows_in_time_range(schema::TIMESTAMP, from, to);
            ds.take_rows(&rows)
        });
        self.raw_page = 0;
        self.refresh_chart();
    }

    /// Select a chart trigger and prepare it against the current view.
    pub fn select_chart(&mut self, kind: ChartKind) {
        self.active_chart = Some(kind);
        self.refresh_chart();
    }

    /// Re-extract the active chart's data from `view`. Validation errors
    /// (absent or non-numeric columns) go to the status line.
    pub fn refresh_chart(&mut self) {
        self.prepared = None;
        let (Some(kind), Some(view)) = (self.active_chart, self.view.as_ref()) else {
            return;
        };
        match kind.prepare(view) {
            Ok(prepared) => {
                self.prepared = Some(prepared);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("cannot prepare {:?}: {e}", kind);
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Load pipeline
// ---------------------------------------------------------------------------

struct LoadedData {
    raw_missing: Vec<(String, usize)>,
    report: CleanReport,
    outliers_removed: usize,
    cleaned: Dataset,
}

/// The dashboard variant of the pipeline: clean, then drop z-score
/// outliers over the irradiance columns. Rows with missing timestamps are
/// kept here, they simply never match a time range.
fn run_pipeline(path: &Path) -> anyhow::Result<LoadedData> {
    let raw = loader::load_csv(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let raw_missing = raw.missing_counts();

    let (cleaned, report) = clean::clean(&raw);
    let filtered = outlier::remove(
        &cleaned,
        &schema::OUTLIER_COLUMNS,
        outlier::DEFAULT_THRESHOLD,
    )
    .with_context(|| format!("screening outliers in {}", path.display()))?;

    Ok(LoadedData {
        raw_missing,
        outliers_removed: cleaned.len() - filtered.len(),
        report,
        cleaned: filtered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_sample(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("sample.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Timestamp,GHI,DNI,DHI").unwrap();
        writeln!(f, "2023-01-01 00:00,100,50,20").unwrap();
        writeln!(f, "2023-01-02 00:00,200,60,30").unwrap();
        writeln!(f, "2023-01-03 00:00,300,70,40").unwrap();
        path
    }

    #[test]
    fn test_load_and_time_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);

        let mut state = AppState::default();
        state.load_path(&path, "sample".to_string());

        assert!(state.status_message.is_none());
        assert_eq!(state.cleaned.as_ref().unwrap().len(), 3);
        assert_eq!(state.view.as_ref().unwrap().len(), 3);
        let date = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
        assert_eq!(state.range_from, date(1));
        assert_eq!(state.range_to, date(3));

        // Narrow the range, the view follows.
        state.range_to = date(2);
        state.apply_time_range();
        assert_eq!(state.view.as_ref().unwrap().len(), 2);

        // Inverted ranges collapse to a single day.
        state.range_from = date(3);
        state.range_to = date(1);
        state.apply_time_range();
        assert_eq!(state.range_to, date(3));
        assert_eq!(state.view.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_load_reports_and_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);

        let mut state = AppState::default();
        state.load_path(&path, "sample".to_string());
        state.load_path(Path::new("no/such/file.csv"), "broken".to_string());

        assert!(state.status_message.is_some());
        assert_eq!(state.source_label.as_deref(), Some("sample"));
        assert_eq!(state.cleaned.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_chart_error_goes_to_status_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);

        let mut state = AppState::default();
        state.load_path(&path, "sample".to_string());
        // The sample has no WS/WD columns.
        state.select_chart(ChartKind::WindRose);

        assert!(state.prepared.is_none());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("WS") || msg.contains("WD"), "{msg}");
    }
}
