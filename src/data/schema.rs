// ---------------------------------------------------------------------------
// Well-known columns, chart presets, and the region table
// ---------------------------------------------------------------------------

pub const TIMESTAMP: &str = "Timestamp";
pub const GHI: &str = "GHI";
pub const DNI: &str = "DNI";
pub const DHI: &str = "DHI";
pub const MOD_A: &str = "ModA";
pub const TMOD_A: &str = "TModA";
pub const TAMB: &str = "Tamb";
pub const RH: &str = "RH";
pub const WS: &str = "WS";
pub const WD: &str = "WD";
pub const CLEANING: &str = "Cleaning";

/// Solar radiation and module temperature, the default correlation set.
pub const SOLAR_TEMP_COLUMNS: [&str; 5] = ["GHI", "DNI", "DHI", "TModA", "TModB"];

/// Wind conditions alongside the radiation drivers.
pub const WIND_COLUMNS: [&str; 5] = ["WS", "WSgust", "WD", "GHI", "DNI"];

/// Columns the outlier filter screens in both the dashboard and the batch
/// pipeline.
pub const OUTLIER_COLUMNS: [&str; 3] = ["GHI", "DNI", "DHI"];

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// One measurement site with its fixed raw/cleaned CSV path pair. Paths are
/// relative to the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub label: &'static str,
    pub raw_path: &'static str,
}

impl Region {
    pub fn cleaned_path(&self) -> String {
        format!("{PROCESSED_DIR}/{}-cleaned.csv", self.name)
    }
}

pub const REGIONS: [Region; 3] = [
    Region {
        name: "sierraleone",
        label: "Sierra Leone",
        raw_path: "data/raw/sierraleone-bumbuna.csv",
    },
    Region {
        name: "benin",
        label: "Benin",
        raw_path: "data/raw/benin-malanville.csv",
    },
    Region {
        name: "togo",
        label: "Togo",
        raw_path: "data/raw/togo-dapaong_qc.csv",
    },
];

pub const RAW_DIR: &str = "data/raw";
pub const PROCESSED_DIR: &str = "data/processed";
pub const COMBINED_PATH: &str = "data/processed/combined-cleaned.csv";
pub const REPORT_PATH: &str = "data/processed/report.json";
