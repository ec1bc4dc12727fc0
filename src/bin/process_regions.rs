use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use heliograph::data::aggregate;
use heliograph::data::clean::{self, CleanReport};
use heliograph::data::loader;
use heliograph::data::outlier;
use heliograph::data::schema;

// ---------------------------------------------------------------------------
// Batch cleaning pipeline
// ---------------------------------------------------------------------------
//
// Runs every built-in region through load -> clean -> outlier filter and
// writes the per-region cleaned CSVs, the combined CSV, and a JSON run
// report. One failing region does not stop the others.

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum RegionEntry {
    Cleaned {
        region: &'static str,
        raw_rows: usize,
        kept_rows: usize,
        clean: CleanReport,
        outlier_rows: usize,
        output: String,
    },
    Failed {
        region: &'static str,
        error: String,
    },
}

#[derive(Debug, Serialize)]
struct CombinedEntry {
    rows: usize,
    output: &'static str,
}

#[derive(Debug, Serialize)]
struct RunReport {
    generated_at: String,
    regions: Vec<RegionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    combined: Option<CombinedEntry>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    fs::create_dir_all(schema::PROCESSED_DIR)
        .with_context(|| format!("creating {}", schema::PROCESSED_DIR))?;

    let mut regions = Vec::with_capacity(schema::REGIONS.len());
    for region in &schema::REGIONS {
        match process_region(region) {
            Ok(entry) => regions.push(entry),
            Err(e) => {
                log::error!("{}: {e:#}", region.name);
                regions.push(RegionEntry::Failed {
                    region: region.name,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    let combined = combine(&regions)?;

    let report = RunReport {
        generated_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        regions,
        combined,
    };
    let json = serde_json::to_string_pretty(&report).context("serializing run report")?;
    fs::write(schema::REPORT_PATH, json)
        .with_context(|| format!("writing {}", schema::REPORT_PATH))?;
    log::info!("run report written to {}", schema::REPORT_PATH);

    Ok(())
}

/// The batch variant of the pipeline. Unlike the dashboard, rows without a
/// timestamp are dropped so the cleaned files are safe to resample later.
fn process_region(region: &schema::Region) -> anyhow::Result<RegionEntry> {
    let raw = loader::load_csv(Path::new(region.raw_path))
        .with_context(|| format!("loading {}", region.raw_path))?;
    let raw_rows = raw.len();

    let (cleaned, mut report) = clean::clean(&raw);
    let (cleaned, dropped) = clean::drop_rows_missing(&cleaned, schema::TIMESTAMP);
    report.dropped_rows = dropped;

    let kept = outlier::remove(
        &cleaned,
        &schema::OUTLIER_COLUMNS,
        outlier::DEFAULT_THRESHOLD,
    )
    .context("screening outliers")?;
    let outlier_rows = cleaned.len() - kept.len();

    let output = region.cleaned_path();
    loader::write_csv(&kept, Path::new(&output))
        .with_context(|| format!("writing {output}"))?;

    log::info!(
        "{}: {} raw rows, {} kept ({} cells filled, {} timestamp rows dropped, {} outlier rows)",
        region.name,
        raw_rows,
        kept.len(),
        report.filled_cells,
        dropped,
        outlier_rows
    );

    Ok(RegionEntry::Cleaned {
        region: region.name,
        raw_rows,
        kept_rows: kept.len(),
        clean: report,
        outlier_rows,
        output,
    })
}

/// Reload the per-region outputs and write the union-schema combined CSV.
fn combine(regions: &[RegionEntry]) -> anyhow::Result<Option<CombinedEntry>> {
    let mut datasets = Vec::new();
    for entry in regions {
        if let RegionEntry::Cleaned { output, .. } = entry {
            match loader::load_csv(Path::new(output)) {
                Ok(ds) => datasets.push(ds),
                Err(e) => log::error!("reloading {output}: {e:#}"),
            }
        }
    }
    if datasets.is_empty() {
        log::warn!("no cleaned regions, skipping the combined file");
        return Ok(None);
    }

    let all = aggregate::concat(&datasets);
    loader::write_csv(&all, Path::new(schema::COMBINED_PATH))
        .with_context(|| format!("writing {}", schema::COMBINED_PATH))?;
    log::info!("combined: {} rows into {}", all.len(), schema::COMBINED_PATH);

    Ok(Some(CombinedEntry {
        rows: all.len(),
        output: schema::COMBINED_PATH,
    }))
}
