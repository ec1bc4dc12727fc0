use std::path::Path;

use anyhow::Context;
use chrono::{Duration, NaiveDateTime};

use heliograph::data::loader;
use heliograph::data::model::{Column, Dataset};
use heliograph::data::schema;

// ---------------------------------------------------------------------------
// Synthetic raw-data generator
// ---------------------------------------------------------------------------
//
// Writes one raw CSV per built-in region with a plausible diurnal cycle
// and the defects the pipeline exists for: missing cells, missing
// timestamps, infinite sensor glitches, spike outliers, and an always
// empty Comments column.

/// 21 days of 10-minute samples per region.
const ROWS: usize = 3024;

const STEP_MINUTES: i64 = 10;

const MISSING_RATE: f64 = 0.02;
const SPIKE_RATE: f64 = 0.002;
const INF_RATE: f64 = 0.001;
const MISSING_TIMESTAMP_RATE: f64 = 0.002;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Per-site climate parameters.
struct Site {
    peak_ghi: f64,
    base_temp: f64,
    prevailing_wd: f64,
}

/// One entry per [`schema::REGIONS`] element, same order.
const SITES: [Site; 3] = [
    Site {
        peak_ghi: 760.0,
        base_temp: 24.0,
        prevailing_wd: 210.0,
    },
    Site {
        peak_ghi: 830.0,
        base_temp: 28.0,
        prevailing_wd: 180.0,
    },
    Site {
        peak_ghi: 790.0,
        base_temp: 27.0,
        prevailing_wd: 150.0,
    },
];

fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all(schema::RAW_DIR)
        .with_context(|| format!("creating {}", schema::RAW_DIR))?;

    let start = loader::parse_timestamp("2023-01-01 00:00")
        .context("building the start timestamp")?;

    for (idx, region) in schema::REGIONS.iter().enumerate() {
        let mut rng = SimpleRng::new(42 + idx as u64);
        let ds = generate_site(&SITES[idx], start, &mut rng)?;
        loader::write_csv(&ds, Path::new(region.raw_path))
            .with_context(|| format!("writing {}", region.raw_path))?;
        println!("wrote {} rows to {}", ds.len(), region.raw_path);
    }

    Ok(())
}

fn generate_site(
    site: &Site,
    start: NaiveDateTime,
    rng: &mut SimpleRng,
) -> anyhow::Result<Dataset> {
    let mut timestamps = Vec::with_capacity(ROWS);
    let mut ghi = Vec::with_capacity(ROWS);
    let mut dni = Vec::with_capacity(ROWS);
    let mut dhi = Vec::with_capacity(ROWS);
    let mut mod_a = Vec::with_capacity(ROWS);
    let mut mod_b = Vec::with_capacity(ROWS);
    let mut tamb = Vec::with_capacity(ROWS);
    let mut tmod_a = Vec::with_capacity(ROWS);
    let mut tmod_b = Vec::with_capacity(ROWS);
    let mut rh = Vec::with_capacity(ROWS);
    let mut ws = Vec::with_capacity(ROWS);
    let mut ws_gust = Vec::with_capacity(ROWS);
    let mut wd = Vec::with_capacity(ROWS);
    let mut cleaning = Vec::with_capacity(ROWS);

    for i in 0..ROWS {
        let ts = start + Duration::minutes(STEP_MINUTES * i as i64);
        timestamps.push(if rng.next_f64() < MISSING_TIMESTAMP_RATE {
            None
        } else {
            Some(ts)
        });

        let minute_of_day = (i as i64 * STEP_MINUTES).rem_euclid(24 * 60);
        let sun = daylight(minute_of_day as f64 / 60.0);
        // Slow cloud cover variation on top of the clear-sky curve.
        let weather = 1.0 - 0.35 * rng.next_f64();

        let mut g = site.peak_ghi * sun * weather + rng.gauss(0.0, 1.5);
        if rng.next_f64() < SPIKE_RATE {
            g = g * 4.0 + 1500.0;
        }
        if rng.next_f64() < INF_RATE {
            g = f64::INFINITY;
        }
        ghi.push(g);

        dni.push((g * 0.72 + rng.gauss(0.0, 6.0)).max(-2.0));
        dhi.push((g * 0.24 + rng.gauss(0.0, 4.0)).max(-2.0));
        mod_a.push(g * 0.96 + rng.gauss(0.0, 4.0));
        mod_b.push(g * 0.93 + rng.gauss(0.0, 4.0));

        let t_ambient = site.base_temp + 6.0 * sun + rng.gauss(0.0, 0.8);
        tamb.push(t_ambient);
        tmod_a.push(t_ambient + site.peak_ghi * sun / 45.0 + rng.gauss(0.0, 1.0));
        tmod_b.push(t_ambient + site.peak_ghi * sun / 50.0 + rng.gauss(0.0, 1.0));

        rh.push((72.0 - 28.0 * sun + rng.gauss(0.0, 5.0)).clamp(5.0, 100.0));

        let speed = rng.gauss(2.6, 1.1).abs();
        ws.push(speed);
        ws_gust.push(speed + rng.gauss(0.9, 0.5).abs());
        wd.push((site.prevailing_wd + rng.gauss(0.0, 35.0)).rem_euclid(360.0));

        cleaning.push(if rng.next_f64() < 0.003 { 1.0 } else { 0.0 });
    }

    for column in [
        &mut ghi, &mut dni, &mut dhi, &mut mod_a, &mut mod_b, &mut tamb, &mut tmod_a,
        &mut tmod_b, &mut rh, &mut ws, &mut ws_gust, &mut wd,
    ] {
        knock_out(column, rng);
    }

    let ds = Dataset::new(vec![
        Column::timestamps(schema::TIMESTAMP, timestamps),
        Column::numeric(schema::GHI, ghi),
        Column::numeric(schema::DNI, dni),
        Column::numeric(schema::DHI, dhi),
        Column::numeric(schema::MOD_A, mod_a),
        Column::numeric("ModB", mod_b),
        Column::numeric(schema::TAMB, tamb),
        Column::numeric(schema::TMOD_A, tmod_a),
        Column::numeric("TModB", tmod_b),
        Column::numeric(schema::RH, rh),
        Column::numeric(schema::WS, ws),
        Column::numeric("WSgust", ws_gust),
        Column::numeric(schema::WD, wd),
        Column::numeric(schema::CLEANING, cleaning),
        Column::text("Comments", vec![None; ROWS]),
    ])?;
    Ok(ds)
}

/// Clear-sky factor over the day, zero at night, one at solar noon.
fn daylight(hour: f64) -> f64 {
    if (6.0..18.0).contains(&hour) {
        (std::f64::consts::PI * (hour - 6.0) / 12.0).sin()
    } else {
        0.0
    }
}

/// Replace a fraction of finite cells with the missing marker.
fn knock_out(values: &mut [f64], rng: &mut SimpleRng) {
    for v in values.iter_mut() {
        if v.is_finite() && rng.next_f64() < MISSING_RATE {
            *v = f64::NAN;
        }
    }
}
