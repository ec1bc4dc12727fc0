//! Exploratory analysis of solar-radiation measurement data.
//!
//! The crate splits into a data layer ([`data`]) shared by the dashboard
//! and the batch tools, chart preparation ([`charts`]), and the egui shell
//! ([`app`], [`state`], [`ui`]).
//!
//! A typical session:
//!
//! 1. `generate_sample` writes synthetic raw CSVs under `data/raw/`;
//! 2. `process_regions` cleans them into `data/processed/`;
//! 3. the `heliograph` binary explores either the raw or the cleaned
//!    files interactively.

pub mod app;
pub mod charts;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
