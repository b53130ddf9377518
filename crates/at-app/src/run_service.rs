//! Run execution, export and parallel sweeps.

use crate::compile::compile_run;
use crate::error::{AppError, AppResult};
use at_project::RunConfig;
use at_sim::{SimRecord, write_csv_file};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Headline numbers of a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub steps: usize,
    pub t_end_s: f64,
    pub max_surface_temperature_k: f64,
    pub max_wall_temperature_k: f64,
    pub max_q_net_wpm2: f64,
    /// Ablative thickness lost over the run (m)
    pub recession_m: f64,
    pub unstable_steps: usize,
    pub turbulent_steps: usize,
    pub elapsed_s: f64,
}

pub struct RunResponse {
    pub record: SimRecord,
    pub summary: RunSummary,
}

/// One point of an x-location sweep.
pub struct SweepPoint {
    pub x_location_m: f64,
    pub record: SimRecord,
}

/// Load and validate a config; also returns the directory its relative
/// paths resolve against.
pub fn load_config(path: &Path) -> AppResult<(RunConfig, PathBuf)> {
    let config = at_project::load(path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((config, base_dir))
}

pub fn run_config(config: &RunConfig, base_dir: &Path) -> AppResult<SimRecord> {
    let mut sim = compile_run(config, base_dir)?;
    Ok(sim.run()?)
}

pub fn summarize(name: &str, record: &SimRecord, elapsed_s: f64) -> RunSummary {
    let max = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let thickness = &record.ablative_thickness_m;
    RunSummary {
        name: name.to_string(),
        steps: record.len(),
        t_end_s: record.t_s.last().copied().unwrap_or(0.0),
        max_surface_temperature_k: max(&record.surface_temperature()),
        max_wall_temperature_k: record.max_wall_temperature(),
        max_q_net_wpm2: max(&record.q_net),
        recession_m: match (thickness.first(), thickness.last()) {
            (Some(first), Some(last)) => first - last,
            _ => 0.0,
        },
        unstable_steps: record.stable.iter().filter(|s| !**s).count(),
        turbulent_steps: record.turbulent.iter().filter(|t| **t).count(),
        elapsed_s,
    }
}

/// Load, run and optionally export one configuration file.
pub fn run_file(path: &Path, output: Option<&Path>) -> AppResult<RunResponse> {
    let start = Instant::now();
    let (config, base_dir) = load_config(path)?;
    info!(name = %config.name, path = %path.display(), "running configuration");

    let record = run_config(&config, &base_dir)?;
    if let Some(out) = output {
        write_csv_file(&record, out)?;
        info!(path = %out.display(), rows = record.len(), "wrote results");
    }
    let summary = summarize(&config.name, &record, start.elapsed().as_secs_f64());
    Ok(RunResponse { record, summary })
}

/// Run the same configuration at several x locations in parallel.
///
/// Results come back in the order of `x_locations_m`.
pub fn run_x_sweep(
    config: &RunConfig,
    base_dir: &Path,
    x_locations_m: &[f64],
) -> AppResult<Vec<SweepPoint>> {
    if x_locations_m.is_empty() {
        return Err(AppError::InvalidInput(
            "sweep needs at least one x location".to_string(),
        ));
    }
    info!(points = x_locations_m.len(), "starting x-location sweep");
    x_locations_m
        .par_iter()
        .map(|&x| -> AppResult<SweepPoint> {
            let mut point = config.clone();
            point.loading.x_location_m = x;
            let record = run_config(&point, base_dir)?;
            Ok(SweepPoint {
                x_location_m: x,
                record,
            })
        })
        .collect()
}
