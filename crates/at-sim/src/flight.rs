//! Flight trajectory samples.

use crate::error::{SimError, SimResult};
use at_core::numeric::{interp_clamped, is_strictly_increasing};
use at_core::units::constants::FT_TO_M;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Replaces a Mach number of exactly zero.
pub const MACH_FLOOR: f64 = 0.001;

/// One row of a RASAero flight export; other columns are ignored.
#[derive(Debug, Deserialize)]
struct RasAeroRow {
    #[serde(rename = "Time (sec)")]
    time_s: f64,
    #[serde(rename = "Mach Number")]
    mach: f64,
    #[serde(rename = "Altitude (ft)")]
    altitude_ft: f64,
}

/// Mach and altitude against time, linearly interpolated.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightProfile {
    time_s: Vec<f64>,
    mach: Vec<f64>,
    altitude_m: Vec<f64>,
}

impl FlightProfile {
    pub fn new(time_s: Vec<f64>, mach: Vec<f64>, altitude_m: Vec<f64>) -> SimResult<Self> {
        if time_s.is_empty() {
            return Err(SimError::Trajectory {
                what: "no samples".into(),
            });
        }
        if mach.len() != time_s.len() || altitude_m.len() != time_s.len() {
            return Err(SimError::Trajectory {
                what: format!(
                    "column lengths differ (time {}, mach {}, altitude {})",
                    time_s.len(),
                    mach.len(),
                    altitude_m.len()
                ),
            });
        }
        if time_s.iter().chain(&mach).chain(&altitude_m).any(|v| !v.is_finite()) {
            return Err(SimError::Trajectory {
                what: "non-finite sample".into(),
            });
        }
        if !is_strictly_increasing(&time_s) {
            return Err(SimError::Trajectory {
                what: "time must be strictly increasing".into(),
            });
        }
        if let Some(m) = mach.iter().find(|m| **m < 0.0) {
            return Err(SimError::Trajectory {
                what: format!("negative Mach number {m}"),
            });
        }
        let mach = mach
            .into_iter()
            .map(|m| if m == 0.0 { MACH_FLOOR } else { m })
            .collect();
        Ok(Self {
            time_s,
            mach,
            altitude_m,
        })
    }

    /// Parse a RASAero-style CSV: `Time (sec)`, `Mach Number`, `Altitude (ft)`.
    pub fn from_rasaero_csv<R: Read>(rdr: R) -> SimResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let (mut time, mut mach, mut alt) = (Vec::new(), Vec::new(), Vec::new());
        for result in rdr.deserialize() {
            let row: RasAeroRow = result?;
            time.push(row.time_s);
            mach.push(row.mach);
            alt.push(row.altitude_ft * FT_TO_M);
        }
        Self::new(time, mach, alt)
    }

    pub fn from_rasaero_file(path: &Path) -> SimResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_rasaero_csv(file)
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn start_time(&self) -> f64 {
        self.time_s[0]
    }

    pub fn end_time(&self) -> f64 {
        self.time_s[self.time_s.len() - 1]
    }

    pub fn times(&self) -> &[f64] {
        &self.time_s
    }

    /// (Mach, altitude [m]) at time `t_s`.
    pub fn sample(&self, t_s: f64) -> SimResult<(f64, f64)> {
        if !t_s.is_finite() || t_s < self.start_time() || t_s > self.end_time() {
            return Err(SimError::Trajectory {
                what: format!(
                    "time {t_s} s outside trajectory [{}, {}] s",
                    self.start_time(),
                    self.end_time()
                ),
            });
        }
        let bad_table = |_| SimError::InvalidArg {
            what: "trajectory interpolation table",
        };
        let mach = interp_clamped(&self.time_s, &self.mach, t_s).map_err(bad_table)?;
        let alt = interp_clamped(&self.time_s, &self.altitude_m, t_s).map_err(bad_table)?;
        Ok((mach, alt))
    }
}
