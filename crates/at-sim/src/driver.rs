//! Simulation runner and result recording.

use crate::error::{SimError, SimResult, conduction};
use crate::flight::FlightProfile;
use at_core::Stage;
use at_core::units::constants::DEFAULT_AMBIENT_K;
use at_loads::{AblationModel, AerothermalLoading, RadiativeLoading};
use at_wall::{ConductionSolver, FaceCondition, StabilityMonitor, WallStack};
use tracing::{debug, info, warn};

/// Simulated time between progress reports (seconds).
const PROGRESS_INTERVAL_S: f64 = 5.0;

/// Thermal condition on the innermost wall face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InnerFace {
    #[default]
    Adiabatic,
    /// Heated by the same net flux as the exposed face (fins).
    Heated,
    /// Held at a fixed temperature (K).
    FixedTemperature(f64),
}

/// Options for simulation runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Start time on the trajectory clock (seconds)
    pub t_start_s: f64,
    /// Fixed time step (seconds)
    pub t_step_s: f64,
    /// End time (seconds); the last trajectory sample when `None`
    pub t_end_s: Option<f64>,
    /// Uniform initial wall temperature (K)
    pub initial_temperature_k: f64,
    pub inner_face: InnerFace,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            t_start_s: 0.0,
            t_step_s: 0.01,
            t_end_s: None,
            initial_temperature_k: DEFAULT_AMBIENT_K,
            inner_face: InnerFace::Adiabatic,
        }
    }
}

/// Progress snapshot handed to the progress callback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimProgress {
    pub step: usize,
    pub steps: usize,
    pub sim_time_s: f64,
    pub t_end_s: f64,
    pub fraction_complete: f64,
}

/// Record of simulation results, one entry per time point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t_s: Vec<f64>,
    pub mach: Vec<f64>,
    /// Altitude after clipping to the atmosphere range (m)
    pub altitude_m: Vec<f64>,
    pub t_inf_k: Vec<f64>,
    pub qbar_pa: Vec<f64>,
    pub re_inf: Vec<f64>,
    pub turbulent: Vec<bool>,
    /// Blowing-corrected convective flux (W/m²)
    pub q_conv: Vec<f64>,
    /// Blowing-corrected film coefficient (W/m²K)
    pub h_coeff: Vec<f64>,
    pub q_rad: Vec<f64>,
    pub q_net: Vec<f64>,
    pub t_edge_k: Vec<f64>,
    pub t_edge_total_k: Vec<f64>,
    pub t_recovery_k: Vec<f64>,
    /// Freestream stagnation temperature (K)
    pub t_total_k: Vec<f64>,
    pub eta: Vec<f64>,
    /// Recession rate, non-positive (m/s)
    pub s_dot: Vec<f64>,
    pub mdot_pyro: Vec<f64>,
    pub ablative_thickness_m: Vec<f64>,
    pub stable: Vec<bool>,
    /// Node coordinates at the start of the run (m)
    pub coordinates_m: Vec<f64>,
    /// `wall_temps[i][j]`: element j at time point i (K)
    pub wall_temps: Vec<Vec<f64>>,
    /// `wall_densities[i][j]`: element j at time point i (kg/m³)
    pub wall_densities: Vec<Vec<f64>>,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.t_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_s.is_empty()
    }

    pub fn surface_temperature(&self) -> Vec<f64> {
        self.wall_temps.iter().map(|row| row[0]).collect()
    }

    /// Temperature history of element `j`.
    pub fn element_history(&self, j: usize) -> Option<Vec<f64>> {
        self.wall_temps.iter().map(|row| row.get(j).copied()).collect()
    }

    pub fn max_wall_temperature(&self) -> f64 {
        self.wall_temps
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Loads evaluated at one time point.
struct StepLoads {
    eta: f64,
    s_dot: f64,
    mdot_pyro: f64,
    h: f64,
    q_conv: f64,
    q_rad: f64,
    stable: bool,
}

/// Wall, trajectory and load models stepped together at a fixed dt.
pub struct TransientSimulation {
    wall: WallStack,
    flight: FlightProfile,
    aero: AerothermalLoading,
    ablation: AblationModel,
    radiation: RadiativeLoading,
    solver: ConductionSolver,
    stability: StabilityMonitor,
    opts: SimOptions,
}

impl TransientSimulation {
    pub fn new(
        wall: WallStack,
        flight: FlightProfile,
        aero: AerothermalLoading,
        radiation: RadiativeLoading,
        opts: SimOptions,
    ) -> SimResult<Self> {
        if !(opts.t_step_s.is_finite() && opts.t_step_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_step must be positive",
            });
        }
        if !(opts.initial_temperature_k.is_finite() && opts.initial_temperature_k > 0.0) {
            return Err(SimError::InvalidArg {
                what: "initial temperature must be positive",
            });
        }
        let t_end = opts.t_end_s.unwrap_or(flight.end_time());
        if !(opts.t_start_s.is_finite() && t_end.is_finite() && t_end > opts.t_start_s) {
            return Err(SimError::InvalidArg {
                what: "t_end must exceed t_start",
            });
        }
        if opts.t_start_s < flight.start_time() || t_end > flight.end_time() {
            return Err(SimError::InvalidArg {
                what: "simulation window must lie inside the trajectory",
            });
        }
        let inner = match opts.inner_face {
            InnerFace::Adiabatic => FaceCondition::Adiabatic,
            InnerFace::Heated => FaceCondition::AppliedFlux,
            InnerFace::FixedTemperature(t) => FaceCondition::FixedTemperature(t),
        };
        let solver =
            ConductionSolver::new(FaceCondition::AppliedFlux, inner).map_err(|_| SimError::InvalidArg {
                what: "fixed inner face temperature must be positive",
            })?;
        Ok(Self {
            wall,
            flight,
            aero,
            ablation: AblationModel,
            radiation,
            solver,
            stability: StabilityMonitor::default(),
            opts,
        })
    }

    pub fn with_stability(mut self, stability: StabilityMonitor) -> Self {
        self.stability = stability;
        self
    }

    pub fn wall(&self) -> &WallStack {
        &self.wall
    }

    pub fn options(&self) -> &SimOptions {
        &self.opts
    }

    fn t_end(&self) -> f64 {
        self.opts.t_end_s.unwrap_or(self.flight.end_time())
    }

    /// t_start + i·dt for every point before t_end.
    pub fn time_vector(&self) -> Vec<f64> {
        let (t0, dt) = (self.opts.t_start_s, self.opts.t_step_s);
        // shave a hair so an exact multiple does not gain a point
        let n = ((self.t_end() - t0) / dt * (1.0 - 1e-12)).ceil() as usize;
        (0..n.max(1)).map(|i| t0 + i as f64 * dt).collect()
    }

    /// Run to completion. The wall keeps its final (receded) state.
    pub fn run(&mut self) -> SimResult<SimRecord> {
        self.run_with_progress(|_| {})
    }

    /// Run to completion, reporting progress every 5 s of simulated time.
    pub fn run_with_progress<F>(&mut self, mut on_progress: F) -> SimResult<SimRecord>
    where
        F: FnMut(&SimProgress),
    {
        let t_vec = self.time_vector();
        let n = t_vec.len();
        let dt = self.opts.t_step_s;
        let t_end = self.t_end();

        // trajectory at every time point, altitude clipped to the atmosphere
        let mut mach = Vec::with_capacity(n);
        let mut altitude = Vec::with_capacity(n);
        let mut clipped = 0usize;
        for &t in &t_vec {
            let (m, alt) = self.flight.sample(t)?;
            let (alt, was_clipped) = self.aero.atmosphere().clip_altitude_m(alt);
            clipped += usize::from(was_clipped);
            mach.push(m);
            altitude.push(alt);
        }
        if clipped > 0 {
            let (lo, hi) = self.aero.atmosphere().altitude_range_m();
            warn!(clipped, lo, hi, "altitude outside the atmosphere model; clipped");
        }

        let mut record = SimRecord {
            coordinates_m: self.wall.coordinates(),
            ..SimRecord::default()
        };
        let mut temps = self
            .solver
            .initial_temperatures(self.wall.len(), self.opts.initial_temperature_k);
        record.wall_temps.push(temps.clone());
        record.wall_densities.push(self.wall.densities());

        info!(
            steps = n,
            elements = self.wall.len(),
            t_start_s = t_vec[0],
            t_end_s = t_end,
            "starting transient run"
        );

        let mut was_stable = true;
        let mut next_report = t_vec[0];
        for i in 0..n {
            let last = i + 1 == n;
            let t_wall = temps[0];

            let heating = self.aero.unblown(t_wall, mach[i], altitude[i])?;
            let ablation = self.ablation.evaluate(&self.wall, &temps, &heating, dt)?;
            let eta = ablation.as_ref().map_or(1.0, |a| a.eta);
            let (h, q_conv) = heating.corrected(eta, t_wall);
            let q_rad =
                self.radiation
                    .q_rad(t_wall, self.wall.exposed().emissivity(), heating.freestream.t_k)?;
            let check = self.stability.check(self.wall.exposed(), h, dt);

            if check.stable != was_stable {
                if check.stable {
                    info!(t_s = t_vec[i], "explicit step back inside the stability limit");
                } else {
                    warn!(
                        t_s = t_vec[i],
                        fourier = check.fourier,
                        biot = check.biot,
                        criterion = check.criterion,
                        "stability criterion not met; reduce the time step or coarsen the wall"
                    );
                }
                was_stable = check.stable;
            }

            record.t_s.push(t_vec[i]);
            record.mach.push(mach[i]);
            record.altitude_m.push(altitude[i]);
            record.ablative_thickness_m.push(self.wall.ablative_thickness());
            push_loads(
                &mut record,
                &heating,
                StepLoads {
                    eta,
                    s_dot: ablation.as_ref().map_or(0.0, |a| a.s_dot),
                    mdot_pyro: ablation.as_ref().map_or(0.0, |a| a.mdot_pyro),
                    h,
                    q_conv,
                    q_rad,
                    stable: check.stable,
                },
            );

            if last {
                break;
            }

            if let Some(step) = &ablation {
                step.apply(&mut self.wall)?;
            }
            let q_net = q_conv + q_rad;
            let q_inner = match self.opts.inner_face {
                InnerFace::Heated => q_net,
                InnerFace::Adiabatic | InnerFace::FixedTemperature(_) => 0.0,
            };
            temps = self
                .solver
                .step(&self.wall, &temps, q_net, q_inner, dt)
                .map_err(conduction)?;
            self.wall
                .update_thermal_props(&temps)
                .map_err(|source| SimError::Wall {
                    stage: Stage::MaterialLookup,
                    source,
                })?;
            record.wall_temps.push(temps.clone());
            record.wall_densities.push(self.wall.densities());

            if t_vec[i] >= next_report {
                let progress = SimProgress {
                    step: i,
                    steps: n,
                    sim_time_s: t_vec[i],
                    t_end_s: t_end,
                    fraction_complete: (i + 1) as f64 / n as f64,
                };
                debug!(sim_time_s = t_vec[i], step = i, "transient progress");
                on_progress(&progress);
                next_report += PROGRESS_INTERVAL_S;
            }
        }

        on_progress(&SimProgress {
            step: n - 1,
            steps: n,
            sim_time_s: t_vec[n - 1],
            t_end_s: t_end,
            fraction_complete: 1.0,
        });
        info!(
            steps = n,
            max_wall_temperature_k = record.max_wall_temperature(),
            "transient run complete"
        );
        Ok(record)
    }
}

fn push_loads(record: &mut SimRecord, heating: &at_loads::ConvectiveHeating, loads: StepLoads) {
    record.t_inf_k.push(heating.freestream.t_k);
    record.qbar_pa.push(heating.qbar_pa);
    record.re_inf.push(heating.re_inf);
    record.turbulent.push(heating.boundary_layer.is_turbulent());
    record.t_edge_k.push(heating.t_edge_k);
    record.t_edge_total_k.push(heating.t_edge_total_k);
    record.t_recovery_k.push(heating.t_recovery_k);
    record.t_total_k.push(heating.t_total_k);
    record.q_conv.push(loads.q_conv);
    record.h_coeff.push(loads.h);
    record.q_rad.push(loads.q_rad);
    record.q_net.push(loads.q_conv + loads.q_rad);
    record.eta.push(loads.eta);
    record.s_dot.push(loads.s_dot);
    record.mdot_pyro.push(loads.mdot_pyro);
    record.stable.push(loads.stable);
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_gas::{AirModel, StandardAtmosphere};
    use at_loads::AerothermalConfig;
    use at_materials::MaterialDatabase;
    use at_wall::Layer;
    use std::sync::Arc;

    fn sim(opts: SimOptions) -> SimResult<TransientSimulation> {
        let wall = WallStack::from_layers(
            &MaterialDatabase::builtin(),
            &[Layer::new("ALU6061", 0.02, 4)],
            290.0,
        )
        .unwrap();
        let flight =
            FlightProfile::new(vec![0.0, 10.0], vec![1.5, 2.5], vec![1000.0, 6000.0]).unwrap();
        let aero = AerothermalLoading::new(
            AerothermalConfig::flat_plate(0.5, 0.05),
            Arc::new(AirModel::default()),
            Arc::new(StandardAtmosphere),
        )
        .unwrap();
        TransientSimulation::new(wall, flight, aero, RadiativeLoading::default(), opts)
    }

    #[test]
    fn time_vector_stops_short_of_t_end() {
        let s = sim(SimOptions {
            t_step_s: 0.1,
            t_end_s: Some(1.0),
            ..SimOptions::default()
        })
        .unwrap();
        let t = s.time_vector();
        assert_eq!(t.len(), 10);
        assert!((t[9] - 0.9).abs() < 1e-12);

        let s = sim(SimOptions {
            t_start_s: 2.0,
            t_step_s: 0.3,
            t_end_s: Some(3.0),
            ..SimOptions::default()
        })
        .unwrap();
        assert_eq!(s.time_vector().len(), 4);
    }

    #[test]
    fn options_are_validated() {
        let bad = [
            SimOptions {
                t_step_s: 0.0,
                ..SimOptions::default()
            },
            SimOptions {
                initial_temperature_k: -5.0,
                ..SimOptions::default()
            },
            SimOptions {
                t_start_s: 5.0,
                t_end_s: Some(5.0),
                ..SimOptions::default()
            },
            SimOptions {
                t_end_s: Some(20.0),
                ..SimOptions::default()
            },
            SimOptions {
                inner_face: InnerFace::FixedTemperature(0.0),
                ..SimOptions::default()
            },
        ];
        for opts in bad {
            assert!(matches!(sim(opts), Err(SimError::InvalidArg { .. })));
        }
    }

    #[test]
    fn every_series_has_one_entry_per_time_point() {
        let mut s = sim(SimOptions {
            t_step_s: 0.05,
            t_end_s: Some(2.0),
            ..SimOptions::default()
        })
        .unwrap();
        let r = s.run().unwrap();
        let n = r.len();
        assert_eq!(n, 40);
        for len in [
            r.mach.len(),
            r.q_conv.len(),
            r.q_rad.len(),
            r.q_net.len(),
            r.h_coeff.len(),
            r.eta.len(),
            r.stable.len(),
            r.wall_temps.len(),
            r.wall_densities.len(),
        ] {
            assert_eq!(len, n);
        }
        assert!(r.wall_temps[0].iter().all(|t| *t == 290.0));
        assert!(r.eta.iter().all(|e| *e == 1.0));
        assert!(r.stable.iter().all(|s| *s));
    }

    #[test]
    fn custom_stability_limit_flags_every_step() {
        let opts = SimOptions {
            t_step_s: 0.1,
            t_end_s: Some(1.0),
            ..SimOptions::default()
        };
        let r = sim(opts.clone()).unwrap().run().unwrap();
        assert!(r.stable.iter().all(|s| *s));

        // F0 of a 5 mm aluminium element at dt = 0.1 s is about 0.28
        let mut strict = sim(opts)
            .unwrap()
            .with_stability(StabilityMonitor { limit: 0.1 });
        let r = strict.run().unwrap();
        assert_eq!(r.stable.len(), 10);
        assert!(r.stable.iter().all(|s| !*s));
    }

    #[test]
    fn progress_is_reported_at_the_end() {
        let mut s = sim(SimOptions {
            t_step_s: 0.1,
            ..SimOptions::default()
        })
        .unwrap();
        let mut reports = Vec::new();
        s.run_with_progress(|p| reports.push(p.clone())).unwrap();
        // t = 0 and t = 5 s, then completion
        assert_eq!(reports.len(), 3);
        assert_eq!(reports.last().unwrap().fraction_complete, 1.0);
    }
}
