//! Thick aluminium wall against the closed-form semi-infinite solutions.

use at_materials::MaterialDatabase;
use at_wall::{ConductionSolver, FaceCondition, Layer, WallStack};

const RHO: f64 = 2700.0;
const CP: f64 = 896.0;
const K: f64 = 167.0;
const T_INIT: f64 = 300.0;
const DT: f64 = 0.002;
const T_END: f64 = 5.0;

/// Abramowitz & Stegun 7.1.26, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592 + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

fn thick_wall() -> WallStack {
    WallStack::from_layers(
        &MaterialDatabase::builtin(),
        &[Layer::new("ALU6061", 0.3, 300)],
        T_INIT,
    )
    .unwrap()
}

fn march(solver: &ConductionSolver, wall: &WallStack, q: f64) -> Vec<f64> {
    let mut temps = solver.initial_temperatures(wall.len(), T_INIT);
    let steps = (T_END / DT).round() as usize;
    for _ in 0..steps {
        temps = solver.step(wall, &temps, q, 0.0, DT).unwrap();
    }
    temps
}

#[test]
fn fixed_surface_temperature_matches_erf_profile() {
    let t_surface = 350.0;
    let wall = thick_wall();
    let dy = wall.element(0).unwrap().thickness();
    let solver =
        ConductionSolver::new(FaceCondition::FixedTemperature(t_surface), FaceCondition::Adiabatic)
            .unwrap();
    let temps = march(&solver, &wall, 0.0);

    let alpha = K / (RHO * CP);
    // surface node sits on the face, the rest follow at dy spacing
    for j in [2, 5, 10, 20, 40] {
        let x = j as f64 * dy;
        let exact = (T_INIT - t_surface) * erf(x / (2.0 * (alpha * T_END).sqrt())) + t_surface;
        assert!(
            (temps[j] - exact).abs() < 0.05,
            "x={x}: {} vs {exact}",
            temps[j]
        );
    }

    // the headline point: x = 0.01 m
    let exact = (T_INIT - t_surface) * erf(0.01 / (2.0 * (alpha * T_END).sqrt())) + t_surface;
    assert!((exact - 335.17).abs() < 0.01);
    assert!((temps[10] - exact).abs() < 0.05);
}

#[test]
fn constant_surface_flux_matches_closed_form() {
    let q = 1.0e6;
    let wall = thick_wall();
    let dy = wall.element(0).unwrap().thickness();
    let temps = march(&ConductionSolver::default(), &wall, q);

    let alpha = K / (RHO * CP);
    let coords = wall.coordinates();
    for j in [0, 2, 5, 10, 20, 40] {
        let x = coords[j];
        assert!((x - (j as f64 + 0.5) * dy).abs() < 1e-12);
        let z = x / (2.0 * (alpha * T_END).sqrt());
        let rise = 2.0 * q * (alpha * T_END / std::f64::consts::PI).sqrt() / K * (-z * z).exp()
            - q * x / K * (1.0 - erf(z));
        let simulated = temps[j] - T_INIT;
        assert!(
            ((simulated - rise) / rise).abs() < 0.01,
            "x={x}: rise {simulated} vs {rise}"
        );
    }
}

#[test]
fn far_field_is_undisturbed() {
    let wall = thick_wall();
    let temps = march(&ConductionSolver::default(), &wall, 1.0e6);
    assert!((temps[wall.len() - 1] - T_INIT).abs() < 1e-9);
}
