use at_app::{AppError, compile_run, load_config, run_file, run_x_sweep};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn demos_compile() {
    for name in [
        "steel_fin.yaml",
        "pica_nosecone.yaml",
        "stagnation_point.json",
    ] {
        let (config, base_dir) = load_config(&demo(name)).unwrap();
        let sim = compile_run(&config, &base_dir);
        assert!(sim.is_ok(), "{name}: {:?}", sim.err());
    }
}

#[test]
fn steel_fin_runs_and_exports() {
    let out = std::env::temp_dir().join("at_app_steel_fin.csv");
    let response = run_file(&demo("steel_fin.yaml"), Some(&out)).unwrap();

    let s = &response.summary;
    assert_eq!(s.steps, 2500);
    assert_eq!(s.unstable_steps, 0);
    assert!(s.max_surface_temperature_k > 295.0);
    assert_eq!(s.recession_m, 0.0);

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), response.record.len() + 1);
    assert!(csv.lines().next().unwrap().contains("T_wall:y="));
}

#[test]
fn sweep_returns_points_in_request_order() {
    let (mut config, base_dir) = load_config(&demo("steel_fin.yaml")).unwrap();
    config.time.t_end_s = Some(6.0);
    let xs = [0.5, 0.05, 0.2];
    let points = run_x_sweep(&config, &base_dir, &xs).unwrap();
    assert_eq!(points.len(), 3);
    for (p, x) in points.iter().zip(xs) {
        assert_eq!(p.x_location_m, x);
        assert_eq!(p.record.len(), 600);
        assert_eq!(p.record.t_s, points[0].record.t_s);
    }
}

#[test]
fn empty_sweep_is_invalid_input() {
    let (config, base_dir) = load_config(&demo("steel_fin.yaml")).unwrap();
    assert!(matches!(
        run_x_sweep(&config, &base_dir, &[]),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn missing_config_is_a_project_error() {
    assert!(matches!(
        load_config(&demo("no_such_config.yaml")),
        Err(AppError::Project(_))
    ));
}
