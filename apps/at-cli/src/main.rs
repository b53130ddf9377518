use at_app::{AppError, AppResult, compile_run, load_config, material_database, run_x_sweep, summarize};
use at_sim::{SimProgress, write_csv_file};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "at-cli")]
#[command(about = "Aerotherm CLI - transient aerothermal wall heating", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration and check that it compiles
    Validate {
        /// Path to the run configuration (YAML, or JSON by extension)
        config_path: PathBuf,
    },
    /// Run a simulation
    Run {
        /// Path to the run configuration
        config_path: PathBuf,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the configuration at several x locations in parallel
    Sweep {
        /// Path to the run configuration
        config_path: PathBuf,
        /// Distances from the leading edge in metres
        #[arg(long = "x", num_args = 1.., required = true)]
        x_locations: Vec<f64>,
        /// Directory for one CSV per x location
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// List the available materials
    Materials {
        /// Extra material YAML files
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            output,
        } => cmd_run(&config_path, output.as_deref()),
        Commands::Sweep {
            config_path,
            x_locations,
            out_dir,
        } => cmd_sweep(&config_path, &x_locations, &out_dir),
        Commands::Materials { files } => cmd_materials(&files),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let (config, base_dir) = load_config(config_path)?;
    let sim = compile_run(&config, &base_dir)?;
    println!("✓ Configuration is valid");
    println!("  Name: {}", config.name);
    println!("  Wall elements: {}", sim.wall().len());
    println!("  Time points: {}", sim.time_vector().len());
    Ok(())
}

fn cmd_run(config_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let start = Instant::now();
    let (config, base_dir) = load_config(config_path)?;
    println!("Running: {}", config.name);
    println!(
        "  dt = {:.4} s, {} wall elements",
        config.time.t_step_s,
        config.wall.layers.iter().map(|l| l.elements).sum::<usize>()
    );

    let mut sim = compile_run(&config, &base_dir)?;
    let record = sim.run_with_progress(render_progress)?;
    clear_progress_line();

    if let Some(path) = output {
        write_csv_file(&record, path)?;
        println!("✓ Wrote {} rows to {}", record.len(), path.display());
    }

    let s = summarize(&config.name, &record, start.elapsed().as_secs_f64());
    println!("✓ Simulation completed in {:.2} s", s.elapsed_s);
    println!("  Time points: {}", s.steps);
    println!("  Max surface temperature: {:.1} K", s.max_surface_temperature_k);
    println!("  Max wall temperature: {:.1} K", s.max_wall_temperature_k);
    println!("  Max net heat flux: {:.3e} W/m²", s.max_q_net_wpm2);
    println!("  Turbulent steps: {}", s.turbulent_steps);
    if s.recession_m > 0.0 {
        println!("  Recession: {:.3} mm", s.recession_m * 1e3);
    }
    if s.unstable_steps > 0 {
        println!(
            "  Warning: {} steps outside the explicit stability limit",
            s.unstable_steps
        );
    }
    Ok(())
}

fn cmd_sweep(config_path: &Path, x_locations: &[f64], out_dir: &Path) -> AppResult<()> {
    let (config, base_dir) = load_config(config_path)?;
    println!(
        "Sweeping {} over {} x locations",
        config.name,
        x_locations.len()
    );
    std::fs::create_dir_all(out_dir)?;

    let points = run_x_sweep(&config, &base_dir, x_locations)?;
    for point in &points {
        let path = out_dir.join(format!("x_{:.4}m.csv", point.x_location_m));
        write_csv_file(&point.record, &path)?;
        let peak = point.record.max_wall_temperature();
        println!(
            "  x = {:.4} m: peak {:.1} K -> {}",
            point.x_location_m,
            peak,
            path.display()
        );
    }
    println!("✓ Sweep complete");
    Ok(())
}

fn cmd_materials(files: &[PathBuf]) -> AppResult<()> {
    let cwd = std::env::current_dir().map_err(AppError::Io)?;
    let db = material_database(files, &cwd)?;

    let mut solids: Vec<&str> = db.solid_names().collect();
    solids.sort_unstable();
    let mut ablatives: Vec<&str> = db.ablative_names().collect();
    ablatives.sort_unstable();

    println!("Solid materials:");
    for name in solids {
        println!("  {}", name);
    }
    println!("Ablative materials:");
    for name in ablatives {
        println!("  {}", name);
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_progress(p: &SimProgress) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    print!(
        "\r[{}{}] {:>6.2}%  t={:.1}/{:.1}s  step={}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        p.fraction_complete * 100.0,
        p.sim_time_s,
        p.t_end_s,
        p.step
    );
    let _ = io::stdout().flush();
}
