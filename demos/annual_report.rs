use std::path::PathBuf;

use clap::Parser;
use log::info;

use solar_tilt::config::{RunConfig, SimulationConfig, TiltRange};
use solar_tilt::optimize::{
    compare_strategies, optimal_seasonal_schedule, tracking_upper_bound, SeasonCandidates,
    TrackingMode,
};
use solar_tilt::types::SeasonalSchedule;
use solar_tilt::{solar_declination, solar_noon_elevation};

#[derive(Parser)]
#[clap(author, version, about = "Annual clear-sky yield report for a south-facing panel")]
struct Args {
    /// TOML run configuration; defaults to 22.5° N with default model settings
    #[clap(long)]
    config: Option<PathBuf>,
    /// Override the configured latitude (degrees, north positive)
    #[clap(long, allow_hyphen_values = true)]
    latitude: Option<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut run = match &args.config {
        Some(path) => RunConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => RunConfig {
            simulation: SimulationConfig::for_latitude(22.5)?,
            sweep: TiltRange::default(),
            schedule: SeasonalSchedule::default(),
        },
    };
    if let Some(latitude) = args.latitude {
        run.simulation.latitude = latitude;
        run.validate()?;
    }
    let config = &run.simulation;
    info!("Running report for latitude {}°", config.latitude);

    println!("=== Clear-sky Direct Radiation Report ===");
    println!("Latitude: {:.2}°", config.latitude);
    println!();
    println!("--- Sun at solar noon ---");
    for (label, day) in [("Winter solstice", 355), ("Spring equinox", 81), ("Summer solstice", 172)] {
        let decl = solar_declination(day);
        println!(
            "{:<16} day {:>3}: declination {:>6.2}°, elevation {:>5.1}°",
            label,
            day,
            decl,
            solar_noon_elevation(config.latitude, decl)
        );
    }
    println!();

    let comparison = compare_strategies(config, &run.sweep, &run.schedule)?;
    let seasonal = optimal_seasonal_schedule(config, &SeasonCandidates::from_range(&run.sweep)?)?;
    let continuous = tracking_upper_bound(config, TrackingMode::Continuous, &run.sweep)?;

    println!("--- Annual yield (kWh/m²/yr) ---");
    println!(
        "Fixed optimum ({:.1}°):        {:>8.1} (100.0%)",
        comparison.fixed.tilt, comparison.fixed.annual_yield
    );
    println!(
        "Schedule {:?}: {:>8.1} ({:.1}%)",
        comparison.schedule.tilts(),
        comparison.seasonal_yield,
        comparison.percent_of_fixed(comparison.seasonal_yield)
    );
    println!(
        "Best schedule {:?}: {:>8.1} ({:.1}%)",
        seasonal.schedule.tilts(),
        seasonal.annual_yield,
        comparison.percent_of_fixed(seasonal.annual_yield)
    );
    println!(
        "Daily re-tilting:              {:>8.1} ({:.1}%)",
        comparison.daily_tracking_yield,
        comparison.percent_of_fixed(comparison.daily_tracking_yield)
    );
    println!(
        "Two-axis tracking:             {:>8.1} ({:.1}%)",
        continuous,
        comparison.percent_of_fixed(continuous)
    );
    Ok(())
}
