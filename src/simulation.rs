//! Latitude-first entry points using the default model settings.
//!
//! Each call validates its inputs, builds the model from scratch and
//! returns either a complete result or an error.

use crate::config::{SimulationConfig, TiltRange};
use crate::error::Result;
use crate::integrator;
use crate::optimize;
use crate::time_grid;
use crate::types::{SeasonalSchedule, SunTrajectory, SweepPoint};

/// kWh/m²/yr on a south-facing panel at `tilt_degrees`.
pub fn annual_yield(latitude_degrees: f64, tilt_degrees: f64) -> Result<f64> {
    let config = SimulationConfig::for_latitude(latitude_degrees)?;
    integrator::annual_yield(&config, tilt_degrees)
}

pub fn annual_yield_seasonal(latitude_degrees: f64, schedule: &SeasonalSchedule) -> Result<f64> {
    let config = SimulationConfig::for_latitude(latitude_degrees)?;
    integrator::annual_yield_seasonal(&config, schedule)
}

/// Best tilt and its annual yield over `[min, max]` sampled every `step` degrees.
pub fn optimal_fixed_tilt(
    latitude_degrees: f64,
    tilt_range: (f64, f64),
    step: f64,
) -> Result<(f64, f64)> {
    let config = SimulationConfig::for_latitude(latitude_degrees)?;
    let range = TiltRange::new(tilt_range.0, tilt_range.1, step);
    let best = optimize::optimal_fixed_tilt(&config, &range)?;
    Ok((best.tilt, best.annual_yield))
}

pub fn sweep_curve(
    latitude_degrees: f64,
    tilt_range: (f64, f64),
    step: f64,
) -> Result<Vec<SweepPoint>> {
    let config = SimulationConfig::for_latitude(latitude_degrees)?;
    optimize::sweep_curve(&config, &TiltRange::new(tilt_range.0, tilt_range.1, step))
}

pub fn sun_trajectory(latitude_degrees: f64, day_of_year: i32) -> Result<SunTrajectory> {
    let config = SimulationConfig::for_latitude(latitude_degrees)?;
    time_grid::sun_trajectory(&config, day_of_year)
}
