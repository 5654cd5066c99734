//! Daily and annual integration of direct radiation on a tilted panel
//!
//! Daily yields are in Wh/m²/day: each quadrature weight is an hour-angle
//! interval divided by 15°/h, so W/m² × h = Wh/m². Annual yields are the
//! day-ordered sum of daily yields divided by `WH_PER_KWH`, in kWh/m²/yr.

use log::debug;

use crate::angles;
use crate::config::{SeasonBoundaries, SimulationConfig};
use crate::error::Result;
use crate::maybe_rayon::*;
use crate::radiation::{self, IncidenceTerms};
use crate::time_grid::{self, HourAngleGrid};
use crate::types::{check_tilt, Season, SeasonalSchedule};

pub const WH_PER_KWH: f64 = 1000.0;

pub fn wh_to_kwh(wh: f64) -> f64 {
    wh / WH_PER_KWH
}

/// Tilt-independent state of one quadrature node.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IrradianceSample {
    weight_hours: f64,
    /// Beam normal irradiance, W/m²; zero at or below the horizon.
    beam_normal: f64,
    incidence: IncidenceTerms,
}

/// Sun geometry and beam irradiance sampled over one day's daylight.
#[derive(Debug, Clone, PartialEq)]
pub struct DaylightProfile {
    pub day_of_year: i32,
    pub declination: f64,
    pub sunset_hour_angle: f64,
    samples: Vec<IrradianceSample>,
}

impl DaylightProfile {
    /// `config` is assumed valid and `day_of_year` within the year.
    fn build(config: &SimulationConfig, day_of_year: i32) -> Self {
        let grid = HourAngleGrid::for_day(config, day_of_year);
        let samples = grid
            .samples
            .iter()
            .map(|node| {
                let pos = angles::sun_position(config.latitude, day_of_year, node.hour_angle);
                IrradianceSample {
                    weight_hours: node.weight_hours,
                    beam_normal: config.atmosphere.beam_normal(pos.elevation),
                    incidence: IncidenceTerms::new(pos.elevation, pos.azimuth, config.panel_azimuth),
                }
            })
            .collect();

        Self {
            day_of_year,
            declination: angles::solar_declination(day_of_year),
            sunset_hour_angle: grid.sunset_hour_angle,
            samples,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Wh/m² on a panel at `tilt` degrees. Nodes with the sun behind the
    /// panel or below the horizon contribute nothing.
    pub fn yield_for_tilt(&self, tilt: f64) -> f64 {
        let tilt = radiation::tilt_sin_cos(tilt);
        self.samples
            .iter()
            .map(|s| s.weight_hours * s.beam_normal * s.incidence.cosine(tilt))
            .sum()
    }

    /// Wh/m² on a two-axis tracker that always faces the sun.
    pub fn tracking_yield(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.weight_hours * s.beam_normal)
            .sum()
    }
}

pub fn daylight_profile(config: &SimulationConfig, day_of_year: i32) -> Result<DaylightProfile> {
    config.validate()?;
    let day = time_grid::check_day_of_year(day_of_year)?;
    Ok(DaylightProfile::build(config, day))
}

/// Daylight profiles for every day of the year, in day order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearProfile {
    pub seasons: SeasonBoundaries,
    pub days: Vec<DaylightProfile>,
}

impl YearProfile {
    pub fn build(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seasons = config.seasons.resolve()?;
        let days: Vec<DaylightProfile> = time_grid::days_of_year()
            .into_par_iter()
            .map(|day| DaylightProfile::build(config, day))
            .collect();

        debug!(
            "Built year profile at latitude {}°: {} daylight samples",
            config.latitude,
            days.iter().map(|d| d.sample_count()).sum::<usize>()
        );
        Ok(Self { seasons, days })
    }

    pub fn season_of(&self, day_of_year: i32) -> Season {
        self.seasons.season_of(day_of_year)
    }

    /// kWh/m²/yr for a tilt that has already been validated.
    pub fn annual_yield(&self, tilt: f64) -> f64 {
        wh_to_kwh(self.days.iter().map(|d| d.yield_for_tilt(tilt)).sum())
    }

    /// kWh/m²/yr with each day using its season's tilt.
    pub fn annual_yield_seasonal(&self, schedule: &SeasonalSchedule) -> f64 {
        wh_to_kwh(
            self.days
                .iter()
                .map(|d| d.yield_for_tilt(schedule.tilt_for(self.season_of(d.day_of_year))))
                .sum(),
        )
    }

    /// kWh/m² collected during `season` at a fixed tilt.
    pub fn season_yield(&self, season: Season, tilt: f64) -> f64 {
        wh_to_kwh(
            self.days
                .iter()
                .filter(|d| self.season_of(d.day_of_year) == season)
                .map(|d| d.yield_for_tilt(tilt))
                .sum(),
        )
    }

    pub fn continuous_tracking_yield(&self) -> f64 {
        wh_to_kwh(self.days.iter().map(|d| d.tracking_yield()).sum())
    }
}

pub fn daily_yield(config: &SimulationConfig, day_of_year: i32, tilt: f64) -> Result<f64> {
    let tilt = check_tilt(tilt)?;
    Ok(daylight_profile(config, day_of_year)?.yield_for_tilt(tilt))
}

pub fn annual_yield(config: &SimulationConfig, tilt: f64) -> Result<f64> {
    let tilt = check_tilt(tilt)?;
    Ok(YearProfile::build(config)?.annual_yield(tilt))
}

pub fn annual_yield_seasonal(config: &SimulationConfig, schedule: &SeasonalSchedule) -> Result<f64> {
    schedule.validate()?;
    Ok(YearProfile::build(config)?.annual_yield_seasonal(schedule))
}
