//! Run configuration
//!
//! A run is described by a TOML document:
//!
//! ```toml
//! [simulation]
//! latitude = 22.5
//! hour_angle_step = 1.0
//!
//! [simulation.atmosphere]
//! transmittance = 0.7
//! air_mass = "plane_parallel"
//!
//! [simulation.seasons]
//! spring_start = [3, 1]
//! summer_start = [6, 1]
//! fall_start = [9, 1]
//! winter_start = [12, 1]
//!
//! [sweep]
//! min = 0.0
//! max = 90.0
//! step = 1.0
//!
//! [schedule]
//! spring = 15.0
//! summer = 0.0
//! fall = 30.0
//! winter = 45.0
//! ```

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::radiation::{Atmosphere, SOUTH_AZIMUTH};
use crate::time_grid;
use crate::types::{check_latitude, Season, SeasonalSchedule};

/// Default quadrature step in degrees of hour angle (4 minutes).
pub const HOUR_ANGLE_STEP: f64 = 1.0;
/// Finest accepted quadrature step (2.4 seconds of time).
pub const MIN_HOUR_ANGLE_STEP: f64 = 0.01;
/// Upper bound on the number of tilts a sweep may evaluate.
pub const MAX_TILT_CANDIDATES: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub latitude: f64,
    #[serde(default = "hour_angle_step_default")]
    pub hour_angle_step: f64,
    #[serde(default = "panel_azimuth_default")]
    pub panel_azimuth: f64,
    #[serde(default)]
    pub atmosphere: Atmosphere,
    #[serde(default)]
    pub seasons: SeasonCalendar,
}

fn hour_angle_step_default() -> f64 {
    HOUR_ANGLE_STEP
}

fn panel_azimuth_default() -> f64 {
    SOUTH_AZIMUTH
}

impl SimulationConfig {
    /// Default model settings for a latitude.
    pub fn for_latitude(latitude: f64) -> Result<Self> {
        let config = Self {
            latitude,
            hour_angle_step: HOUR_ANGLE_STEP,
            panel_azimuth: SOUTH_AZIMUTH,
            atmosphere: Atmosphere::default(),
            seasons: SeasonCalendar::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_latitude(self.latitude)?;
        if !(MIN_HOUR_ANGLE_STEP..=180.0).contains(&self.hour_angle_step) {
            return Err(Error::invalid_configuration(
                "hour_angle_step",
                self.hour_angle_step,
                format!("must lie in [{}, 180] degrees", MIN_HOUR_ANGLE_STEP),
            ));
        }
        if !(0.0..360.0).contains(&self.panel_azimuth) {
            return Err(Error::invalid_configuration(
                "panel_azimuth",
                self.panel_azimuth,
                "must lie in [0, 360) degrees",
            ));
        }
        self.atmosphere.validate()?;
        self.seasons.resolve()?;
        Ok(())
    }
}

/// Calendar start date of each season as `[month, day]`.
///
/// Winter runs from its start date to the end of the year and continues
/// from 1 January until the day before spring starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonCalendar {
    pub spring_start: (u32, u32),
    pub summer_start: (u32, u32),
    #[serde(alias = "autumn_start")]
    pub fall_start: (u32, u32),
    pub winter_start: (u32, u32),
}

impl SeasonCalendar {
    /// Seasons by whole months: Mar-May, Jun-Aug, Sep-Nov, Dec-Feb.
    pub fn meteorological() -> Self {
        Self {
            spring_start: (3, 1),
            summer_start: (6, 1),
            fall_start: (9, 1),
            winter_start: (12, 1),
        }
    }

    /// Seasons starting at the equinoxes and solstices.
    pub fn astronomical() -> Self {
        Self {
            spring_start: (3, 21),
            summer_start: (6, 21),
            fall_start: (9, 23),
            winter_start: (12, 21),
        }
    }

    pub fn resolve(&self) -> Result<SeasonBoundaries> {
        let mut starts = [0; 4];
        for (slot, (month, day)) in starts.iter_mut().zip([
            self.spring_start,
            self.summer_start,
            self.fall_start,
            self.winter_start,
        ]) {
            *slot = time_grid::day_of_year(month, day)?;
        }

        if !starts.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::invalid_configuration(
                "seasons",
                format!("{:?}", starts),
                "season start days must be strictly increasing from spring to winter",
            ));
        }
        Ok(SeasonBoundaries { starts })
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self::meteorological()
    }
}

/// Season start days of year, resolved from a `SeasonCalendar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonBoundaries {
    pub starts: [i32; 4],
}

impl SeasonBoundaries {
    pub fn season_of(&self, day_of_year: i32) -> Season {
        Season::ALL
            .iter()
            .rev()
            .zip(self.starts.iter().rev())
            .find(|&(_, &start)| day_of_year >= start)
            .map(|(&season, _)| season)
            .unwrap_or(Season::Winter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    #[default]
    Ascending,
    Descending,
}

/// Discretized tilt candidates `min, min + step, ..., <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiltRange {
    #[serde(default = "tilt_min_default")]
    pub min: f64,
    #[serde(default = "tilt_max_default")]
    pub max: f64,
    #[serde(default = "tilt_step_default")]
    pub step: f64,
    #[serde(default)]
    pub order: ScanOrder,
}

fn tilt_min_default() -> f64 {
    0.0
}

fn tilt_max_default() -> f64 {
    90.0
}

fn tilt_step_default() -> f64 {
    1.0
}

impl Default for TiltRange {
    fn default() -> Self {
        Self {
            min: tilt_min_default(),
            max: tilt_max_default(),
            step: tilt_step_default(),
            order: ScanOrder::Ascending,
        }
    }
}

impl TiltRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            order: ScanOrder::Ascending,
        }
    }

    pub fn descending(self) -> Self {
        Self {
            order: ScanOrder::Descending,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::invalid_configuration(
                "sweep.step",
                self.step,
                "must be a positive number of degrees",
            ));
        }
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(Error::invalid_configuration(
                "sweep",
                format!("[{}, {}]", self.min, self.max),
                "tilt range is empty",
            ));
        }
        if self.min < 0.0 || self.max > 90.0 {
            return Err(Error::invalid_configuration(
                "sweep",
                format!("[{}, {}]", self.min, self.max),
                "tilts must lie in [0, 90] degrees",
            ));
        }
        if self.candidate_count_f64() > MAX_TILT_CANDIDATES as f64 {
            return Err(Error::invalid_configuration(
                "sweep.step",
                self.step,
                format!("more than {} tilts between min and max", MAX_TILT_CANDIDATES),
            ));
        }
        Ok(())
    }

    // Small slack so that e.g. 0..90 step 0.1 still reaches 90.
    fn candidate_count_f64(&self) -> f64 {
        ((self.max - self.min) / self.step + 1e-9).floor() + 1.0
    }

    /// Candidate tilts in scan order.
    pub fn tilts(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let count = self.candidate_count_f64() as usize;
        let mut tilts: Vec<f64> = (0..count)
            .map(|i| (self.min + i as f64 * self.step).min(self.max))
            .collect();
        if self.order == ScanOrder::Descending {
            tilts.reverse();
        }
        Ok(tilts)
    }
}

/// Top-level TOML document for a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub sweep: TiltRange,
    #[serde(default)]
    pub schedule: SeasonalSchedule,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        info!(
            "Loaded run config: latitude {}°, sweep [{}, {}] step {}",
            config.simulation.latitude, config.sweep.min, config.sweep.max, config.sweep.step
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.sweep.validate()?;
        self.schedule.validate()
    }
}
