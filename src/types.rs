use serde::Deserialize;

use crate::error::{Error, Result};

/// Calendar season used by seasonal tilt schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in calendar order, starting with spring.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

/// Sun position for one (day of year, hour angle) pair, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub day_of_year: i32,
    pub declination: f64,
    pub hour_angle: f64,
    pub elevation: f64,
    /// Clockwise from north: 0 = N, 90 = E, 180 = S.
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfiguration {
    pub tilt: f64,
    pub azimuth: f64,
}

impl PanelConfiguration {
    pub fn south_facing(tilt: f64) -> Result<Self> {
        Ok(Self {
            tilt: check_tilt(tilt)?,
            azimuth: crate::radiation::SOUTH_AZIMUTH,
        })
    }
}

/// Tilt per season, in degrees from horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonalSchedule {
    pub spring: f64,
    pub summer: f64,
    #[serde(alias = "autumn")]
    pub fall: f64,
    pub winter: f64,
}

impl SeasonalSchedule {
    pub fn new(spring: f64, summer: f64, fall: f64, winter: f64) -> Result<Self> {
        let schedule = Self {
            spring,
            summer,
            fall,
            winter,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// The same tilt all year round.
    pub fn uniform(tilt: f64) -> Result<Self> {
        Self::new(tilt, tilt, tilt, tilt)
    }

    pub fn from_tilts(tilts: [f64; 4]) -> Result<Self> {
        Self::new(tilts[0], tilts[1], tilts[2], tilts[3])
    }

    pub fn tilt_for(&self, season: Season) -> f64 {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }

    pub fn tilts(&self) -> [f64; 4] {
        [self.spring, self.summer, self.fall, self.winter]
    }

    pub fn validate(&self) -> Result<()> {
        for tilt in self.tilts() {
            check_tilt(tilt)?;
        }
        Ok(())
    }
}

impl Default for SeasonalSchedule {
    fn default() -> Self {
        Self {
            spring: 15.0,
            summer: 0.0,
            fall: 30.0,
            winter: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunriseSunset {
    /// Minutes after apparent solar midnight.
    pub sunrise: i32,
    pub sunset: i32,
}

impl SunriseSunset {
    pub fn day_length_minutes(&self) -> i32 {
        self.sunset - self.sunrise
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub hour_angle: f64,
    pub elevation: f64,
    pub zenith: f64,
    pub azimuth: f64,
    pub declination: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunTrajectory {
    pub day_of_year: i32,
    pub declination: f64,
    pub sunset_hour_angle: f64,
    pub daylight: SunriseSunset,
    /// Ordered by hour angle, sunrise to sunset.
    pub points: Vec<TrajectoryPoint>,
}

/// One point of a tilt sweep, yield in kWh/m² over the swept period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub tilt: f64,
    pub annual_yield: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalOptimum {
    pub schedule: SeasonalSchedule,
    /// kWh/m²/yr over the whole year under `schedule`.
    pub annual_yield: f64,
    /// kWh/m² collected during each season, in `Season::ALL` order.
    pub season_yields: [f64; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyComparison {
    pub fixed: SweepPoint,
    pub schedule: SeasonalSchedule,
    pub seasonal_yield: f64,
    pub daily_tracking_yield: f64,
}

impl StrategyComparison {
    pub fn percent_of_fixed(&self, annual_yield: f64) -> f64 {
        annual_yield / self.fixed.annual_yield * 100.0
    }
}

pub(crate) fn check_tilt(tilt: f64) -> Result<f64> {
    if !(0.0..=90.0).contains(&tilt) {
        return Err(Error::invalid_input("tilt", tilt, "must lie in [0, 90] degrees"));
    }
    Ok(tilt)
}

pub(crate) fn check_latitude(latitude: f64) -> Result<f64> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_input(
            "latitude",
            latitude,
            "must lie in [-90, 90] degrees",
        ));
    }
    Ok(latitude)
}
