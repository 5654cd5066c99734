use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::angles::{self, DAYS_PER_YEAR, DEGREES_PER_HOUR};
use crate::config::{SimulationConfig, MIN_HOUR_ANGLE_STEP};
use crate::error::{Error, Result};
use crate::types::{SunTrajectory, SunriseSunset, TrajectoryPoint};

/// Non-leap year against which calendar dates are resolved.
pub const REFERENCE_YEAR: i32 = 2023;
pub const MINUTES_PER_DAY: i32 = 1440;

pub fn days_of_year() -> RangeInclusive<i32> {
    1..=DAYS_PER_YEAR
}

pub fn check_day_of_year(day_of_year: i32) -> Result<i32> {
    if !days_of_year().contains(&day_of_year) {
        return Err(Error::invalid_input(
            "day_of_year",
            day_of_year,
            format!("must lie in [1, {}]", DAYS_PER_YEAR),
        ));
    }
    Ok(day_of_year)
}

pub fn day_of_year(month: u32, day: u32) -> Result<i32> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|date| date.ordinal() as i32)
        .ok_or_else(|| {
            Error::invalid_input(
                "date",
                format!("{:02}-{:02}", month, day),
                format!("not a calendar date in {}", REFERENCE_YEAR),
            )
        })
}

pub fn doy_to_month_day(day_of_year: i32) -> Result<(u32, u32)> {
    let doy = check_day_of_year(day_of_year)?;
    NaiveDate::from_yo_opt(REFERENCE_YEAR, doy as u32)
        .map(|date| (date.month(), date.day()))
        .ok_or_else(|| Error::invalid_input("day_of_year", doy, "not representable"))
}

/// One quadrature node: hour angle in degrees and its weight in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourAngleSample {
    pub hour_angle: f64,
    pub weight_hours: f64,
}

/// Trapezoidal nodes spanning sunrise (−H₀) to sunset (+H₀).
#[derive(Debug, Clone, PartialEq)]
pub struct HourAngleGrid {
    pub sunset_hour_angle: f64,
    /// Actual node spacing in degrees, never larger than the requested step.
    pub step: f64,
    pub samples: Vec<HourAngleSample>,
}

impl HourAngleGrid {
    /// `max_step` is raised to `MIN_HOUR_ANGLE_STEP` when finer; an empty
    /// grid is returned on a polar night.
    pub fn daylight(sunset_hour_angle: f64, max_step: f64) -> Self {
        if sunset_hour_angle <= 0.0 {
            return Self {
                sunset_hour_angle: 0.0,
                step: 0.0,
                samples: Vec::new(),
            };
        }
        let span = 2.0 * sunset_hour_angle;
        let intervals = ((span / max_step.max(MIN_HOUR_ANGLE_STEP)).ceil() as usize).max(1);
        let step = span / intervals as f64;
        let full_weight = step / DEGREES_PER_HOUR;

        let samples = (0..=intervals)
            .map(|i| HourAngleSample {
                hour_angle: -sunset_hour_angle + i as f64 * step,
                weight_hours: if i == 0 || i == intervals {
                    0.5 * full_weight
                } else {
                    full_weight
                },
            })
            .collect();

        Self {
            sunset_hour_angle,
            step,
            samples,
        }
    }

    pub fn for_day(config: &SimulationConfig, day_of_year: i32) -> Self {
        let declination = angles::solar_declination(day_of_year);
        let h0 = angles::sunrise_hour_angle(config.latitude, declination);
        Self::daylight(h0, config.hour_angle_step)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn daylight_hours(&self) -> f64 {
        2.0 * self.sunset_hour_angle / DEGREES_PER_HOUR
    }
}

pub fn daylight_window(latitude: f64, day_of_year: i32) -> SunriseSunset {
    let decl = angles::solar_declination(day_of_year);
    let h_deg = angles::sunrise_hour_angle(latitude, decl);
    let half_day_minutes = (h_deg / DEGREES_PER_HOUR) * 60.0;
    let solar_noon_minutes = (MINUTES_PER_DAY / 2) as f64;
    SunriseSunset {
        sunrise: (solar_noon_minutes - half_day_minutes).round() as i32,
        sunset: (solar_noon_minutes + half_day_minutes).round() as i32,
    }
}

/// Sun path from sunrise to sunset on the configured hour-angle grid.
pub fn sun_trajectory(config: &SimulationConfig, day_of_year: i32) -> Result<SunTrajectory> {
    config.validate()?;
    let day = check_day_of_year(day_of_year)?;
    let grid = HourAngleGrid::for_day(config, day);
    let declination = angles::solar_declination(day);

    let points = grid
        .samples
        .iter()
        .map(|sample| {
            let pos = angles::sun_position(config.latitude, day, sample.hour_angle);
            TrajectoryPoint {
                hour_angle: pos.hour_angle,
                elevation: pos.elevation,
                zenith: angles::solar_zenith_angle(config.latitude, declination, pos.hour_angle),
                azimuth: pos.azimuth,
                declination: pos.declination,
            }
        })
        .collect();

    Ok(SunTrajectory {
        day_of_year: day,
        declination,
        sunset_hour_angle: grid.sunset_hour_angle,
        daylight: daylight_window(config.latitude, day),
        points,
    })
}
