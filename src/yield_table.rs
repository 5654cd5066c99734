use log::debug;

use crate::config::{SimulationConfig, TiltRange};
use crate::error::Result;
use crate::integrator::{wh_to_kwh, YearProfile};
use crate::maybe_rayon::*;
use crate::optimize::best_point;
use crate::types::{Season, SweepPoint};

/// Daily yields (Wh/m²) of one day, one per tilt of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct DayYields {
    pub day_of_year: i32,
    pub season: Season,
    pub yields: Vec<f64>,
}

/// Best tilt of one day and its yield in Wh/m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBest {
    pub day_of_year: i32,
    pub tilt: f64,
    pub daily_yield: f64,
}

/// Day × tilt matrix of daily yields.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldTable {
    /// Column tilts, in the scan order of the range the table was built from.
    pub tilts: Vec<f64>,
    pub days: Vec<DayYields>,
}

impl YieldTable {
    pub fn from_profile(profile: &YearProfile, tilts: Vec<f64>) -> Self {
        let days: Vec<DayYields> = (&profile.days)
            .into_par_iter()
            .map(|day| DayYields {
                day_of_year: day.day_of_year,
                season: profile.season_of(day.day_of_year),
                yields: tilts.iter().map(|&tilt| day.yield_for_tilt(tilt)).collect(),
            })
            .collect();

        debug!("Built yield table: {} days x {} tilts", days.len(), tilts.len());
        Self { tilts, days }
    }

    /// Annual kWh/m²/yr per column, summed in day order.
    pub fn annual_totals(&self) -> Vec<SweepPoint> {
        self.column_totals(|_| true)
    }

    /// kWh/m² per column restricted to the days of `season`.
    pub fn season_totals(&self, season: Season) -> Vec<SweepPoint> {
        self.column_totals(|day| day.season == season)
    }

    fn column_totals<F>(&self, include: F) -> Vec<SweepPoint>
    where
        F: Fn(&DayYields) -> bool,
    {
        self.tilts
            .iter()
            .enumerate()
            .map(|(col, &tilt)| SweepPoint {
                tilt,
                annual_yield: wh_to_kwh(
                    self.days
                        .iter()
                        .filter(|day| include(day))
                        .map(|day| day.yields[col])
                        .sum(),
                ),
            })
            .collect()
    }

    /// Best column for each day, ties going to the smaller tilt.
    pub fn best_daily_tilts(&self) -> Vec<DailyBest> {
        self.days
            .iter()
            .filter_map(|day| {
                let points: Vec<SweepPoint> = self
                    .tilts
                    .iter()
                    .zip(&day.yields)
                    .map(|(&tilt, &wh)| SweepPoint {
                        tilt,
                        annual_yield: wh,
                    })
                    .collect();
                best_point(&points).map(|best| DailyBest {
                    day_of_year: day.day_of_year,
                    tilt: best.tilt,
                    daily_yield: best.annual_yield,
                })
            })
            .collect()
    }

    /// kWh/m²/yr when each day uses its best column.
    pub fn daily_tracking_total(&self) -> f64 {
        wh_to_kwh(self.best_daily_tilts().iter().map(|b| b.daily_yield).sum())
    }

    /// Rows of daily yields only, one `Vec` per day.
    pub fn to_compact(&self) -> Vec<Vec<f64>> {
        self.days.iter().map(|day| day.yields.clone()).collect()
    }
}

pub fn generate_yield_table(config: &SimulationConfig, range: &TiltRange) -> Result<YieldTable> {
    let tilts = range.tilts()?;
    let profile = YearProfile::build(config)?;
    Ok(YieldTable::from_profile(&profile, tilts))
}
