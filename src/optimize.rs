//! Exhaustive tilt sweeps and tracking bounds
//!
//! Every candidate is evaluated against the same year profile and the
//! maximum is chosen by plain comparison, ties going to the smaller tilt,
//! so the result does not depend on the scan order.
//!
//! Seasonal schedules are optimized one season at a time. A day's yield
//! depends only on the tilt of the season it belongs to and the seasons
//! partition the year, so the annual total is a sum of independent
//! per-season terms and maximizing each term maximizes the total. This
//! gives the same schedule as a joint search over all tilt combinations.

use log::info;

use crate::config::{SimulationConfig, TiltRange};
use crate::error::{Error, Result};
use crate::integrator::YearProfile;
use crate::maybe_rayon::*;
use crate::types::{Season, SeasonalOptimum, SeasonalSchedule, StrategyComparison, SweepPoint};
use crate::yield_table::YieldTable;

/// Highest-yield point; equal yields resolve to the smallest tilt.
pub fn best_point(points: &[SweepPoint]) -> Option<SweepPoint> {
    points.iter().copied().fold(None, |best, p| match best {
        Some(b)
            if b.annual_yield > p.annual_yield
                || (b.annual_yield == p.annual_yield && b.tilt <= p.tilt) =>
        {
            Some(b)
        }
        _ => Some(p),
    })
}

fn empty_sweep(range: &TiltRange) -> Error {
    Error::invalid_configuration(
        "sweep",
        format!("[{}, {}]", range.min, range.max),
        "no tilts to evaluate",
    )
}

fn sweep_profile(profile: &YearProfile, tilts: Vec<f64>) -> Vec<SweepPoint> {
    tilts
        .into_par_iter()
        .map(|tilt| SweepPoint {
            tilt,
            annual_yield: profile.annual_yield(tilt),
        })
        .collect()
}

/// Annual yield for every tilt of `range`, in scan order.
pub fn sweep_curve(config: &SimulationConfig, range: &TiltRange) -> Result<Vec<SweepPoint>> {
    let tilts = range.tilts()?;
    let profile = YearProfile::build(config)?;
    Ok(sweep_profile(&profile, tilts))
}

pub fn optimal_fixed_tilt(config: &SimulationConfig, range: &TiltRange) -> Result<SweepPoint> {
    let curve = sweep_curve(config, range)?;
    let best = best_point(&curve).ok_or_else(|| empty_sweep(range))?;
    info!(
        "Optimal fixed tilt at latitude {}°: {}° ({:.1} kWh/m²/yr over {} candidates)",
        config.latitude,
        best.tilt,
        best.annual_yield,
        curve.len()
    );
    Ok(best)
}

/// Candidate tilts for each season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonCandidates {
    pub spring: Vec<f64>,
    pub summer: Vec<f64>,
    pub fall: Vec<f64>,
    pub winter: Vec<f64>,
}

impl SeasonCandidates {
    /// The same candidate tilts for every season.
    pub fn from_range(range: &TiltRange) -> Result<Self> {
        let tilts = range.tilts()?;
        Ok(Self {
            spring: tilts.clone(),
            summer: tilts.clone(),
            fall: tilts.clone(),
            winter: tilts,
        })
    }

    pub fn for_season(&self, season: Season) -> &[f64] {
        match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Fall => &self.fall,
            Season::Winter => &self.winter,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for season in Season::ALL {
            let tilts = self.for_season(season);
            if tilts.is_empty() {
                return Err(Error::invalid_configuration(
                    "candidates",
                    format!("{:?}", season),
                    "no candidate tilts",
                ));
            }
            if let Some(bad) = tilts.iter().find(|t| !(0.0..=90.0).contains(*t)) {
                return Err(Error::invalid_configuration(
                    "candidates",
                    bad,
                    format!("{:?} tilt outside [0, 90] degrees", season),
                ));
            }
        }
        Ok(())
    }
}

pub fn optimal_seasonal_schedule(
    config: &SimulationConfig,
    candidates: &SeasonCandidates,
) -> Result<SeasonalOptimum> {
    candidates.validate()?;
    let profile = YearProfile::build(config)?;

    let mut tilts = [0.0; 4];
    let mut season_yields = [0.0; 4];
    for season in Season::ALL {
        let points: Vec<SweepPoint> = candidates
            .for_season(season)
            .iter()
            .map(|&tilt| SweepPoint {
                tilt,
                annual_yield: profile.season_yield(season, tilt),
            })
            .collect();
        // validate() guarantees every season has candidates
        if let Some(best) = best_point(&points) {
            tilts[season.index()] = best.tilt;
            season_yields[season.index()] = best.annual_yield;
        }
    }

    let schedule = SeasonalSchedule::from_tilts(tilts)?;
    let annual_yield = profile.annual_yield_seasonal(&schedule);
    info!(
        "Optimal seasonal schedule at latitude {}°: {:?} ({:.1} kWh/m²/yr)",
        config.latitude,
        schedule.tilts(),
        annual_yield
    );
    Ok(SeasonalOptimum {
        schedule,
        annual_yield,
        season_yields,
    })
}

/// Granularity of the tracking upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// South-facing panel re-tilted once a day to the best tilt of the sweep grid.
    DailyTilt,
    /// Two-axis tracker, panel normal always pointing at the sun.
    Continuous,
}

pub fn tracking_upper_bound(
    config: &SimulationConfig,
    mode: TrackingMode,
    range: &TiltRange,
) -> Result<f64> {
    let tilts = range.tilts()?;
    let profile = YearProfile::build(config)?;
    Ok(match mode {
        TrackingMode::DailyTilt => YieldTable::from_profile(&profile, tilts).daily_tracking_total(),
        TrackingMode::Continuous => profile.continuous_tracking_yield(),
    })
}

/// Best fixed tilt vs. a seasonal schedule vs. daily re-tilting.
pub fn compare_strategies(
    config: &SimulationConfig,
    range: &TiltRange,
    schedule: &SeasonalSchedule,
) -> Result<StrategyComparison> {
    schedule.validate()?;
    let tilts = range.tilts()?;
    let profile = YearProfile::build(config)?;
    let table = YieldTable::from_profile(&profile, tilts);

    let fixed = best_point(&table.annual_totals()).ok_or_else(|| empty_sweep(range))?;
    let comparison = StrategyComparison {
        fixed,
        schedule: *schedule,
        seasonal_yield: profile.annual_yield_seasonal(schedule),
        daily_tracking_yield: table.daily_tracking_total(),
    };
    info!(
        "Fixed {}°: {:.1}, seasonal: {:.1} ({:.1}%), daily tracking: {:.1} ({:.1}%) kWh/m²/yr",
        fixed.tilt,
        fixed.annual_yield,
        comparison.seasonal_yield,
        comparison.percent_of_fixed(comparison.seasonal_yield),
        comparison.daily_tracking_yield,
        comparison.percent_of_fixed(comparison.daily_tracking_yield),
    );
    Ok(comparison)
}
