use approx::assert_relative_eq;

use solar_tilt::config::{SimulationConfig, TiltRange};
use solar_tilt::integrator::{self, YearProfile};
use solar_tilt::optimize::*;
use solar_tilt::types::{Season, SeasonalSchedule, SweepPoint};
use solar_tilt::yield_table::generate_yield_table;
use solar_tilt::Error;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn shenzhen() -> SimulationConfig {
    SimulationConfig::for_latitude(22.5).unwrap()
}

fn point(tilt: f64, annual_yield: f64) -> SweepPoint {
    SweepPoint { tilt, annual_yield }
}

// ── best_point ──

#[test]
fn test_best_point_picks_maximum() {
    let points = [point(0.0, 1.0), point(10.0, 3.0), point(20.0, 2.0)];
    assert_eq!(best_point(&points), Some(point(10.0, 3.0)));
}

#[test]
fn test_best_point_ties_go_to_smaller_tilt() {
    let ascending = [point(10.0, 5.0), point(20.0, 5.0), point(30.0, 1.0)];
    let descending = [point(30.0, 1.0), point(20.0, 5.0), point(10.0, 5.0)];
    assert_eq!(best_point(&ascending).unwrap().tilt, 10.0);
    assert_eq!(best_point(&descending).unwrap().tilt, 10.0);
}

#[test]
fn test_best_point_empty() {
    assert_eq!(best_point(&[]), None);
}

// ── Fixed tilt ──

#[test]
fn test_optimal_fixed_tilt_shenzhen() {
    let best = optimal_fixed_tilt(&shenzhen(), &TiltRange::default()).unwrap();
    assert_approx!(best.tilt, 19.0, 1.0);
    assert_relative_eq!(best.annual_yield, 2071.0, max_relative = 0.02);
}

#[test]
fn test_scan_order_does_not_change_optimum() {
    let config = shenzhen();
    let up = optimal_fixed_tilt(&config, &TiltRange::new(0.0, 90.0, 1.0)).unwrap();
    let down = optimal_fixed_tilt(&config, &TiltRange::new(0.0, 90.0, 1.0).descending()).unwrap();
    assert_eq!(up, down);
}

#[test]
fn test_sweep_point_matches_annual_yield() {
    let config = shenzhen();
    let curve = sweep_curve(&config, &TiltRange::new(0.0, 90.0, 15.0)).unwrap();
    assert_eq!(curve.len(), 7);
    for p in &curve {
        assert_eq!(p.annual_yield, integrator::annual_yield(&config, p.tilt).unwrap());
    }
}

#[test]
fn test_sweep_unimodal_around_optimum() {
    let curve = sweep_curve(&shenzhen(), &TiltRange::new(17.0, 21.0, 1.0)).unwrap();
    let expected = [2069.611, 2070.728, 2071.216, 2071.076, 2070.307];
    for (p, e) in curve.iter().zip(expected) {
        assert_relative_eq!(p.annual_yield, e, max_relative = 0.02);
    }
    assert!(curve[0].annual_yield < curve[1].annual_yield);
    assert!(curve[1].annual_yield < curve[2].annual_yield);
    assert!(curve[2].annual_yield > curve[3].annual_yield);
    assert!(curve[3].annual_yield > curve[4].annual_yield);
}

#[test]
fn test_flat_and_vertical_panels() {
    let curve = sweep_curve(&shenzhen(), &TiltRange::new(0.0, 90.0, 90.0)).unwrap();
    assert_eq!(curve.len(), 2);
    assert_relative_eq!(curve[0].annual_yield, 1955.28, max_relative = 0.02);
    assert_relative_eq!(curve[1].annual_yield, 759.33, max_relative = 0.02);
}

#[test]
fn test_descending_sweep_is_reversed() {
    let config = shenzhen();
    let range = TiltRange::new(10.0, 40.0, 10.0);
    let up = sweep_curve(&config, &range).unwrap();
    let mut down = sweep_curve(&config, &range.descending()).unwrap();
    down.reverse();
    assert_eq!(up, down);
}

#[test]
fn test_fine_step_tilts() {
    let tilts = TiltRange::new(18.0, 20.0, 0.25).tilts().unwrap();
    assert_eq!(tilts.len(), 9);
    assert_eq!(tilts[0], 18.0);
    assert_eq!(tilts[8], 20.0);
}

#[test]
fn test_single_point_range() {
    let config = shenzhen();
    let best = optimal_fixed_tilt(&config, &TiltRange::new(30.0, 30.0, 1.0)).unwrap();
    assert_eq!(best.tilt, 30.0);
    assert_eq!(best.annual_yield, integrator::annual_yield(&config, 30.0).unwrap());
}

#[test]
fn test_degenerate_ranges_rejected() {
    let config = shenzhen();
    let bad = [
        TiltRange::new(0.0, 90.0, 0.0),
        TiltRange::new(0.0, 90.0, -1.0),
        TiltRange::new(0.0, 90.0, f64::NAN),
        TiltRange::new(40.0, 20.0, 1.0),
        TiltRange::new(-10.0, 90.0, 1.0),
        TiltRange::new(0.0, 100.0, 1.0),
    ];
    for range in bad {
        assert!(
            matches!(optimal_fixed_tilt(&config, &range), Err(Error::InvalidConfiguration { .. })),
            "{:?}",
            range
        );
    }
}

// ── Seasonal schedule ──

#[test]
fn test_optimal_seasonal_schedule_shenzhen() {
    let config = shenzhen();
    let candidates = SeasonCandidates::from_range(&TiltRange::default()).unwrap();
    let best = optimal_seasonal_schedule(&config, &candidates).unwrap();
    assert_approx!(best.schedule.spring, 10.0, 1.0);
    assert_approx!(best.schedule.summer, 0.0, 1.0);
    assert_approx!(best.schedule.fall, 33.0, 1.0);
    assert_approx!(best.schedule.winter, 45.0, 1.0);

    let fixed = optimal_fixed_tilt(&config, &TiltRange::default()).unwrap();
    let daily = tracking_upper_bound(&config, TrackingMode::DailyTilt, &TiltRange::default()).unwrap();
    assert!(fixed.annual_yield <= best.annual_yield);
    assert!(best.annual_yield <= daily);
    assert_relative_eq!(
        best.season_yields.iter().sum::<f64>(),
        best.annual_yield,
        max_relative = 1e-12
    );
}

#[test]
fn test_separable_matches_joint_search() {
    let config = shenzhen();
    let grid = [0.0, 15.0, 30.0, 45.0];
    let candidates = SeasonCandidates {
        spring: grid.to_vec(),
        summer: grid.to_vec(),
        fall: grid.to_vec(),
        winter: grid.to_vec(),
    };
    let separable = optimal_seasonal_schedule(&config, &candidates).unwrap();

    let profile = YearProfile::build(&config).unwrap();
    let mut joint_best = f64::MIN;
    for &spring in &grid {
        for &summer in &grid {
            for &fall in &grid {
                for &winter in &grid {
                    let schedule = SeasonalSchedule::new(spring, summer, fall, winter).unwrap();
                    joint_best = joint_best.max(profile.annual_yield_seasonal(&schedule));
                }
            }
        }
    }
    assert_relative_eq!(separable.annual_yield, joint_best, max_relative = 1e-12);
}

#[test]
fn test_candidates_validation() {
    let config = shenzhen();
    let mut candidates = SeasonCandidates::from_range(&TiltRange::new(0.0, 45.0, 15.0)).unwrap();
    candidates.summer.clear();
    assert!(matches!(
        optimal_seasonal_schedule(&config, &candidates),
        Err(Error::InvalidConfiguration { .. })
    ));

    let mut candidates = SeasonCandidates::from_range(&TiltRange::new(0.0, 45.0, 15.0)).unwrap();
    candidates.winter.push(95.0);
    assert!(matches!(
        optimal_seasonal_schedule(&config, &candidates),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert_eq!(candidates.for_season(Season::Winter).len(), 5);
}

// ── Strategy comparison and tracking ──

#[test]
fn test_compare_default_schedule() {
    let config = shenzhen();
    let comparison =
        compare_strategies(&config, &TiltRange::default(), &SeasonalSchedule::default()).unwrap();
    assert_approx!(comparison.fixed.tilt, 19.0, 1.0);
    assert_relative_eq!(comparison.seasonal_yield, 2183.9, max_relative = 0.02);
    assert_relative_eq!(comparison.daily_tracking_yield, 2211.9, max_relative = 0.02);
    assert!(comparison.fixed.annual_yield < comparison.seasonal_yield);
    assert!(comparison.seasonal_yield < comparison.daily_tracking_yield);
    assert_approx!(comparison.percent_of_fixed(comparison.fixed.annual_yield), 100.0, 1e-9);
}

#[test]
fn test_continuous_tracking_bounds_daily() {
    let config = shenzhen();
    let range = TiltRange::default();
    let daily = tracking_upper_bound(&config, TrackingMode::DailyTilt, &range).unwrap();
    let continuous = tracking_upper_bound(&config, TrackingMode::Continuous, &range).unwrap();
    assert!(continuous > daily);
    assert_relative_eq!(continuous, 2812.8, max_relative = 0.02);
}

#[test]
fn test_compare_rejects_bad_schedule() {
    let bad = SeasonalSchedule {
        summer: -1.0,
        ..SeasonalSchedule::default()
    };
    assert!(matches!(
        compare_strategies(&shenzhen(), &TiltRange::default(), &bad),
        Err(Error::InvalidInput { .. })
    ));
}

// ── Yield table ──

#[test]
fn test_yield_table_shape_and_totals() {
    let config = shenzhen();
    let range = TiltRange::default();
    let table = generate_yield_table(&config, &range).unwrap();
    assert_eq!(table.days.len(), 365);
    assert_eq!(table.tilts.len(), 91);
    assert!(table.days.iter().all(|d| d.yields.len() == 91));
    assert_eq!(table.annual_totals(), sweep_curve(&config, &range).unwrap());

    let compact = table.to_compact();
    assert_eq!(compact.len(), 365);
    assert_eq!(compact[171], table.days[171].yields);
}

#[test]
fn test_yield_table_daily_bests() {
    let table = generate_yield_table(&shenzhen(), &TiltRange::default()).unwrap();
    let bests = table.best_daily_tilts();
    assert_eq!(bests.len(), 365);
    let on = |day: i32| bests.iter().find(|b| b.day_of_year == day).unwrap().tilt;
    assert_eq!(on(172), 0.0);
    assert_approx!(on(355), 50.0, 1.0);
    assert_approx!(on(81), 23.0, 1.0);
}

#[test]
fn test_yield_table_season_totals() {
    let table = generate_yield_table(&shenzhen(), &TiltRange::new(0.0, 90.0, 30.0)).unwrap();
    let annual = table.annual_totals();
    for (col, total) in annual.iter().enumerate() {
        let by_season: f64 = Season::ALL
            .iter()
            .map(|&s| table.season_totals(s)[col].annual_yield)
            .sum();
        assert_relative_eq!(by_season, total.annual_yield, max_relative = 1e-12);
    }
}
