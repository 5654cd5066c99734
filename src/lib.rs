pub mod angles;
pub mod config;
pub mod error;
pub mod integrator;
mod maybe_rayon;
pub mod optimize;
pub mod radiation;
pub mod simulation;
pub mod time_grid;
pub mod types;
pub mod yield_table;

pub use angles::{
    deg_to_rad, hour_angle, normalize_angle, rad_to_deg, solar_azimuth, solar_declination,
    solar_elevation, solar_noon_elevation, solar_zenith_angle, sun_position, sunrise_hour_angle,
    DAYS_PER_YEAR, DEGREES_PER_HOUR, EARTH_AXIAL_TILT, SPRING_EQUINOX_DAY,
};

pub use config::{
    RunConfig, ScanOrder, SeasonBoundaries, SeasonCalendar, SimulationConfig, TiltRange,
    HOUR_ANGLE_STEP, MAX_TILT_CANDIDATES, MIN_HOUR_ANGLE_STEP,
};

pub use error::{Error, Result};

pub use integrator::{
    daily_yield, daylight_profile, wh_to_kwh, DaylightProfile, YearProfile, WH_PER_KWH,
};

pub use optimize::{
    best_point, compare_strategies, optimal_seasonal_schedule, tracking_upper_bound,
    SeasonCandidates, TrackingMode,
};

pub use radiation::{
    air_mass, angle_of_incidence, incidence_cosine, radiation_intensity, AirMassModel, Atmosphere,
    CLEAR_SKY_TRANSMITTANCE, SOLAR_CONSTANT, SOUTH_AZIMUTH,
};

pub use simulation::{
    annual_yield, annual_yield_seasonal, optimal_fixed_tilt, sun_trajectory, sweep_curve,
};

pub use time_grid::{
    check_day_of_year, day_of_year, daylight_window, days_of_year, doy_to_month_day,
    HourAngleGrid, HourAngleSample, REFERENCE_YEAR,
};

pub use types::{
    PanelConfiguration, Season, SeasonalOptimum, SeasonalSchedule, StrategyComparison,
    SunPosition, SunTrajectory, SunriseSunset, SweepPoint, TrajectoryPoint,
};

pub use yield_table::{generate_yield_table, DailyBest, DayYields, YieldTable};
