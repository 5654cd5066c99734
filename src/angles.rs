use crate::types::SunPosition;

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const DAYS_PER_YEAR: i32 = 365;
/// Day of year at which the single-harmonic declination crosses zero.
pub const SPRING_EQUINOX_DAY: i32 = 81;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Hour angle in degrees for a local apparent solar time in hours.
pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

/// δ = 23.45° · sin(360°/365 · (n − 81)), no leap-year or eccentricity term.
pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT
        * deg_to_rad((360.0 / DAYS_PER_YEAR as f64) * (n - SPRING_EQUINOX_DAY) as f64).sin()
}

pub fn solar_elevation(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_alt = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_alt.clamp(-1.0, 1.0).asin())
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    90.0 - solar_elevation(latitude, declination, hour_angle)
}

pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    let az_rad = sin_az.atan2(cos_az);
    normalize_angle(rad_to_deg(az_rad))
}

/// Sunset hour angle H₀ from cos H₀ = −tan φ · tan δ; sunrise is −H₀.
///
/// Returns 0 on a polar night and 180 on a polar day.
pub fn sunrise_hour_angle(latitude: f64, declination: f64) -> f64 {
    let cos_h = -deg_to_rad(latitude).tan() * deg_to_rad(declination).tan();
    if cos_h >= 1.0 {
        0.0
    } else if cos_h <= -1.0 {
        180.0
    } else {
        rad_to_deg(cos_h.acos())
    }
}

pub fn solar_noon_elevation(latitude: f64, declination: f64) -> f64 {
    solar_elevation(latitude, declination, 0.0)
}

pub fn sun_position(latitude: f64, day_of_year: i32, hour_angle: f64) -> SunPosition {
    let declination = solar_declination(day_of_year);
    SunPosition {
        day_of_year,
        declination,
        hour_angle,
        elevation: solar_elevation(latitude, declination, hour_angle),
        azimuth: solar_azimuth(latitude, declination, hour_angle),
    }
}
