//! Incidence and clear-sky direct radiation model
//!
//! Direct radiation on a panel is I = I₀ · τ^AM · cos θ, floored at zero.
//! Diffuse and reflected components are not modelled.

use serde::Deserialize;

use crate::angles::{deg_to_rad, rad_to_deg};
use crate::error::{Error, Result};

/// Solar constant in W/m².
pub const SOLAR_CONSTANT: f64 = 1361.0;
/// Clear-sky transmittance per unit air mass.
pub const CLEAR_SKY_TRANSMITTANCE: f64 = 0.7;
/// Panel azimuth for a south-facing panel (clockwise from north).
pub const SOUTH_AZIMUTH: f64 = 180.0;
/// Lowest elevation (degrees) used when computing air mass.
pub const MIN_AIR_MASS_ELEVATION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirMassModel {
    /// AM = 1 / sin α, with α clamped to the configured minimum elevation.
    #[default]
    PlaneParallel,
    /// Kasten & Young (1989), finite at the horizon.
    KastenYoung,
}

/// Air mass relative to the zenith path. Infinite below the horizon.
pub fn air_mass(elevation: f64, model: AirMassModel, min_elevation: f64) -> f64 {
    if elevation <= 0.0 {
        return f64::INFINITY;
    }
    match model {
        AirMassModel::PlaneParallel => 1.0 / deg_to_rad(elevation.max(min_elevation)).sin(),
        AirMassModel::KastenYoung => {
            1.0 / (deg_to_rad(elevation).sin() + 0.50572 * (elevation + 6.07995).powf(-1.6364))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Atmosphere {
    #[serde(default = "solar_constant_default")]
    pub solar_constant: f64,
    #[serde(default = "transmittance_default")]
    pub transmittance: f64,
    #[serde(default)]
    pub air_mass: AirMassModel,
    #[serde(default = "min_elevation_default")]
    pub min_elevation: f64,
}

fn solar_constant_default() -> f64 {
    SOLAR_CONSTANT
}

fn transmittance_default() -> f64 {
    CLEAR_SKY_TRANSMITTANCE
}

fn min_elevation_default() -> f64 {
    MIN_AIR_MASS_ELEVATION
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            solar_constant: SOLAR_CONSTANT,
            transmittance: CLEAR_SKY_TRANSMITTANCE,
            air_mass: AirMassModel::PlaneParallel,
            min_elevation: MIN_AIR_MASS_ELEVATION,
        }
    }
}

impl Atmosphere {
    pub fn validate(&self) -> Result<()> {
        if !(self.solar_constant.is_finite() && self.solar_constant > 0.0) {
            return Err(Error::invalid_configuration(
                "atmosphere.solar_constant",
                self.solar_constant,
                "must be positive",
            ));
        }
        if !(self.transmittance > 0.0 && self.transmittance <= 1.0) {
            return Err(Error::invalid_configuration(
                "atmosphere.transmittance",
                self.transmittance,
                "must lie in (0, 1]",
            ));
        }
        if !(self.min_elevation > 0.0 && self.min_elevation < 90.0) {
            return Err(Error::invalid_configuration(
                "atmosphere.min_elevation",
                self.min_elevation,
                "must lie in (0, 90) degrees",
            ));
        }
        Ok(())
    }

    /// Fraction of the extraterrestrial beam that reaches the ground.
    pub fn transmittance_at(&self, elevation: f64) -> f64 {
        if elevation <= 0.0 {
            return 0.0;
        }
        self.transmittance
            .powf(air_mass(elevation, self.air_mass, self.min_elevation))
    }

    /// Beam irradiance on a surface normal to the sun, W/m².
    pub fn beam_normal(&self, elevation: f64) -> f64 {
        self.solar_constant * self.transmittance_at(elevation)
    }
}

/// Tilt-independent parts of the incidence cosine for one sun position.
///
/// cos θ = sin α · cos β + cos α · sin β · cos(γs − γp)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidenceTerms {
    pub sin_elevation: f64,
    /// cos α · cos(γs − γp)
    pub facing: f64,
}

impl IncidenceTerms {
    pub fn new(elevation: f64, solar_azimuth: f64, panel_azimuth: f64) -> Self {
        let elv_rad = deg_to_rad(elevation);
        Self {
            sin_elevation: elv_rad.sin(),
            facing: elv_rad.cos() * deg_to_rad(solar_azimuth - panel_azimuth).cos(),
        }
    }

    /// Unclamped cosine for a panel tilt given as (sin β, cos β).
    pub fn raw_cosine(&self, (sin_tilt, cos_tilt): (f64, f64)) -> f64 {
        self.sin_elevation * cos_tilt + self.facing * sin_tilt
    }

    pub fn cosine(&self, tilt: (f64, f64)) -> f64 {
        self.raw_cosine(tilt).clamp(0.0, 1.0)
    }
}

/// (sin β, cos β) for a tilt in degrees.
pub fn tilt_sin_cos(tilt: f64) -> (f64, f64) {
    deg_to_rad(tilt).sin_cos()
}

/// Cosine of the angle of incidence, clamped to [0, 1]; 0 means the sun is
/// behind the panel.
pub fn incidence_cosine(elevation: f64, tilt: f64, solar_azimuth: f64, panel_azimuth: f64) -> f64 {
    IncidenceTerms::new(elevation, solar_azimuth, panel_azimuth).cosine(tilt_sin_cos(tilt))
}

/// Angle between the sun's rays and the panel normal, in degrees.
pub fn angle_of_incidence(elevation: f64, tilt: f64, solar_azimuth: f64, panel_azimuth: f64) -> f64 {
    let raw = IncidenceTerms::new(elevation, solar_azimuth, panel_azimuth).raw_cosine(tilt_sin_cos(tilt));
    rad_to_deg(raw.clamp(-1.0, 1.0).acos())
}

/// Direct radiation on the panel, W/m². Zero when the sun is at or below
/// the horizon or behind the panel.
pub fn radiation_intensity(atmosphere: &Atmosphere, elevation: f64, incidence_cosine: f64) -> f64 {
    if elevation <= 0.0 || incidence_cosine <= 0.0 {
        return 0.0;
    }
    atmosphere.beam_normal(elevation) * incidence_cosine.min(1.0)
}
