//! Tide systems and the permanent-tide correction of C(2,0)
//!
//! Gravity models come in one of three tide systems:
//!
//! - `tide_free`: no permanent direct or indirect tidal potential
//! - `zero_tide`: the permanent direct tidal potential is restored
//! - `mean_tide`: both direct and indirect permanent potentials are restored
//!
//! Converting a tide-free model only changes the degree-2 zonal coefficient.
//! The offset is supplied through the [`TidalOffset`] trait so callers can plug
//! in their own model; [`PermanentTide`] is the default.

use crate::errors::{GeoidError, Result};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Tide system of a gravity model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TideSystem {
    /// No permanent tidal potential (models are left as-is)
    #[default]
    TideFree,
    /// Permanent direct and indirect tidal potentials restored
    MeanTide,
    /// Permanent direct tidal potential restored
    ZeroTide,
}

impl TideSystem {
    /// Get the ICGEM string representation of the tide system
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TideFree => "tide_free",
            Self::MeanTide => "mean_tide",
            Self::ZeroTide => "zero_tide",
        }
    }

    /// Whether reading with this tide system modifies C(2,0)
    #[must_use]
    pub const fn requires_correction(self) -> bool {
        matches!(self, Self::MeanTide | Self::ZeroTide)
    }
}

impl fmt::Display for TideSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TideSystem {
    type Err = GeoidError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tide_free" => Ok(Self::TideFree),
            "mean_tide" => Ok(Self::MeanTide),
            "zero_tide" => Ok(Self::ZeroTide),
            other => Err(GeoidError::UnknownTideSystem(other.to_string())),
        }
    }
}

/// Reference ellipsoid used to scale the permanent tide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceEllipsoid {
    #[default]
    Wgs84,
    Grs80,
}

impl ReferenceEllipsoid {
    /// Normal gravity at the equator in m/s²
    #[must_use]
    pub const fn equatorial_gravity(self) -> f64 {
        match self {
            Self::Wgs84 => 9.780_325_335_9,
            Self::Grs80 => 9.780_326_771_5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS84",
            Self::Grs80 => "GRS80",
        }
    }
}

impl FromStr for ReferenceEllipsoid {
    type Err = GeoidError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "WGS84" => Ok(Self::Wgs84),
            "GRS80" => Ok(Self::Grs80),
            _ => Err(GeoidError::UnknownEllipsoid(s.to_string())),
        }
    }
}

/// Source of the additive C(2,0) correction for a tide-system change
pub trait TidalOffset {
    /// Offset to add to a tide-free C(2,0) to express it in `tide`
    ///
    /// `gm` is the model's gravity constant in m³/s² and `radius` its
    /// reference radius in meters.
    fn c20_offset(&self, tide: TideSystem, gm: f64, radius: f64, ellipsoid: ReferenceEllipsoid)
        -> f64;
}

/// Permanent tide amplitude H0 in meters (IERS Conventions 2010, §6.2.2)
pub const PERMANENT_TIDE_AMPLITUDE: f64 = -0.31460;

/// Default degree-2 Love number
pub const DEFAULT_LOVE_NUMBER: f64 = 0.3;

/// Permanent-tide correction scaled by normal gravity of the reference ellipsoid
///
/// ```text
/// ΔC20 = f · H0 · γe · R / (GM · sqrt(4π))
/// ```
///
/// with `f = k2` for the zero-tide system and `f = 1 + k2` for the mean-tide system.
#[derive(Debug, Clone, Copy)]
pub struct PermanentTide {
    pub love_number: f64,
}

impl PermanentTide {
    pub fn new(love_number: f64) -> Self {
        Self { love_number }
    }
}

impl Default for PermanentTide {
    fn default() -> Self {
        Self::new(DEFAULT_LOVE_NUMBER)
    }
}

impl TidalOffset for PermanentTide {
    fn c20_offset(
        &self,
        tide: TideSystem,
        gm: f64,
        radius: f64,
        ellipsoid: ReferenceEllipsoid,
    ) -> f64 {
        let factor = match tide {
            TideSystem::TideFree => return 0.0,
            TideSystem::ZeroTide => self.love_number,
            TideSystem::MeanTide => 1.0 + self.love_number,
        };
        factor * PERMANENT_TIDE_AMPLITUDE * ellipsoid.equatorial_gravity() * radius
            / (gm * (4.0 * PI).sqrt())
    }
}

/// Calculates the C(2,0) offset with the default [`PermanentTide`] model
pub fn calculate_tidal_offset(
    tide: TideSystem,
    gm: f64,
    radius: f64,
    ellipsoid: ReferenceEllipsoid,
) -> f64 {
    PermanentTide::default().c20_offset(tide, gm, radius, ellipsoid)
}
