//! Cylinder geometry for the habitat shell.
//!
//! The habitat is modelled as a right circular cylinder: the floor is the
//! horizontal cross-section and the pressurised volume is floor area times
//! height. Every function here is pure.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

/// Lower edge of the livable volume-per-crew band, in m³.
pub const MIN_VOLUME_PER_CREW: f64 = 15.0;
/// Upper edge of the livable volume-per-crew band, in m³.
pub const MAX_VOLUME_PER_CREW: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("division by zero")]
    DivideByZero,
}

/// Floor area in m² of a cylinder with the given diameter.
pub fn floor_area(diameter: f64) -> f64 {
    let radius = diameter / 2.0;
    PI * radius * radius
}

pub fn volume(diameter: f64, height: f64) -> f64 {
    floor_area(diameter) * height
}

pub fn volume_per_crew(volume: f64, crew_size: u32) -> Result<f64, GeometryError> {
    if crew_size == 0 {
        return Err(GeometryError::DivideByZero);
    }
    Ok(volume / crew_size as f64)
}

/// Same as [`volume_per_crew`] but yields `0.0` for an empty crew.
pub fn volume_per_crew_or_zero(volume: f64, crew_size: u32) -> f64 {
    volume_per_crew(volume, crew_size).unwrap_or(0.0)
}

/// Fraction of `total_area` covered by `used_area`; zero when there is no floor.
pub fn utilization(used_area: f64, total_area: f64) -> f64 {
    if total_area == 0.0 {
        return 0.0;
    }
    used_area / total_area
}

/// How a volume-per-crew figure compares against the livable band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeAssessment {
    Undersized,
    WithinGuidance,
    Oversized,
}

impl VolumeAssessment {
    pub fn from_volume_per_crew(volume_per_crew: f64) -> Self {
        if volume_per_crew < MIN_VOLUME_PER_CREW {
            Self::Undersized
        } else if volume_per_crew > MAX_VOLUME_PER_CREW {
            Self::Oversized
        } else {
            Self::WithinGuidance
        }
    }

    pub fn is_within_guidance(self) -> bool {
        self == Self::WithinGuidance
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::Undersized => "Consider increasing habitat size",
            Self::WithinGuidance => "Habitat meets NASA recommendations",
            Self::Oversized => "Habitat may be oversized",
        }
    }
}
