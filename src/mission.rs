//! Mission design state shared by every wizard step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry;

/// Advisory `{min, max, step}` contract of a numeric input control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const CREW_SIZE_RANGE: InputRange = InputRange::new(2.0, 12.0, 1.0);
pub const DURATION_RANGE: InputRange = InputRange::new(30.0, 900.0, 30.0);
pub const DIAMETER_RANGE: InputRange = InputRange::new(5.0, 20.0, 0.5);
pub const HEIGHT_RANGE: InputRange = InputRange::new(3.0, 10.0, 0.5);

/// Landing site in signed degrees. `(0, 0)` means no site has been picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_selected(&self) -> bool {
        self.lat != 0.0 || self.lng != 0.0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°N, {}°E", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitatType {
    #[default]
    Metallic,
    Inflatable,
    #[serde(alias = "in-situ")]
    Insitu,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HabitatTypeInfo {
    pub id: HabitatType,
    pub name: &'static str,
    pub description: &'static str,
    pub mass: &'static str,
    pub deployment: &'static str,
}

impl HabitatType {
    pub const ALL: [HabitatType; 3] = [Self::Metallic, Self::Inflatable, Self::Insitu];

    pub fn id(self) -> &'static str {
        match self {
            Self::Metallic => "metallic",
            Self::Inflatable => "inflatable",
            Self::Insitu => "insitu",
        }
    }

    pub fn info(self) -> HabitatTypeInfo {
        match self {
            Self::Metallic => HabitatTypeInfo {
                id: self,
                name: "Metallic Structure",
                description: "Traditional rigid structure with high durability",
                mass: "Heavy",
                deployment: "Complex",
            },
            Self::Inflatable => HabitatTypeInfo {
                id: self,
                name: "Inflatable Module",
                description: "Lightweight expandable habitat for quick deployment",
                mass: "Light",
                deployment: "Easy",
            },
            Self::Insitu => HabitatTypeInfo {
                id: self,
                name: "In-Situ Manufacturing",
                description: "Built on-site using Martian resources",
                mass: "Variable",
                deployment: "Extended",
            },
        }
    }
}

impl fmt::Display for HabitatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Cylinder dimensions in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitatDimensions {
    pub diameter: f64,
    pub height: f64,
}

impl Default for HabitatDimensions {
    fn default() -> Self {
        Self {
            diameter: 10.0,
            height: 5.0,
        }
    }
}

impl HabitatDimensions {
    pub fn floor_area(&self) -> f64 {
        geometry::floor_area(self.diameter)
    }

    pub fn volume(&self) -> f64 {
        geometry::volume(self.diameter, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatConfig {
    #[serde(rename = "type")]
    pub habitat_type: HabitatType,
    pub crew_size: u32,
    pub duration: u32,
    pub dimensions: HabitatDimensions,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            habitat_type: HabitatType::Metallic,
            crew_size: 4,
            duration: 500,
            dimensions: HabitatDimensions::default(),
        }
    }
}

impl HabitatConfig {
    pub fn volume_per_crew(&self) -> f64 {
        geometry::volume_per_crew_or_zero(self.dimensions.volume(), self.crew_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Minimum area any zone may be resized down to, in m².
pub const MIN_ZONE_AREA: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub area: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interior {
    pub zones: Vec<Zone>,
}

/// Root value of a design session.
///
/// Every `with_*` method returns a new state with exactly one slice replaced,
/// so a caller holding the previous value keeps a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionState {
    pub coordinates: Coordinates,
    pub habitat: HabitatConfig,
    pub interior: Interior,
}

impl MissionState {
    pub fn zones(&self) -> &[Zone] {
        &self.interior.zones
    }

    pub fn used_area(&self) -> f64 {
        crate::zones::used_area(&self.interior.zones)
    }

    pub fn with_coordinates(&self, coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            ..self.clone()
        }
    }

    pub fn with_habitat(&self, habitat: HabitatConfig) -> Self {
        Self {
            habitat,
            ..self.clone()
        }
    }

    pub fn with_zones(&self, zones: Vec<Zone>) -> Self {
        Self {
            interior: Interior { zones },
            ..self.clone()
        }
    }
}
