//! Interior zone allocation against the habitat floor.
//!
//! Operations never edit a zone list in place: each one takes the current
//! slice and hands back a fresh `Vec`, so a rejected request leaves the
//! caller's zones untouched.

use std::f64::consts::TAU;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::geometry;
use crate::ids::{SequentialIds, ZoneIdGenerator};
use crate::mission::{HabitatDimensions, Zone, ZoneId, MIN_ZONE_AREA};

/// Radius of the floor-plan ring in display units.
pub const DEFAULT_OUTER_VISUAL_RADIUS: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTemplate {
    pub name: &'static str,
    pub min_area: f64,
    pub color: &'static str,
}

pub static ZONE_TEMPLATES: [ZoneTemplate; 9] = [
    ZoneTemplate {
        name: "Sleeping Quarters",
        min_area: 4.0,
        color: "#4a90e2",
    },
    ZoneTemplate {
        name: "Hygiene Station",
        min_area: 3.0,
        color: "#50c878",
    },
    ZoneTemplate {
        name: "Galley/Food Prep",
        min_area: 5.0,
        color: "#ff6b6b",
    },
    ZoneTemplate {
        name: "Recreation Area",
        min_area: 6.0,
        color: "#ffd93d",
    },
    ZoneTemplate {
        name: "Life Support",
        min_area: 8.0,
        color: "#a78bfa",
    },
    ZoneTemplate {
        name: "Medical Bay",
        min_area: 4.0,
        color: "#ec4899",
    },
    ZoneTemplate {
        name: "Laboratory",
        min_area: 10.0,
        color: "#14b8a6",
    },
    ZoneTemplate {
        name: "Storage",
        min_area: 5.0,
        color: "#94a3b8",
    },
    ZoneTemplate {
        name: "Airlock",
        min_area: 3.0,
        color: "#f59e0b",
    },
];

pub fn find_template(name: &str) -> Option<&'static ZoneTemplate> {
    ZONE_TEMPLATES.iter().find(|template| template.name == name)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("please select a zone type first")]
    NoTemplateSelected,
    #[error("unknown zone type '{0}'")]
    UnknownTemplate(String),
    #[error("not enough space for {template}: needs {required:.1} m², {available:.1} m² available")]
    InsufficientSpace {
        template: String,
        required: f64,
        available: f64,
    },
}

/// Display-only position of one zone on the circular floor plan.
///
/// Zones are spread around a ring by index and sized by their share of the
/// floor. The disks may overlap and their footprint need not add up to the
/// floor; this is a drawing aid, not a packing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub zone_id: ZoneId,
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Colour band of the space-utilization bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UtilizationLevel {
    Comfortable,
    Tight,
    Critical,
}

impl UtilizationLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.9 {
            Self::Critical
        } else if ratio > 0.7 {
            Self::Tight
        } else {
            Self::Comfortable
        }
    }
}

pub fn used_area(zones: &[Zone]) -> f64 {
    zones.iter().map(|zone| zone.area).sum()
}

pub fn available_area(zones: &[Zone], dimensions: &HabitatDimensions) -> f64 {
    dimensions.floor_area() - used_area(zones)
}

pub struct ZoneAllocator {
    ids: Box<dyn ZoneIdGenerator>,
    outer_visual_radius: f64,
}

impl Default for ZoneAllocator {
    fn default() -> Self {
        Self::new(Box::new(SequentialIds::new()))
    }
}

impl ZoneAllocator {
    pub fn new(ids: Box<dyn ZoneIdGenerator>) -> Self {
        Self {
            ids,
            outer_visual_radius: DEFAULT_OUTER_VISUAL_RADIUS,
        }
    }

    pub fn with_outer_visual_radius(mut self, radius: f64) -> Self {
        self.outer_visual_radius = radius;
        self
    }

    pub fn outer_visual_radius(&self) -> f64 {
        self.outer_visual_radius
    }

    /// Appends a zone built from `template_name` at its minimum area.
    ///
    /// Free floor is checked here only; later resizes are not re-validated.
    pub fn add_zone(
        &mut self,
        zones: &[Zone],
        dimensions: &HabitatDimensions,
        template_name: &str,
    ) -> Result<Vec<Zone>, AllocationError> {
        if template_name.is_empty() {
            return Err(AllocationError::NoTemplateSelected);
        }
        let template = find_template(template_name)
            .ok_or_else(|| AllocationError::UnknownTemplate(template_name.to_string()))?;
        let available = available_area(zones, dimensions);
        if template.min_area > available {
            return Err(AllocationError::InsufficientSpace {
                template: template.name.to_string(),
                required: template.min_area,
                available,
            });
        }

        let zone = Zone {
            id: self.ids.next_id(zones),
            name: template.name.to_string(),
            area: template.min_area,
        };
        debug!(zone_id = %zone.id, name = %zone.name, available, "zone allocated");
        let mut next = Vec::with_capacity(zones.len() + 1);
        next.extend_from_slice(zones);
        next.push(zone);
        Ok(next)
    }

    pub fn remove_zone(&self, zones: &[Zone], id: &ZoneId) -> Vec<Zone> {
        zones.iter().filter(|zone| &zone.id != id).cloned().collect()
    }

    /// Sets a zone's area, clamped below at one square metre.
    ///
    /// There is deliberately no upper bound: the new area may exceed the
    /// remaining free floor. Non-finite input is not a size and resets the
    /// zone to the minimum, so every stored area survives a JSON export.
    pub fn update_zone_area(&self, zones: &[Zone], id: &ZoneId, area: f64) -> Vec<Zone> {
        zones
            .iter()
            .map(|zone| {
                if &zone.id == id {
                    Zone {
                        area: clamp_area(area),
                        ..zone.clone()
                    }
                } else {
                    zone.clone()
                }
            })
            .collect()
    }

    pub fn compute_placement(&self, zones: &[Zone], diameter: f64) -> Vec<PlacementResult> {
        compute_placement(zones, diameter, self.outer_visual_radius)
    }
}

fn clamp_area(area: f64) -> f64 {
    if area.is_finite() {
        area.max(MIN_ZONE_AREA)
    } else {
        MIN_ZONE_AREA
    }
}

pub fn compute_placement(
    zones: &[Zone],
    diameter: f64,
    outer_radius: f64,
) -> Vec<PlacementResult> {
    let total = geometry::floor_area(diameter);
    let count = zones.len() as f64;
    zones
        .iter()
        .enumerate()
        .map(|(index, zone)| {
            let angle = index as f64 / count * TAU;
            let share = geometry::utilization(zone.area, total).max(0.0);
            let radius = share.sqrt() * outer_radius;
            let offset = outer_radius - radius;
            PlacementResult {
                zone_id: zone.id.clone(),
                angle,
                x: angle.cos() * offset,
                y: angle.sin() * offset,
                radius,
            }
        })
        .collect()
}
