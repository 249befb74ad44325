//! Review-step metrics and the human-readable share text.

use std::fmt;

use serde::Serialize;

use crate::geometry::{self, VolumeAssessment};
use crate::mission::MissionState;
use crate::readiness::{self, ReadinessScore};
use crate::zones::UtilizationLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub floor_area: f64,
    pub volume: f64,
    pub volume_per_crew: f64,
    pub volume_assessment: VolumeAssessment,
    pub used_area: f64,
    pub available_area: f64,
    pub utilization: f64,
    pub utilization_level: UtilizationLevel,
    pub zone_count: usize,
    pub readiness: ReadinessScore,
}

impl MissionSummary {
    pub fn from_state(state: &MissionState) -> Self {
        let dimensions = &state.habitat.dimensions;
        let floor_area = dimensions.floor_area();
        let volume = dimensions.volume();
        let volume_per_crew = state.habitat.volume_per_crew();
        let used_area = state.used_area();
        let utilization = geometry::utilization(used_area, floor_area);

        Self {
            floor_area,
            volume,
            volume_per_crew,
            volume_assessment: VolumeAssessment::from_volume_per_crew(volume_per_crew),
            used_area,
            available_area: floor_area - used_area,
            utilization,
            utilization_level: UtilizationLevel::from_ratio(utilization),
            zone_count: state.zones().len(),
            readiness: readiness::compute(state),
        }
    }
}

impl fmt::Display for MissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Mission readiness: {}% ({})",
            self.readiness.value, self.readiness.label
        )?;
        writeln!(f, "  Floor area:      {:.1} m²", self.floor_area)?;
        writeln!(f, "  Total volume:    {:.1} m³", self.volume)?;
        writeln!(
            f,
            "  Volume per crew: {:.1} m³ ({})",
            self.volume_per_crew,
            self.volume_assessment.advice()
        )?;
        writeln!(
            f,
            "  Space used:      {:.1} / {:.1} m² ({:.0}%)",
            self.used_area,
            self.floor_area,
            self.utilization * 100.0
        )?;
        write!(f, "  Zones:           {}", self.zone_count)
    }
}

pub fn share_text(state: &MissionState) -> String {
    format!(
        "Check out my Mars Habitat Design!\n\n\
         Crew: {} | Duration: {} days\n\
         Location: {}\n\
         Habitat: {} | Zones: {}",
        state.habitat.crew_size,
        state.habitat.duration,
        state.coordinates,
        state.habitat.habitat_type,
        state.zones().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Coordinates;

    #[test]
    fn default_design_summary() {
        let summary = MissionSummary::from_state(&MissionState::default());
        assert!((summary.volume - 392.699).abs() < 1e-3);
        assert!((summary.volume_per_crew - 98.17).abs() < 1e-2);
        assert_eq!(summary.volume_assessment, VolumeAssessment::Oversized);
        assert_eq!(summary.used_area, 0.0);
        assert_eq!(summary.zone_count, 0);
        assert_eq!(summary.readiness.value, 0);
    }

    #[test]
    fn share_text_mentions_crew_site_type_and_zones() {
        let state = MissionState::default().with_coordinates(Coordinates::new(18.0, -134.0));
        let text = share_text(&state);
        assert!(text.starts_with("Check out my Mars Habitat Design!"));
        assert!(text.contains("Crew: 4 | Duration: 500 days"));
        assert!(text.contains("Location: 18°N, -134°E"));
        assert!(text.contains("Habitat: metallic | Zones: 0"));
    }
}
