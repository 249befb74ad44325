//! Mission readiness score.
//!
//! Four independent criteria, 25 points each.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::geometry::{self, VolumeAssessment};
use crate::mission::MissionState;

pub const POINTS_PER_CRITERION: u8 = 25;
pub const MIN_ZONE_COUNT: usize = 5;
pub const UTILIZATION_BAND: RangeInclusive<f64> = 0.6..=0.85;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCriteria {
    pub site_selected: bool,
    pub volume_per_crew_in_band: bool,
    pub enough_zones: bool,
    pub utilization_in_band: bool,
}

impl ReadinessCriteria {
    pub fn satisfied(&self) -> u8 {
        [
            self.site_selected,
            self.volume_per_crew_in_band,
            self.enough_zones,
            self.utilization_in_band,
        ]
        .into_iter()
        .filter(|met| *met)
        .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessLabel {
    #[serde(rename = "Ready for Mission")]
    ReadyForMission,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Incomplete")]
    Incomplete,
}

impl ReadinessLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::ReadyForMission
        } else if score >= 50 {
            Self::NeedsReview
        } else {
            Self::Incomplete
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadyForMission => "Ready for Mission",
            Self::NeedsReview => "Needs Review",
            Self::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for ReadinessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessScore {
    pub value: u8,
    pub label: ReadinessLabel,
    pub criteria: ReadinessCriteria,
}

pub fn evaluate(state: &MissionState) -> ReadinessCriteria {
    let volume_per_crew = state.habitat.volume_per_crew();
    let utilization = geometry::utilization(
        state.used_area(),
        state.habitat.dimensions.floor_area(),
    );

    ReadinessCriteria {
        site_selected: state.coordinates.is_selected(),
        volume_per_crew_in_band: VolumeAssessment::from_volume_per_crew(volume_per_crew)
            .is_within_guidance(),
        enough_zones: state.zones().len() >= MIN_ZONE_COUNT,
        utilization_in_band: UTILIZATION_BAND.contains(&utilization),
    }
}

pub fn compute(state: &MissionState) -> ReadinessScore {
    let criteria = evaluate(state);
    let value = criteria.satisfied() * POINTS_PER_CRITERION;
    ReadinessScore {
        value,
        label: ReadinessLabel::from_score(value),
        criteria,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(ReadinessLabel::from_score(100), ReadinessLabel::ReadyForMission);
        assert_eq!(ReadinessLabel::from_score(75), ReadinessLabel::ReadyForMission);
        assert_eq!(ReadinessLabel::from_score(50), ReadinessLabel::NeedsReview);
        assert_eq!(ReadinessLabel::from_score(25), ReadinessLabel::Incomplete);
        assert_eq!(ReadinessLabel::from_score(0), ReadinessLabel::Incomplete);
    }

    #[test]
    fn zero_crew_never_meets_volume_band() {
        let mut state = MissionState::default();
        state.habitat.crew_size = 0;
        assert!(!evaluate(&state).volume_per_crew_in_band);
    }

    #[test]
    fn zero_diameter_counts_as_zero_utilization() {
        let mut state = MissionState::default();
        state.habitat.dimensions.diameter = 0.0;
        let criteria = evaluate(&state);
        assert!(!criteria.utilization_in_band);
        assert!(!criteria.volume_per_crew_in_band);
    }

    #[test]
    fn volume_criterion_agrees_with_summary_assessment() {
        for crew in 1..=30 {
            let mut state = MissionState::default();
            state.habitat.crew_size = crew;
            let assessment =
                VolumeAssessment::from_volume_per_crew(state.habitat.volume_per_crew());
            assert_eq!(
                evaluate(&state).volume_per_crew_in_band,
                assessment == VolumeAssessment::WithinGuidance,
                "crew {crew}"
            );
        }
        let mut state = MissionState::default();
        state.habitat.crew_size = 16;
        assert!(evaluate(&state).volume_per_crew_in_band);
        state.habitat.crew_size = 27;
        assert!(!evaluate(&state).volume_per_crew_in_band);
    }

    #[test]
    fn label_serializes_as_display_text() {
        let json = serde_json::to_string(&ReadinessLabel::NeedsReview).unwrap();
        assert_eq!(json, "\"Needs Review\"");
    }
}
