//! The four-step mission design wizard.
//!
//! `MissionWizard` is the single owner of the session's [`MissionState`].
//! Every edit swaps in a whole new state value with one slice replaced;
//! navigation is never gated on the data entered so far.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ids::ZoneIdGenerator;
use crate::mission::{Coordinates, HabitatConfig, MissionState, Zone, ZoneId};
use crate::readiness::{self, ReadinessScore};
use crate::summary::{self, MissionSummary};
use crate::surface::{self, CanvasClick, SiteError};
use crate::zones::{AllocationError, PlacementResult, ZoneAllocator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Surface,
    Habitat,
    Interior,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Surface,
        WizardStep::Habitat,
        WizardStep::Interior,
        WizardStep::Summary,
    ];
    pub const LAST_INDEX: usize = Self::ALL.len() - 1;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Surface => 0,
            WizardStep::Habitat => 1,
            WizardStep::Interior => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn id(self) -> &'static str {
        match self {
            WizardStep::Surface => "surface",
            WizardStep::Habitat => "habitat",
            WizardStep::Interior => "interior",
            WizardStep::Summary => "summary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Surface => "Surface Mapping",
            WizardStep::Habitat => "Habitat Design",
            WizardStep::Interior => "Interior Layout",
            WizardStep::Summary => "Mission Summary",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Surface => "Select landing coordinates on Mars",
            WizardStep::Habitat => "Configure exterior structure",
            WizardStep::Interior => "Plan functional zones",
            WizardStep::Summary => "Review and export design",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: WizardStep,
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(WizardStep),
    /// Already at the boundary in the requested direction.
    Stayed(WizardStep),
    /// `back()` on the first step: hand control to the surrounding app.
    Exit,
}

pub struct WizardBuilder {
    allocator: ZoneAllocator,
}

impl Default for WizardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardBuilder {
    pub fn new() -> Self {
        Self {
            allocator: ZoneAllocator::default(),
        }
    }

    pub fn with_id_generator(mut self, ids: Box<dyn ZoneIdGenerator>) -> Self {
        let radius = self.allocator.outer_visual_radius();
        self.allocator = ZoneAllocator::new(ids).with_outer_visual_radius(radius);
        self
    }

    pub fn with_outer_visual_radius(mut self, radius: f64) -> Self {
        self.allocator = self.allocator.with_outer_visual_radius(radius);
        self
    }

    pub fn build(self) -> MissionWizard {
        MissionWizard {
            step: WizardStep::Surface,
            state: MissionState::default(),
            allocator: self.allocator,
        }
    }
}

pub struct MissionWizard {
    step: WizardStep,
    state: MissionState,
    allocator: ZoneAllocator,
}

impl Default for MissionWizard {
    fn default() -> Self {
        WizardBuilder::new().build()
    }
}

impl MissionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn allocator(&self) -> &ZoneAllocator {
        &self.allocator
    }

    pub fn steps(&self) -> Vec<StepView> {
        let current = self.step.index();
        WizardStep::ALL
            .iter()
            .map(|step| {
                let index = step.index();
                let status = if index < current {
                    StepStatus::Completed
                } else if index == current {
                    StepStatus::Current
                } else {
                    StepStatus::Upcoming
                };
                StepView {
                    id: *step,
                    index,
                    title: step.title(),
                    description: step.description(),
                    status,
                }
            })
            .collect()
    }

    pub fn next(&mut self) -> Navigation {
        let index = self.step.index();
        if index >= WizardStep::LAST_INDEX {
            return Navigation::Stayed(self.step);
        }
        self.go_to(index + 1)
    }

    pub fn back(&mut self) -> Navigation {
        let index = self.step.index();
        if index == 0 {
            debug!("back from first step, exiting wizard");
            return Navigation::Exit;
        }
        self.go_to(index - 1)
    }

    fn go_to(&mut self, index: usize) -> Navigation {
        let Some(step) = WizardStep::from_index(index) else {
            return Navigation::Stayed(self.step);
        };
        debug!(from = %self.step, to = %step, "wizard step changed");
        self.step = step;
        if step == WizardStep::Summary {
            let score = self.readiness();
            info!(score = score.value, label = %score.label, "mission readiness computed");
        }
        Navigation::Moved(step)
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.state = self.state.with_coordinates(coordinates);
    }

    /// Picks the landing site from a click on the map canvas.
    pub fn select_site(&mut self, click: CanvasClick) -> Coordinates {
        let coordinates = surface::canvas_to_coordinates(click);
        info!(lat = coordinates.lat, lng = coordinates.lng, "landing site selected");
        self.set_coordinates(coordinates);
        coordinates
    }

    pub fn confirm_site(&self) -> Result<(), SiteError> {
        surface::confirm_site(&self.state.coordinates)
    }

    pub fn set_habitat(&mut self, habitat: HabitatConfig) {
        self.state = self.state.with_habitat(habitat);
    }

    pub fn add_zone(&mut self, template_name: &str) -> Result<&[Zone], AllocationError> {
        let zones = self
            .allocator
            .add_zone(
                self.state.zones(),
                &self.state.habitat.dimensions,
                template_name,
            )
            .inspect_err(|err| warn!(template = template_name, error = %err, "zone rejected"))?;
        self.state = self.state.with_zones(zones);
        Ok(self.state.zones())
    }

    /// Removes the zone with `id`; unknown ids are ignored.
    pub fn remove_zone(&mut self, id: &ZoneId) -> &[Zone] {
        let zones = self.allocator.remove_zone(self.state.zones(), id);
        self.state = self.state.with_zones(zones);
        self.state.zones()
    }

    pub fn update_zone_area(&mut self, id: &ZoneId, area: f64) -> &[Zone] {
        let zones = self.allocator.update_zone_area(self.state.zones(), id, area);
        self.state = self.state.with_zones(zones);
        self.state.zones()
    }

    pub fn placement(&self) -> Vec<PlacementResult> {
        self.allocator
            .compute_placement(self.state.zones(), self.state.habitat.dimensions.diameter)
    }

    pub fn readiness(&self) -> ReadinessScore {
        readiness::compute(&self.state)
    }

    pub fn summary(&self) -> MissionSummary {
        MissionSummary::from_state(&self.state)
    }

    pub fn share_text(&self) -> String {
        summary::share_text(&self.state)
    }

    /// Replaces the whole design, e.g. after importing an exported file.
    /// The current step is kept.
    pub fn replace_state(&mut self, state: MissionState) {
        info!(zones = state.zones().len(), "mission state replaced");
        self.state = state;
    }
}
