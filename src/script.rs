use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    mission::{Coordinates, HabitatConfig, MissionState},
    summary::MissionSummary,
    surface::CanvasClick,
    wizard::{MissionWizard, Navigation, WizardStep},
};

/// A design session written down as YAML and replayed through the wizard.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignScript {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub site: Option<SiteInput>,
    #[serde(default)]
    pub habitat: Option<HabitatConfig>,
    #[serde(default)]
    pub zones: Vec<ZoneRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SiteInput {
    Click { click: CanvasClick },
    Coordinates(Coordinates),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRequest {
    pub template: String,
    /// Resize applied right after the zone is created.
    #[serde(default)]
    pub area: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub name: String,
    pub notices: Vec<String>,
    pub state: MissionState,
    pub summary: MissionSummary,
}

pub struct ScriptLoader {
    base_dir: PathBuf,
}

impl ScriptLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<DesignScript> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read design script {}", path.display()))?;
        let script: DesignScript = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(script)
    }
}

impl DesignScript {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse design script")
    }

    /// Walks the wizard from the surface step to the summary, applying each
    /// section on its own step. Rejected zones become notices.
    pub fn run(&self, wizard: &mut MissionWizard) -> ScriptOutcome {
        while wizard.back() != Navigation::Exit {}
        let mut notices = Vec::new();

        match &self.site {
            Some(SiteInput::Click { click }) => {
                wizard.select_site(*click);
            }
            Some(SiteInput::Coordinates(coordinates)) => wizard.set_coordinates(*coordinates),
            None => {}
        }
        if let Err(err) = wizard.confirm_site() {
            notices.push(err.to_string());
        }
        wizard.next();

        if let Some(habitat) = &self.habitat {
            wizard.set_habitat(habitat.clone());
        }
        wizard.next();

        for request in &self.zones {
            let created = match wizard.add_zone(&request.template) {
                Ok(zones) => zones.last().map(|zone| zone.id.clone()),
                Err(err) => {
                    notices.push(format!("{}: {err}", request.template));
                    None
                }
            };
            if let (Some(id), Some(area)) = (created, request.area) {
                wizard.update_zone_area(&id, area);
            }
        }
        wizard.next();
        debug_assert_eq!(wizard.current_step(), WizardStep::Summary);

        if !notices.is_empty() {
            warn!(script = %self.name, count = notices.len(), "design script produced notices");
        }
        info!(script = %self.name, zones = wizard.state().zones().len(), "design script replayed");
        ScriptOutcome {
            name: self.name.clone(),
            notices,
            state: wizard.state().clone(),
            summary: wizard.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_accepts_coordinates_or_click() {
        let script = DesignScript::from_yaml(
            "name: a\nsite: { lat: 12, lng: -40 }\n",
        )
        .unwrap();
        assert!(matches!(
            script.site,
            Some(SiteInput::Coordinates(Coordinates { lat, lng })) if lat == 12.0 && lng == -40.0
        ));

        let script = DesignScript::from_yaml(
            "name: b\nsite:\n  click: { x: 450, y: 150, width: 600, height: 600 }\n",
        )
        .unwrap();
        assert!(matches!(script.site, Some(SiteInput::Click { .. })));
    }

    #[test]
    fn missing_site_becomes_a_notice() {
        let script = DesignScript::from_yaml("name: empty\n").unwrap();
        let mut wizard = MissionWizard::new();
        let outcome = script.run(&mut wizard);
        assert_eq!(outcome.notices, vec!["please select a landing site first"]);
        assert_eq!(wizard.current_step(), WizardStep::Summary);
    }

    #[test]
    fn click_site_is_projected() {
        let script = DesignScript::from_yaml(
            "name: click\nsite:\n  click: { x: 450, y: 150, width: 600, height: 600 }\n",
        )
        .unwrap();
        let outcome = script.run(&mut MissionWizard::new());
        assert_eq!(outcome.state.coordinates, Coordinates::new(-45.0, 90.0));
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn requested_area_is_applied_after_creation() {
        let script = DesignScript::from_yaml(
            "name: resize\nzones:\n  - template: Storage\n    area: 12.5\n  - template: Airlock\n",
        )
        .unwrap();
        let outcome = script.run(&mut MissionWizard::new());
        let areas: Vec<f64> = outcome.state.zones().iter().map(|z| z.area).collect();
        assert_eq!(areas, vec![12.5, 3.0]);
    }

    #[test]
    fn infinite_area_still_exports_and_imports() {
        let script = DesignScript::from_yaml(
            "name: unbounded\nzones:\n  - template: Storage\n    area: .inf\n",
        )
        .unwrap();
        let outcome = script.run(&mut MissionWizard::new());
        assert_eq!(outcome.state.zones()[0].area, 1.0);

        let json = crate::export::to_json(&outcome.state).unwrap();
        assert!(!json.contains("null"), "{json}");
        let restored = crate::export::from_json(&json).unwrap();
        assert_eq!(restored, outcome.state);
    }
}
