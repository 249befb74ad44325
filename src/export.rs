//! JSON export and import of a mission design.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::mission::{MissionState, MIN_ZONE_AREA};

pub const DEFAULT_FILE_NAME: &str = "mars-habitat-design.json";

pub fn to_json(state: &MissionState) -> Result<String> {
    serde_json::to_string_pretty(state).context("Failed to serialize mission design")
}

pub fn from_json(text: &str) -> Result<MissionState> {
    let state: MissionState =
        serde_json::from_str(text).context("Failed to parse mission design")?;
    validate(&state)?;
    Ok(state)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<MissionState> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read design file {}", path.display()))?;
    from_json(&data).with_context(|| format!("Invalid design file {}", path.display()))
}

/// Rejects designs a live session could never have produced.
pub fn validate(state: &MissionState) -> Result<()> {
    let mut seen = HashSet::new();
    for zone in state.zones() {
        if !seen.insert(zone.id.as_str()) {
            bail!("zone id '{}' appears more than once", zone.id);
        }
        if !zone.area.is_finite() {
            bail!("zone '{}' has non-finite area {}", zone.id, zone.area);
        }
        if zone.area < MIN_ZONE_AREA {
            bail!(
                "zone '{}' has area {} below the {} m² minimum",
                zone.id,
                zone.area,
                MIN_ZONE_AREA
            );
        }
    }
    Ok(())
}

/// Writes exported designs into a fixed directory.
pub struct DesignExporter {
    dir: PathBuf,
    file_name: String,
}

impl DesignExporter {
    pub fn new(dir: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn write(&self, state: &MissionState) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create export dir {}", self.dir.display()))?;
        let path = self.path();
        let json = to_json(state)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write design file {}", path.display()))?;
        info!(path = %path.display(), zones = state.zones().len(), "design exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::{Zone, ZoneId};

    fn zone(id: &str, area: f64) -> Zone {
        Zone {
            id: ZoneId::new(id),
            name: "Storage".into(),
            area,
        }
    }

    #[test]
    fn export_uses_camel_case_field_names() {
        let json = to_json(&MissionState::default()).unwrap();
        for field in [
            "\"coordinates\"",
            "\"lat\"",
            "\"lng\"",
            "\"habitat\"",
            "\"type\": \"metallic\"",
            "\"crewSize\": 4",
            "\"duration\": 500",
            "\"dimensions\"",
            "\"diameter\"",
            "\"height\"",
            "\"interior\"",
            "\"zones\": []",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let state = MissionState::default().with_zones(vec![zone("a", 4.0), zone("a", 5.0)]);
        let err = validate(&state).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn undersized_zone_is_rejected() {
        let state = MissionState::default().with_zones(vec![zone("a", 0.5)]);
        assert!(validate(&state).is_err());
    }

    #[test]
    fn non_finite_zone_is_rejected() {
        let state = MissionState::default().with_zones(vec![zone("a", f64::INFINITY)]);
        let err = validate(&state).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
        let state = MissionState::default().with_zones(vec![zone("b", f64::NAN)]);
        assert!(validate(&state).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(from_json("{ \"coordinates\": ").is_err());
    }
}
