//! Application configuration loaded from YAML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::export::{DesignExporter, DEFAULT_FILE_NAME};
use crate::ids::IdStrategy;
use crate::wizard::{MissionWizard, WizardBuilder};
use crate::zones::DEFAULT_OUTER_VISUAL_RADIUS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignerConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub ids: IdConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_export_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            file_name: default_export_file_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_outer_visual_radius")]
    pub outer_visual_radius: f64,
}

fn default_outer_visual_radius() -> f64 {
    DEFAULT_OUTER_VISUAL_RADIUS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            outer_visual_radius: default_outer_visual_radius(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
    #[serde(default = "default_id_seed")]
    pub seed: u64,
}

fn default_id_seed() -> u64 {
    7
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            strategy: IdStrategy::default(),
            seed: default_id_seed(),
        }
    }
}

impl DesignerConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Loads `path` when given, otherwise falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml(path),
            None => Ok(Self::default()),
        }
    }

    pub fn wizard(&self) -> MissionWizard {
        WizardBuilder::new()
            .with_id_generator(self.ids.strategy.build(self.ids.seed))
            .with_outer_visual_radius(self.layout.outer_visual_radius)
            .build()
    }

    pub fn exporter(&self) -> DesignExporter {
        DesignExporter::new(&self.export.dir, self.export.file_name.clone())
    }
}
