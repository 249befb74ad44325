pub mod config;
pub mod export;
pub mod geometry;
pub mod ids;
pub mod mission;
pub mod readiness;
pub mod script;
pub mod summary;
pub mod surface;
pub mod web;
pub mod wizard;
pub mod zones;

pub use config::DesignerConfig;
pub use mission::{Coordinates, HabitatConfig, HabitatDimensions, HabitatType, MissionState, Zone, ZoneId};
pub use wizard::{MissionWizard, Navigation, WizardBuilder, WizardStep};
