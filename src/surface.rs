//! Landing-site selection on the flat map projection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mission::Coordinates;

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("please select a landing site first")]
    NoSiteSelected,
}

/// A click at `(x, y)` on a `width` x `height` canvas, measured from its
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasClick {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// Half-way values round up, matching the browser's Math.round.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Maps a canvas click to whole-degree coordinates.
///
/// The canvas centre is `(0, 0)`; the edges map to ±180° longitude and ±90°
/// latitude. Clicks outside the canvas are clamped to the projection bounds.
pub fn canvas_to_coordinates(click: CanvasClick) -> Coordinates {
    let half_width = click.width / 2.0;
    let half_height = click.height / 2.0;
    if half_width <= 0.0 || half_height <= 0.0 {
        return Coordinates::default();
    }
    let rel_x = (click.x - half_width) / half_width;
    let rel_y = (click.y - half_height) / half_height;
    let lng = round_half_up(rel_x * MAX_LONGITUDE).clamp(-MAX_LONGITUDE, MAX_LONGITUDE);
    let lat = round_half_up(rel_y * MAX_LATITUDE).clamp(-MAX_LATITUDE, MAX_LATITUDE);
    Coordinates { lat, lng }
}

pub fn confirm_site(coordinates: &Coordinates) -> Result<(), SiteError> {
    if coordinates.is_selected() {
        Ok(())
    } else {
        Err(SiteError::NoSiteSelected)
    }
}
