//! Gallery configuration.
//!
//! [`GalleryConfig`] follows the builder style used elsewhere in the crate and
//! can also be loaded from TOML. Every field is optional in the file; missing
//! fields fall back to the defaults below.
//!
//! ```toml
//! grid_size = 3
//! item_size = 240.0
//! item_spacing = 40.0
//! sensitivity = 1.25
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{GalleryError, Result};
use crate::placement::TileLayout;

/// Configuration for a single gallery instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Number of tiles along each edge of a face.
    pub grid_size: u32,
    /// Edge length of one tile, in surface units (pixels).
    pub item_size: f32,
    /// Gap between neighbouring tiles.
    pub item_spacing: f32,
    /// Degrees per frame added when the pointer sits on the viewport edge.
    pub sensitivity: f32,
    /// How far the cube is pushed away from the viewer.
    pub viewing_distance: f32,
    /// Distance from the viewer to the screen plane.
    pub perspective: f32,
    /// Normalize yaw and pitch into `[0, 360)` after every frame.
    pub wrap_angles: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            item_size: 240.0,
            item_spacing: 40.0,
            sensitivity: 1.25,
            viewing_distance: 1200.0,
            perspective: 1000.0,
            wrap_angles: false,
        }
    }
}

impl GalleryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GalleryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set tile edge length and the gap between tiles.
    pub fn item(mut self, size: f32, spacing: f32) -> Self {
        self.item_size = size;
        self.item_spacing = spacing;
        self
    }

    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn viewing_distance(mut self, distance: f32) -> Self {
        self.viewing_distance = distance;
        self
    }

    pub fn perspective(mut self, perspective: f32) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn wrap_angles(mut self, wrap: bool) -> Self {
        self.wrap_angles = wrap;
        self
    }

    /// Tile layout parameters consumed by the placement calculator.
    pub fn layout(&self) -> TileLayout {
        TileLayout {
            grid_size: self.grid_size,
            item_size: self.item_size,
            item_spacing: self.item_spacing,
        }
    }

    /// Reject configurations that cannot produce a usable cube.
    pub fn validate(&self) -> Result<()> {
        self.layout().validate()?;

        if !self.sensitivity.is_finite() {
            return Err(GalleryError::invalid("sensitivity must be finite"));
        }
        if !self.viewing_distance.is_finite() {
            return Err(GalleryError::invalid("viewing distance must be finite"));
        }
        if !(self.perspective.is_finite() && self.perspective > 0.0) {
            return Err(GalleryError::invalid(format!(
                "perspective must be positive, got {}",
                self.perspective
            )));
        }
        Ok(())
    }
}
