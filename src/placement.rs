//! Spatial placement of tiles on the cube.
//!
//! A [`Placement`] is the fixed, per-tile part of the scene: a face-level
//! rotation followed by a translation within the face. It never changes after
//! mount; the cube's own rotation is applied on top of it by the rotation
//! controller.
//!
//! ```
//! use cubic_gallery::{CubeFace, TileLayout, face_placement};
//!
//! let layout = TileLayout { grid_size: 3, item_size: 240.0, item_spacing: 40.0 };
//! let placement = face_placement(CubeFace::Front, 0, 0, &layout).unwrap();
//!
//! assert_eq!(placement.translation.z, layout.half_extent());
//! ```

use glam::{Mat4, Quat, Vec3};

use crate::error::{GalleryError, Result};
use crate::face::CubeFace;

/// Largest accepted tiles-per-edge count.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Grid and tile dimensions shared by every face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    /// Tiles along each face edge.
    pub grid_size: u32,
    /// Edge length of one tile.
    pub item_size: f32,
    /// Gap between neighbouring tiles.
    pub item_spacing: f32,
}

impl TileLayout {
    /// Reject layouts that would produce degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(GalleryError::invalid("grid size must be at least 1"));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(GalleryError::invalid(format!(
                "grid size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(self.item_size.is_finite() && self.item_size > 0.0) {
            return Err(GalleryError::invalid(format!(
                "item size must be positive, got {}",
                self.item_size
            )));
        }
        if !(self.item_spacing.is_finite() && self.item_spacing >= 0.0) {
            return Err(GalleryError::invalid(format!(
                "item spacing must be non-negative, got {}",
                self.item_spacing
            )));
        }
        Ok(())
    }

    /// Distance between the centers of neighbouring tiles.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.item_size + self.item_spacing
    }

    /// Distance from the cube center to each face.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.cell_size() * self.grid_size as f32 * 0.5
    }

    /// Offset of the first cell's center, so the grid is centered on the face.
    #[inline]
    pub fn origin(&self) -> f32 {
        -self.half_extent() + self.cell_size() * 0.5
    }
}

/// Rotation and translation placing one tile on the cube.
///
/// The rotation is applied first, then the translation in the rotated frame,
/// so a translation of `(x, y, half_extent)` always ends up on the outside of
/// the rotated face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Face-level orientation.
    pub rotation: Quat,
    /// Position of the tile within its face's frame.
    pub translation: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
        }
    }
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Cube-space matrix: `rotate · translate`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation) * Mat4::from_translation(self.translation)
    }

    /// Tile center in cube space.
    pub fn center(&self) -> Vec3 {
        self.rotation * self.translation
    }

    /// Outward normal of the tile surface in cube space.
    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Compute the placement of the tile at `(row, col)` on `face`.
pub fn face_placement(face: CubeFace, row: u32, col: u32, layout: &TileLayout) -> Result<Placement> {
    layout.validate()?;
    if row >= layout.grid_size || col >= layout.grid_size {
        return Err(GalleryError::invalid(format!(
            "cell ({row}, {col}) is outside a {0}x{0} grid",
            layout.grid_size
        )));
    }

    let cell = layout.cell_size();
    let origin = layout.origin();
    let translation = Vec3::new(
        col as f32 * cell + origin,
        row as f32 * cell + origin,
        layout.half_extent(),
    );

    Ok(Placement::new()
        .rotation(face.rotation())
        .translation(translation))
}
