//! Tile components stored in the scene's ECS world.
//!
//! Each tile is one `hecs` entity carrying a [`Tile`] and a
//! [`Placement`](crate::Placement). Both are written once at mount and never
//! change afterwards.

use crate::grid::Cell;

/// Type-safe handle to a tile: its position in the input sequence.
///
/// This newtype keeps tile indices from being confused with entity ids or
/// listener handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// One image placed on the cube.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: TileId,
    /// Opaque image reference, typically a URL.
    pub source: String,
    /// Face and grid cell the tile occupies.
    pub cell: Cell,
}

impl Tile {
    pub fn new(id: TileId, source: impl Into<String>, cell: Cell) -> Self {
        Self {
            id,
            source: source.into(),
            cell,
        }
    }
}
