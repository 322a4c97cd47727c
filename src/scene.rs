//! The static part of a gallery: tiles laid out on the cube.
//!
//! A [`CubeScene`] is built once per mount. It allocates the input across the
//! faces, computes each tile's placement and stores the result as entities in
//! a `hecs` world, which the picker queries directly.

use glam::{Mat4, Vec2};

use crate::error::Result;
use crate::grid::allocate;
use crate::picking::SceneView;
use crate::placement::{Placement, TileLayout, face_placement};
use crate::tile::{Tile, TileId};

/// Tiles and their fixed placements.
pub struct CubeScene {
    world: hecs::World,
    entities: Vec<hecs::Entity>,
    layout: TileLayout,
    overflow: usize,
}

impl CubeScene {
    /// Lay out `sources` on a cube with the given layout.
    ///
    /// An empty input produces an empty scene. Inputs longer than the cube's
    /// capacity keep their leading items.
    pub fn build<S: AsRef<str>>(sources: &[S], layout: TileLayout) -> Result<Self> {
        layout.validate()?;
        let allocation = allocate(sources, layout.grid_size)?;

        let mut world = hecs::World::new();
        let mut entities = Vec::with_capacity(allocation.len());
        for (index, cell, source) in allocation.cells() {
            let placement = face_placement(cell.face, cell.row, cell.col, &layout)?;
            let tile = Tile::new(TileId(index), source.as_ref(), cell);
            entities.push(world.spawn((tile, placement)));
        }

        tracing::debug!(
            tiles = entities.len(),
            overflow = allocation.overflow,
            grid_size = layout.grid_size,
            "cube scene built"
        );

        Ok(Self {
            world,
            entities,
            layout,
            overflow: allocation.overflow,
        })
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Number of placed tiles.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Input items that did not fit on the cube.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// The ECS world holding the tile entities.
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn tile(&self, id: TileId) -> Option<Tile> {
        let entity = *self.entities.get(id.0)?;
        self.world
            .get::<&Tile>(entity)
            .ok()
            .map(|tile| (*tile).clone())
    }

    pub fn placement(&self, id: TileId) -> Option<Placement> {
        let entity = *self.entities.get(id.0)?;
        self.world.get::<&Placement>(entity).ok().map(|p| *p)
    }

    /// All tiles with their placements, in input order.
    pub fn tiles(&self) -> Vec<(Tile, Placement)> {
        let mut tiles: Vec<_> = self
            .world
            .query::<(&Tile, &Placement)>()
            .iter()
            .map(|(_, (tile, placement))| (tile.clone(), *placement))
            .collect();
        tiles.sort_by_key(|(tile, _)| tile.id);
        tiles
    }

    /// View the scene through a cube transform for hit testing.
    pub fn view(&self, cube: Mat4, viewport: Vec2, perspective: f32) -> SceneView<'_> {
        SceneView {
            world: &self.world,
            cube,
            viewport,
            perspective,
            item_size: self.layout.item_size,
            overlay: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::CubeFace;
    use crate::picking::hit_test;
    use glam::Vec3;

    fn layout() -> TileLayout {
        TileLayout {
            grid_size: 3,
            item_size: 240.0,
            item_spacing: 40.0,
        }
    }

    fn sources(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/assets/{i}.png")).collect()
    }

    #[test]
    fn builds_one_entity_per_allocated_tile() {
        let scene = CubeScene::build(&sources(54), layout()).unwrap();
        assert_eq!(scene.len(), 54);
        assert_eq!(scene.overflow(), 0);

        let tiles = scene.tiles();
        assert_eq!(tiles.len(), 54);
        for (i, (tile, _)) in tiles.iter().enumerate() {
            assert_eq!(tile.id, TileId(i));
            assert_eq!(tile.source, format!("/assets/{i}.png"));
        }
    }

    #[test]
    fn front_corner_tile_placement() {
        let scene = CubeScene::build(&sources(54), layout()).unwrap();
        let tile = scene.tile(TileId(0)).unwrap();
        assert_eq!(tile.cell.face, CubeFace::Front);
        assert_eq!((tile.cell.row, tile.cell.col), (0, 0));

        let placement = scene.placement(TileId(0)).unwrap();
        assert_eq!(placement.translation.z, 420.0);
        assert_eq!(placement.rotation, glam::Quat::IDENTITY);
    }

    #[test]
    fn overflow_tiles_are_not_placed() {
        let scene = CubeScene::build(&sources(60), layout()).unwrap();
        assert_eq!(scene.len(), 54);
        assert_eq!(scene.overflow(), 6);
        assert!(scene.tile(TileId(54)).is_none());
    }

    #[test]
    fn empty_input_builds_empty_scene() {
        let empty: Vec<String> = Vec::new();
        let scene = CubeScene::build(&empty, layout()).unwrap();
        assert!(scene.is_empty());
        assert!(scene.tiles().is_empty());
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let bad = TileLayout {
            item_size: 0.0,
            ..layout()
        };
        assert!(CubeScene::build(&sources(9), bad).is_err());
    }

    #[test]
    fn center_press_hits_frontmost_face() {
        let scene = CubeScene::build(&sources(54), layout()).unwrap();
        let viewport = Vec2::new(1280.0, 720.0);
        let center = viewport * 0.5;

        let facing = Mat4::from_translation(Vec3::new(0.0, 0.0, -1200.0));
        let view = scene.view(facing, viewport, 1000.0);
        let stack: Vec<_> = view.tile_hits(center).iter().map(|h| h.tile).collect();
        // front center tile, then back center tile behind it
        assert_eq!(stack, vec![TileId(4), TileId(13)]);
        assert_eq!(hit_test(&view, center), Some(TileId(4)));

        let turned = facing * Mat4::from_rotation_y(std::f32::consts::PI);
        let view = scene.view(turned, viewport, 1000.0);
        assert_eq!(hit_test(&view, center), Some(TileId(13)));
    }

    #[test]
    fn press_in_a_gap_misses() {
        let scene = CubeScene::build(&sources(54), layout()).unwrap();
        let viewport = Vec2::new(1280.0, 720.0);
        let facing = Mat4::from_translation(Vec3::new(0.0, 0.0, -1200.0));
        let view = scene.view(facing, viewport, 1000.0);

        // Gap between column 1 and 2 of the front face is at x = 140 in cube
        // space, scaled by perspective onto the screen plane.
        let scale = 1000.0 / (1000.0 + 1200.0 - 420.0);
        let gap = viewport * 0.5 + Vec2::new(140.0 * scale, 0.0);
        let stack: Vec<_> = view.tile_hits(gap).iter().map(|h| h.tile).collect();
        assert!(!stack.contains(&TileId(4)));
        assert!(!stack.contains(&TileId(5)));
    }
}
