//! Resolving pointer presses to tiles.
//!
//! Native event targeting is unreliable when many 3D-transformed surfaces
//! overlap on screen: the nominal target can be a tile that is hidden behind
//! another, or delivery can be suppressed altogether. Picking therefore never
//! trusts a target. Instead it asks for *every* element under the pointer,
//! front to back, and takes the first one that is a tile.
//!
//! - [`Ray`]: a ray from the perspective eye through a viewport point
//! - [`ElementsFromPoint`]: the "everything under this point" capability
//! - [`SceneView`]: an implementation that ray-casts against the tile quads
//! - [`resolve_tile`]: the selection policy
//!
//! # Example
//!
//! ```
//! use cubic_gallery::{SurfaceElement, TileId, resolve_tile};
//!
//! let stack = [SurfaceElement::Backdrop, SurfaceElement::Tile(TileId(7))];
//! assert_eq!(resolve_tile(stack), Some(TileId(7)));
//! ```

use glam::{Mat4, Vec2, Vec3};

use crate::placement::Placement;
use crate::tile::{Tile, TileId};

/// A ray in 3D space, used for picking.
///
/// The direction is always normalized, so distances along the ray are in
/// surface units.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// The starting point of the ray.
    pub origin: Vec3,
    /// The normalized direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with the given origin and direction.
    ///
    /// The direction will be normalized automatically.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from the perspective eye through a viewport point.
    ///
    /// The screen plane is `z = 0` with the viewport center at the origin, x
    /// to the right and y downward. The eye sits `perspective` units in front
    /// of the plane, on the axis through the viewport center.
    ///
    /// # Arguments
    ///
    /// * `point` - Pointer position in viewport coordinates
    /// * `viewport` - Viewport size
    /// * `perspective` - Distance from the eye to the screen plane
    pub fn from_viewport(point: Vec2, viewport: Vec2, perspective: f32) -> Self {
        let on_plane = (point - viewport * 0.5).extend(0.0);
        let eye = Vec3::new(0.0, 0.0, perspective);
        Self::new(eye, on_plane - eye)
    }

    /// Get a point along the ray at the given distance from the origin.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Test intersection with a square quad.
    ///
    /// Returns the distance along the ray to the intersection point, or `None`
    /// if the ray misses, runs parallel to the quad, or the quad is behind the
    /// origin. Both faces of the quad are hittable.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the quad
    /// * `u_axis` - Unit vector along the quad's horizontal edge
    /// * `v_axis` - Unit vector along the quad's vertical edge
    /// * `half_size` - Half the edge length
    pub fn intersect_quad(
        &self,
        center: Vec3,
        u_axis: Vec3,
        v_axis: Vec3,
        half_size: f32,
    ) -> Option<f32> {
        let normal = u_axis.cross(v_axis);
        let denom = normal.dot(self.direction);
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = normal.dot(center - self.origin) / denom;
        if t <= 0.0 {
            return None;
        }

        let local = self.point_at(t) - center;
        if local.dot(u_axis).abs() <= half_size && local.dot(v_axis).abs() <= half_size {
            Some(t)
        } else {
            None
        }
    }
}

/// Something on the rendering surface that a pointer can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceElement {
    /// A tile on the cube.
    Tile(TileId),
    /// The enlarged-view overlay.
    Overlay,
    /// The container behind the cube.
    Backdrop,
}

impl SurfaceElement {
    /// The tile identity this element carries, if any.
    pub fn tile(&self) -> Option<TileId> {
        match self {
            SurfaceElement::Tile(id) => Some(*id),
            _ => None,
        }
    }
}

/// Lists every element intersecting a point, frontmost first.
///
/// Hosts with their own hit-testing can implement this directly; otherwise
/// [`SceneView`] computes it from the tile geometry.
pub trait ElementsFromPoint {
    fn elements_from_point(&self, point: Vec2) -> Vec<SurfaceElement>;
}

/// Select the first element in front-to-back order that is a tile.
pub fn resolve_tile(elements: impl IntoIterator<Item = SurfaceElement>) -> Option<TileId> {
    elements.into_iter().find_map(|element| element.tile())
}

/// Query `surface` at `point` and resolve the press to a tile.
pub fn hit_test(surface: &impl ElementsFromPoint, point: Vec2) -> Option<TileId> {
    let hit = resolve_tile(surface.elements_from_point(point));
    if hit.is_none() {
        tracing::trace!(x = point.x, y = point.y, "press matched no tile");
    }
    hit
}

/// Information about a ray-tile intersection.
#[derive(Clone, Copy, Debug)]
pub struct TileHit {
    /// The tile that was hit.
    pub tile: TileId,
    /// The entity carrying the tile.
    pub entity: hecs::Entity,
    /// Distance from the eye to the hit point.
    pub distance: f32,
    /// View-space position of the hit point.
    pub point: Vec3,
}

/// Cast a ray against every tile in `world` after applying `cube`.
///
/// Each tile is treated as an `item_size`-wide square centered on its
/// placement. Returns all hits sorted by distance, closest first.
pub fn raycast_tiles(world: &hecs::World, ray: &Ray, cube: Mat4, item_size: f32) -> Vec<TileHit> {
    let half_size = item_size * 0.5;
    let mut hits = Vec::new();

    for (entity, (tile, placement)) in world.query::<(&Tile, &Placement)>().iter() {
        let m = cube * placement.matrix();
        let center = m.transform_point3(Vec3::ZERO);
        let u_axis = m.transform_vector3(Vec3::X).normalize_or_zero();
        let v_axis = m.transform_vector3(Vec3::Y).normalize_or_zero();

        if let Some(distance) = ray.intersect_quad(center, u_axis, v_axis, half_size) {
            hits.push(TileHit {
                tile: tile.id,
                entity,
                distance,
                point: ray.point_at(distance),
            });
        }
    }

    // Sort by distance (closest first), ties broken by declaration order
    hits.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.tile.cmp(&b.tile))
    });

    hits
}

/// A tile world seen through a particular cube transform and viewport.
pub struct SceneView<'a> {
    pub world: &'a hecs::World,
    pub cube: Mat4,
    pub viewport: Vec2,
    pub perspective: f32,
    pub item_size: f32,
    /// Whether the enlarged overlay is showing. It covers the whole viewport.
    pub overlay: bool,
}

impl SceneView<'_> {
    /// Put the full-viewport overlay on top of every stack.
    pub fn with_overlay(mut self, shown: bool) -> Self {
        self.overlay = shown;
        self
    }

    /// All tiles under `point`, closest first.
    pub fn tile_hits(&self, point: Vec2) -> Vec<TileHit> {
        let ray = Ray::from_viewport(point, self.viewport, self.perspective);
        raycast_tiles(self.world, &ray, self.cube, self.item_size)
    }
}

impl ElementsFromPoint for SceneView<'_> {
    fn elements_from_point(&self, point: Vec2) -> Vec<SurfaceElement> {
        self.overlay
            .then_some(SurfaceElement::Overlay)
            .into_iter()
            .chain(
                self.tile_hits(point)
                    .into_iter()
                    .map(|hit| SurfaceElement::Tile(hit.tile)),
            )
            .chain(std::iter::once(SurfaceElement::Backdrop))
            .collect()
    }
}
