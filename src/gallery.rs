//! A mounted gallery instance.
//!
//! [`Gallery`] owns every piece of per-gallery state: the tile scene, the
//! rotation controller and the enlarged view. Nothing is global, so several
//! galleries can live side by side, each driven by its own host.
//!
//! # Example
//!
//! ```
//! use cubic_gallery::{Gallery, GalleryConfig, GalleryEvent, HeadlessHost, Vec2};
//!
//! let sources: Vec<String> = (0..54).map(|i| format!("/assets/{i}.jpg")).collect();
//! let mut host = HeadlessHost::new(1280.0, 720.0);
//! let mut gallery = Gallery::mount(GalleryConfig::default(), &sources, &mut host).unwrap();
//!
//! gallery.handle_event(GalleryEvent::PointerMove(Vec2::new(0.0, 360.0)), &mut host);
//! while let Some(frame) = host.next_frame() {
//!     gallery.handle_event(frame, &mut host);
//!     if gallery.orientation().yaw > 10.0 {
//!         break;
//!     }
//! }
//!
//! gallery.teardown(&mut host);
//! assert_eq!(host.pending_frames(), 0);
//! ```

use glam::Vec2;

use crate::config::GalleryConfig;
use crate::enlarged::EnlargedView;
use crate::error::Result;
use crate::host::{EventKind, GalleryEvent, Host, ListenerHandle, ListenerScope, Phase};
use crate::picking::{ElementsFromPoint, SurfaceElement, resolve_tile};
use crate::rotation::{CubeOrientation, RotationController};
use crate::scene::CubeScene;
use crate::tile::{Tile, TileId};

#[derive(Clone, Copy, Debug)]
struct Listeners {
    pointer_move: ListenerHandle,
    pointer_down: ListenerHandle,
}

/// One gallery, from mount to teardown.
pub struct Gallery {
    config: GalleryConfig,
    scene: CubeScene,
    rotation: RotationController,
    view: EnlargedView,
    viewport: Vec2,
    listeners: Option<Listeners>,
}

impl Gallery {
    /// Lay out `sources`, hand the placements to the host and start rotating.
    ///
    /// Fails with [`GalleryError::InvalidConfiguration`](crate::GalleryError)
    /// before touching the host if the configuration is unusable. An empty
    /// `sources` mounts an empty cube.
    pub fn mount<S: AsRef<str>>(
        config: GalleryConfig,
        sources: &[S],
        host: &mut impl Host,
    ) -> Result<Self> {
        config.validate()?;
        let scene = CubeScene::build(sources, config.layout())?;

        for (tile, placement) in scene.tiles() {
            host.place_tile(tile.id, placement.matrix());
        }

        let mut rotation = RotationController::new()
            .sensitivity(config.sensitivity)
            .viewing_distance(config.viewing_distance)
            .wrap_angles(config.wrap_angles);
        host.set_cube_transform(rotation.cube_matrix());
        host.set_overlay(None, 0.0);

        let pointer_move = host.listen(EventKind::PointerMove, ListenerScope::Global, Phase::Bubble);
        // Transformed descendants can swallow target delivery, so presses are
        // taken at document level before anything else sees them.
        let pointer_down = host.listen(EventKind::PointerDown, ListenerScope::Global, Phase::Capture);
        rotation.start(host);

        let viewport = host.viewport();
        tracing::info!(
            tiles = scene.len(),
            width = viewport.x,
            height = viewport.y,
            "gallery mounted"
        );

        Ok(Self {
            config,
            scene,
            rotation,
            view: EnlargedView::default(),
            viewport,
            listeners: Some(Listeners {
                pointer_move,
                pointer_down,
            }),
        })
    }

    /// Whether listeners are registered and the gallery reacts to events.
    pub fn is_mounted(&self) -> bool {
        self.listeners.is_some()
    }

    /// Whether the frame loop is running.
    pub fn is_active(&self) -> bool {
        self.rotation.is_active()
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn orientation(&self) -> CubeOrientation {
        self.rotation.orientation()
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn scene(&self) -> &CubeScene {
        &self.scene
    }

    pub fn enlarged(&self) -> &EnlargedView {
        &self.view
    }

    pub fn tile(&self, id: TileId) -> Option<Tile> {
        self.scene.tile(id)
    }

    /// All placed tiles in input order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.scene.tiles().into_iter().map(|(tile, _)| tile).collect()
    }

    /// The tile currently shown enlarged.
    pub fn selected(&self) -> Option<Tile> {
        self.view.selected().and_then(|id| self.scene.tile(id))
    }

    /// Dispatch one host event. Ignored once torn down.
    pub fn handle_event(&mut self, event: GalleryEvent, host: &mut impl Host) {
        if !self.is_mounted() {
            tracing::trace!(?event, "event after teardown ignored");
            return;
        }

        match event {
            GalleryEvent::PointerMove(position) => {
                self.rotation.pointer_moved(position, self.viewport);
            }
            GalleryEvent::PointerDown(position) => {
                let elements = self
                    .scene
                    .view(self.rotation.cube_matrix(), self.viewport, self.config.perspective)
                    .with_overlay(self.view.is_expanded())
                    .elements_from_point(position);
                self.apply_press(elements, host);
            }
            GalleryEvent::Frame(handle) => {
                if let Some(matrix) = self.rotation.advance_frame(handle, host) {
                    host.set_cube_transform(matrix);
                }
            }
            GalleryEvent::Resize(size) => {
                self.viewport = size;
            }
        }
    }

    /// Handle a press using a host-provided element query instead of the
    /// built-in scene ray cast.
    pub fn press_with(
        &mut self,
        position: Vec2,
        surface: &impl ElementsFromPoint,
        host: &mut impl Host,
    ) {
        if !self.is_mounted() {
            return;
        }
        let elements = surface.elements_from_point(position);
        self.apply_press(elements, host);
    }

    fn apply_press(&mut self, elements: Vec<SurfaceElement>, host: &mut impl Host) {
        if elements.first() == Some(&SurfaceElement::Overlay) {
            self.dismiss(host);
            return;
        }

        match resolve_tile(elements) {
            Some(id) => {
                self.select(id, host);
            }
            None => tracing::trace!("press matched no tile"),
        }
    }

    /// Expand `id` in the overlay, replacing any tile already shown.
    ///
    /// Returns `false` if no such tile is placed.
    /// Ignored once torn down.
    pub fn select(&mut self, id: TileId, host: &mut impl Host) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let Some(tile) = self.scene.tile(id) else {
            return false;
        };
        let replaced = self.view.expand(tile.id, tile.source.clone());
        host.set_overlay(Some(&tile.source), self.view.scale());
        tracing::debug!(tile = id.0, source = %tile.source, ?replaced, "tile selected");
        true
    }

    /// Collapse the overlay. Ignored once torn down.
    pub fn dismiss(&mut self, host: &mut impl Host) {
        if !self.is_mounted() {
            return;
        }
        if self.view.collapse() {
            host.set_overlay(None, self.view.scale());
            tracing::debug!("overlay dismissed");
        }
    }

    /// Release listeners and halt the frame loop.
    ///
    /// Unregisters the pointer-move listener, then the global press listener,
    /// then cancels the pending frame. Safe to call more than once.
    pub fn teardown(&mut self, host: &mut impl Host) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        host.unlisten(listeners.pointer_move);
        host.unlisten(listeners.pointer_down);
        self.rotation.stop(host);
        tracing::info!("gallery torn down");
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        if self.is_mounted() {
            tracing::warn!("gallery dropped without teardown, host callbacks still registered");
        }
    }
}
