//! # Cubic Gallery
//!
//! **A rotating image cube you steer with the pointer.**
//!
//! Images are laid out on the six faces of a cube in a G×G grid per face. The
//! pointer's offset from the viewport center sets a per-frame rotation rate,
//! and pressing a tile shows it enlarged in an overlay.
//!
//! The crate does no drawing itself. It computes placements and transforms,
//! resolves presses to tiles and talks to its environment through the
//! [`Host`] traits, so it runs the same against a real window or the
//! in-memory [`HeadlessHost`].
//!
//! ## Quick Start
//!
//! ```
//! use cubic_gallery::*;
//!
//! let sources: Vec<String> = (0..54).map(|i| format!("/assets/{i}.jpg")).collect();
//! let mut host = HeadlessHost::new(1280.0, 720.0);
//! let mut gallery = Gallery::mount(GalleryConfig::default(), &sources, &mut host).unwrap();
//!
//! // a press at the viewport center lands on the middle tile of the front face
//! gallery.handle_event(GalleryEvent::PointerDown(Vec2::new(640.0, 360.0)), &mut host);
//! assert_eq!(gallery.selected().map(|t| t.id), Some(TileId(4)));
//!
//! gallery.teardown(&mut host);
//! ```

mod app;
mod config;
mod enlarged;
mod error;
mod face;
mod gallery;
mod grid;
mod host;
mod input;
mod picking;
mod placement;
mod rotation;
mod scene;
mod session;
mod tile;

pub use app::{App, AppError};
pub use config::GalleryConfig;
pub use enlarged::EnlargedView;
pub use error::{GalleryError, Result};
pub use face::CubeFace;
pub use gallery::Gallery;
pub use grid::{Cell, FaceSlice, GridAllocation, allocate};
pub use host::{
    EventKind, EventSource, FrameHandle, FrameScheduler, GalleryEvent, HeadlessHost, Host,
    HostCall, ListenerHandle, ListenerScope, Phase, RenderSurface,
};
pub use input::Input;
pub use picking::{
    ElementsFromPoint, Ray, SceneView, SurfaceElement, TileHit, hit_test, raycast_tiles,
    resolve_tile,
};
pub use placement::{MAX_GRID_SIZE, Placement, TileLayout, face_placement};
pub use rotation::{ControllerState, CubeOrientation, PointerDelta, RotationController};
pub use scene::CubeScene;
pub use session::{AuthError, PasswordGate, SessionGate, Token};
pub use tile::{Tile, TileId};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
