//! The boundary between a gallery and the environment that displays it.
//!
//! A gallery never talks to a window system directly. Everything it needs from
//! the outside world is expressed by three traits:
//!
//! - [`FrameScheduler`]: request and cancel "call me before the next repaint"
//! - [`EventSource`]: register and remove pointer listeners
//! - [`RenderSurface`]: receive tile placements, the cube transform and the
//!   enlarged overlay
//!
//! Anything implementing all three is a [`Host`]. [`HeadlessHost`] is an
//! in-memory implementation that records every call, used by the demo binary
//! and the tests.

use std::collections::HashMap;

use glam::{Mat4, Vec2};

use crate::tile::TileId;

/// Identifies one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Kinds of pointer notification a gallery listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// The whole document, above every transformed descendant.
    Global,
    /// The cube element only.
    Cube,
}

/// When a listener runs relative to target delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before any descendant sees the event.
    Capture,
    /// After the target, on the way back up.
    Bubble,
}

/// Events a host feeds into a mounted gallery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GalleryEvent {
    /// Pointer moved to a position in viewport coordinates.
    PointerMove(Vec2),
    /// Primary button pressed at a position in viewport coordinates.
    PointerDown(Vec2),
    /// A previously requested frame is due.
    Frame(FrameHandle),
    /// The viewport changed size.
    Resize(Vec2),
}

impl GalleryEvent {
    /// The listener kind that must be registered for this event to be delivered.
    pub fn listener_kind(&self) -> Option<EventKind> {
        match self {
            GalleryEvent::PointerMove(_) => Some(EventKind::PointerMove),
            GalleryEvent::PointerDown(_) => Some(EventKind::PointerDown),
            GalleryEvent::Frame(_) | GalleryEvent::Resize(_) => None,
        }
    }
}

/// The host's frame-timing primitive.
pub trait FrameScheduler {
    /// Ask to be called back once before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request made by [`FrameScheduler::request_frame`].
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Listener registration on the host's event system.
pub trait EventSource {
    fn listen(&mut self, kind: EventKind, scope: ListenerScope, phase: Phase) -> ListenerHandle;
    fn unlisten(&mut self, handle: ListenerHandle);
}

/// The visual output of a gallery.
pub trait RenderSurface {
    /// Current viewport size in surface units.
    fn viewport(&self) -> Vec2;
    /// Fix a tile's cube-space matrix. Called once per tile at mount.
    fn place_tile(&mut self, tile: TileId, matrix: Mat4);
    /// Replace the transform applied to the whole cube.
    fn set_cube_transform(&mut self, matrix: Mat4);
    /// Show `source` in the enlarged overlay at `scale`; `None` keeps the last image.
    fn set_overlay(&mut self, source: Option<&str>, scale: f32);
}

/// Everything a gallery needs from its environment.
pub trait Host: FrameScheduler + EventSource + RenderSurface {}

impl<T: FrameScheduler + EventSource + RenderSurface> Host for T {}

/// One call a [`HeadlessHost`] received, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
    Listen(ListenerHandle, EventKind, ListenerScope, Phase),
    Unlisten(ListenerHandle),
}

#[derive(Clone, Copy, Debug)]
struct Listener {
    handle: ListenerHandle,
    kind: EventKind,
    scope: ListenerScope,
    phase: Phase,
}

/// An in-memory host with no window behind it.
///
/// Frame requests queue up until [`HeadlessHost::next_frame`] takes them, which
/// stands in for the display's refresh tick.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: Vec2,
    last_id: u64,
    pending_frames: Vec<FrameHandle>,
    listeners: Vec<Listener>,
    calls: Vec<HostCall>,
    /// Latest cube transform pushed by the gallery.
    pub cube_transform: Option<Mat4>,
    /// Per-tile matrices pushed at mount.
    pub tile_matrices: HashMap<TileId, Mat4>,
    /// Image shown in the overlay, if any.
    pub overlay_source: Option<String>,
    /// Overlay scale: 0 collapsed, 1 expanded.
    pub overlay_scale: f32,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) -> GalleryEvent {
        self.viewport = Vec2::new(width, height);
        GalleryEvent::Resize(self.viewport)
    }

    /// Pop the oldest pending frame request, as the display tick would.
    pub fn next_frame(&mut self) -> Option<GalleryEvent> {
        if self.pending_frames.is_empty() {
            return None;
        }
        Some(GalleryEvent::Frame(self.pending_frames.remove(0)))
    }

    /// Number of frame requests not yet delivered or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Whether a listener of `kind` is registered in any scope.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|l| l.kind == kind)
    }

    /// Scope and phase of the registered listener of `kind`, if any.
    pub fn listener(&self, kind: EventKind) -> Option<(ListenerScope, Phase)> {
        self.listeners
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| (l.scope, l.phase))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the event would reach the gallery: pointer events need a
    /// listener, frame events need an outstanding request.
    pub fn would_deliver(&self, event: &GalleryEvent) -> bool {
        match event {
            GalleryEvent::Frame(handle) => self.pending_frames.contains(handle),
            GalleryEvent::Resize(_) => true,
            other => other
                .listener_kind()
                .is_some_and(|kind| self.is_listening(kind)),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending_frames.push(handle);
        self.calls.push(HostCall::RequestFrame(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_frames.retain(|h| *h != handle);
        self.calls.push(HostCall::CancelFrame(handle));
    }
}

impl EventSource for HeadlessHost {
    fn listen(&mut self, kind: EventKind, scope: ListenerScope, phase: Phase) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id());
        self.listeners.push(Listener {
            handle,
            kind,
            scope,
            phase,
        });
        self.calls.push(HostCall::Listen(handle, kind, scope, phase));
        handle
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|l| l.handle != handle);
        self.calls.push(HostCall::Unlisten(handle));
    }
}

impl RenderSurface for HeadlessHost {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn place_tile(&mut self, tile: TileId, matrix: Mat4) {
        self.tile_matrices.insert(tile, matrix);
    }

    fn set_cube_transform(&mut self, matrix: Mat4) {
        self.cube_transform = Some(matrix);
    }

    fn set_overlay(&mut self, source: Option<&str>, scale: f32) {
        if let Some(source) = source {
            self.overlay_source = Some(source.to_string());
        }
        self.overlay_scale = scale;
    }
}
