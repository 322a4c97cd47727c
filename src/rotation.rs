use glam::{Mat4, Vec2, Vec3};

use crate::host::{FrameHandle, FrameScheduler};

/// Per-frame angular increment derived from where the pointer sits.
///
/// The pointer's offset from the viewport center, as a fraction of the
/// viewport, is scaled by the sensitivity. Holding the pointer still off
/// center keeps the cube spinning at a steady rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDelta {
    /// Degrees added to yaw each frame.
    pub yaw: f32,
    /// Degrees added to pitch each frame.
    pub pitch: f32,
}

impl PointerDelta {
    pub const ZERO: PointerDelta = PointerDelta {
        yaw: 0.0,
        pitch: 0.0,
    };

    /// Delta for a pointer at `position` within a `viewport`-sized surface.
    ///
    /// Moving right spins the cube toward negative yaw, moving down toward
    /// positive pitch. An empty viewport yields no movement.
    pub fn from_pointer(position: Vec2, viewport: Vec2, sensitivity: f32) -> Self {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Self::ZERO;
        }
        let normalized = position / viewport;
        Self {
            yaw: -(normalized.x - 0.5) * sensitivity,
            pitch: (normalized.y - 0.5) * sensitivity,
        }
    }
}

/// Accumulated rotation of the whole cube, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubeOrientation {
    /// Rotation about the vertical axis.
    pub yaw: f32,
    /// Rotation about the horizontal axis.
    pub pitch: f32,
}

impl CubeOrientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn apply(&mut self, delta: PointerDelta) {
        self.yaw += delta.yaw;
        self.pitch += delta.pitch;
    }

    /// Both angles folded into `[0, 360)`.
    pub fn wrapped(self) -> Self {
        Self {
            yaw: self.yaw.rem_euclid(360.0),
            pitch: self.pitch.rem_euclid(360.0),
        }
    }

    /// Rotation part of the cube transform: yaw outer, pitch inner.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians()) * Mat4::from_rotation_x(self.pitch.to_radians())
    }

    /// Full cube transform: push back by `viewing_distance`, then rotate.
    pub fn cube_matrix(&self, viewing_distance: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -viewing_distance)) * self.rotation_matrix()
    }
}

/// Whether the frame loop is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// No frame request outstanding.
    Idle,
    /// Waiting for `pending` to be delivered.
    Active { pending: FrameHandle },
}

/// Drives the cube's orientation from pointer input, one frame at a time.
///
/// # Example
/// ```
/// use cubic_gallery::{HeadlessHost, RotationController, GalleryEvent, Vec2};
///
/// let mut host = HeadlessHost::new(800.0, 600.0);
/// let mut rotation = RotationController::new().sensitivity(1.25);
///
/// rotation.start(&mut host);
/// rotation.pointer_moved(Vec2::new(0.0, 300.0), Vec2::new(800.0, 600.0));
///
/// if let Some(GalleryEvent::Frame(handle)) = host.next_frame() {
///     rotation.advance_frame(handle, &mut host);
/// }
/// assert_eq!(rotation.orientation().yaw, 0.625);
/// ```
#[derive(Clone, Debug)]
pub struct RotationController {
    orientation: CubeOrientation,
    delta: PointerDelta,
    state: ControllerState,
    /// Degrees per frame at the viewport edge.
    pub sensitivity: f32,
    /// Distance the cube is pushed away from the viewer.
    pub viewing_distance: f32,
    /// Fold angles into `[0, 360)` after every frame.
    pub wrap_angles: bool,
}

impl Default for RotationController {
    fn default() -> Self {
        Self {
            orientation: CubeOrientation::default(),
            delta: PointerDelta::ZERO,
            state: ControllerState::Idle,
            sensitivity: 1.25,
            viewing_distance: 1200.0,
            wrap_angles: false,
        }
    }
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn viewing_distance(mut self, distance: f32) -> Self {
        self.viewing_distance = distance;
        self
    }

    pub fn wrap_angles(mut self, wrap: bool) -> Self {
        self.wrap_angles = wrap;
        self
    }

    pub fn orientation(&self) -> CubeOrientation {
        self.orientation
    }

    /// The delta applied on the next frame.
    pub fn delta(&self) -> PointerDelta {
        self.delta
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ControllerState::Active { .. })
    }

    /// Current cube transform, without advancing.
    pub fn cube_matrix(&self) -> Mat4 {
        self.orientation.cube_matrix(self.viewing_distance)
    }

    /// Enter the active state by requesting the first frame. No-op if already active.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.is_active() {
            return;
        }
        let pending = scheduler.request_frame();
        self.state = ControllerState::Active { pending };
        tracing::debug!(?pending, "rotation loop started");
    }

    /// Cancel the outstanding frame request and go idle.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        if let ControllerState::Active { pending } = self.state {
            scheduler.cancel_frame(pending);
            self.state = ControllerState::Idle;
            tracing::debug!(?pending, "rotation loop stopped");
        }
    }

    /// Recompute the per-frame delta from a pointer position.
    pub fn pointer_moved(&mut self, position: Vec2, viewport: Vec2) {
        self.delta = PointerDelta::from_pointer(position, viewport, self.sensitivity);
    }

    /// Advance one frame and schedule the next.
    ///
    /// Returns the new cube transform, or `None` when `handle` is not the
    /// outstanding request (stale, cancelled, or the loop is idle).
    pub fn advance_frame(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<Mat4> {
        match self.state {
            ControllerState::Active { pending } if pending == handle => {}
            _ => {
                tracing::trace!(?handle, "ignoring frame that is not outstanding");
                return None;
            }
        }

        self.orientation.apply(self.delta);
        if self.wrap_angles {
            self.orientation = self.orientation.wrapped();
        }

        let pending = scheduler.request_frame();
        self.state = ControllerState::Active { pending };

        tracing::trace!(
            yaw = self.orientation.yaw,
            pitch = self.orientation.pitch,
            "frame"
        );
        Some(self.cube_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{GalleryEvent, HeadlessHost};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn run_frame(rotation: &mut RotationController, host: &mut HeadlessHost) -> Option<Mat4> {
        match host.next_frame() {
            Some(GalleryEvent::Frame(handle)) => rotation.advance_frame(handle, host),
            _ => None,
        }
    }

    #[test]
    fn center_pointer_produces_no_delta() {
        let delta = PointerDelta::from_pointer(VIEWPORT * 0.5, VIEWPORT, 1.25);
        assert_eq!(delta, PointerDelta::ZERO);
    }

    #[test]
    fn edge_pointer_produces_half_sensitivity() {
        let left = PointerDelta::from_pointer(Vec2::new(0.0, 300.0), VIEWPORT, 1.25);
        assert_eq!(left.yaw, 0.625);
        assert_eq!(left.pitch, 0.0);

        let bottom = PointerDelta::from_pointer(Vec2::new(400.0, 600.0), VIEWPORT, 1.25);
        assert_eq!(bottom.yaw, 0.0);
        assert_eq!(bottom.pitch, 0.625);
    }

    #[test]
    fn empty_viewport_produces_no_delta() {
        let delta = PointerDelta::from_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.25);
        assert_eq!(delta, PointerDelta::ZERO);
    }

    #[test]
    fn accumulation_is_exact_sum_of_deltas() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);

        let positions = [
            Vec2::new(0.0, 0.0),
            Vec2::new(800.0, 600.0),
            Vec2::new(123.0, 456.0),
            Vec2::new(799.0, 1.0),
            Vec2::new(400.0, 300.0),
        ];

        let mut expected = CubeOrientation::default();
        for (i, position) in positions.iter().cycle().take(40).enumerate() {
            if i % 3 != 2 {
                rotation.pointer_moved(*position, VIEWPORT);
            }
            let delta = rotation.delta();
            expected.yaw += delta.yaw;
            expected.pitch += delta.pitch;
            assert!(run_frame(&mut rotation, &mut host).is_some());
        }

        assert_eq!(rotation.orientation(), expected);
    }

    #[test]
    fn delta_persists_between_moves() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);
        rotation.pointer_moved(Vec2::new(0.0, 300.0), VIEWPORT);

        for _ in 0..4 {
            run_frame(&mut rotation, &mut host);
        }
        assert_eq!(rotation.orientation().yaw, 2.5);
    }

    #[test]
    fn centered_pointer_leaves_orientation_unchanged() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);
        rotation.pointer_moved(VIEWPORT * 0.5, VIEWPORT);
        run_frame(&mut rotation, &mut host);
        assert_eq!(rotation.orientation(), CubeOrientation::default());
    }

    #[test]
    fn each_frame_requests_exactly_one_more() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);
        rotation.start(&mut host);
        assert_eq!(host.pending_frames(), 1);

        run_frame(&mut rotation, &mut host);
        assert_eq!(host.pending_frames(), 1);
        assert!(rotation.is_active());
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);
        let ControllerState::Active { pending } = rotation.state() else {
            panic!("controller should be active");
        };

        rotation.stop(&mut host);
        assert_eq!(rotation.state(), ControllerState::Idle);
        assert_eq!(host.pending_frames(), 0);

        rotation.pointer_moved(Vec2::ZERO, VIEWPORT);
        assert_eq!(rotation.advance_frame(pending, &mut host), None);
        assert_eq!(rotation.orientation(), CubeOrientation::default());
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
        let mut rotation = RotationController::new();
        rotation.start(&mut host);
        let Some(GalleryEvent::Frame(first)) = host.next_frame() else {
            panic!("expected a frame");
        };
        rotation.advance_frame(first, &mut host);
        assert_eq!(rotation.advance_frame(first, &mut host), None);
    }

    #[test]
    fn cube_matrix_composes_yaw_then_pitch() {
        let orientation = CubeOrientation::new(90.0, 90.0);
        let m = orientation.cube_matrix(1200.0);
        // pitch first turns +z into -y, yaw leaves y alone
        let p = m.transform_point3(Vec3::new(0.0, 0.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, -1.0, -1200.0), 1e-4));
        // pitch keeps +x, yaw then turns it into -z
        let q = m.transform_point3(Vec3::X);
        assert!(q.abs_diff_eq(Vec3::new(0.0, 0.0, -1201.0), 1e-3));
    }

    #[test]
    fn wrapping_is_opt_in() {
        for (wrap, expected_yaw) in [(true, 40.0), (false, 400.0)] {
            let mut host = HeadlessHost::new(VIEWPORT.x, VIEWPORT.y);
            let mut rotation = RotationController::new()
                .sensitivity(800.0)
                .wrap_angles(wrap);
            rotation.start(&mut host);
            rotation.pointer_moved(Vec2::new(0.0, 300.0), VIEWPORT);
            run_frame(&mut rotation, &mut host);
            assert_eq!(rotation.orientation().yaw, expected_yaw);
        }
    }
}
