use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::host::GalleryEvent;

/// Translates native window events into gallery events.
///
/// Tracks the cursor so a button press can be reported at the position the
/// pointer last moved to, and remembers held buttons so auto-repeat or
/// duplicate press notifications do not select twice.
pub struct Input {
    cursor: Vec2,
    buttons_down: HashSet<MouseButton>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            cursor: Vec2::ZERO,
            buttons_down: HashSet::new(),
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, returning the gallery event it maps to.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<GalleryEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(GalleryEvent::PointerMove(self.cursor))
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    let first_press = self.buttons_down.insert(*button);
                    (first_press && *button == MouseButton::Left)
                        .then_some(GalleryEvent::PointerDown(self.cursor))
                }
                ElementState::Released => {
                    self.buttons_down.remove(button);
                    None
                }
            },
            WindowEvent::Resized(size) => Some(GalleryEvent::Resize(Vec2::new(
                size.width as f32,
                size.height as f32,
            ))),
            _ => None,
        }
    }

    /// Current cursor position in window coordinates.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Returns true if the mouse button is currently held down.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
