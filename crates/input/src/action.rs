use glam::Vec2;

/// Mouse buttons the controls care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What a drag does to the camera.
///
/// Every pointer gesture resolves to one of these before it reaches the
/// orbit controls, so other input sources can drive the same camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Orbit around the target by a cursor delta in pixels.
    Rotate(Vec2),
    /// Slide camera and target by a cursor delta in pixels.
    Pan(Vec2),
    /// Move toward (positive) or away from (negative) the target, in wheel steps.
    Zoom(f32),
    /// No-op.
    None,
}

impl PointerAction {
    pub fn for_drag(button: PointerButton, delta: Vec2) -> Self {
        match button {
            PointerButton::Primary => PointerAction::Rotate(delta),
            PointerButton::Secondary => PointerAction::Pan(delta),
            // Vertical middle drag dollies like the wheel, one step per 10 px.
            PointerButton::Middle => PointerAction::Zoom(-delta.y / 10.0),
        }
    }
}

/// Turns button and cursor events into drag actions.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    held: Option<PointerButton>,
    last: Option<Vec2>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<PointerButton> {
        self.held
    }

    /// Record a press or release. Only the first held button drives the drag.
    pub fn button(&mut self, button: PointerButton, pressed: bool) {
        if pressed {
            if self.held.is_none() {
                self.held = Some(button);
            }
        } else if self.held == Some(button) {
            self.held = None;
        }
    }

    /// Record a cursor position; returns the drag action since the last position.
    pub fn cursor_moved(&mut self, position: Vec2) -> PointerAction {
        let previous = self.last.replace(position);
        match (self.held, previous) {
            (Some(button), Some(prev)) if prev != position => {
                PointerAction::for_drag(button, position - prev)
            }
            _ => PointerAction::None,
        }
    }

    /// Forget the cursor position, e.g. when it leaves the window.
    pub fn cursor_left(&mut self) {
        self.last = None;
        self.held = None;
    }
}
