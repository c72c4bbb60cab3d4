//! Mouse bindings for the orbit camera.

use winit::event::{MouseButton, MouseScrollDelta};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitInput {
    BeginDrag,
    EndDrag,
    ZoomIn,
    ZoomOut,
}

/// Middle button starts/ends an orbit drag; other buttons are ignored.
pub fn orbit_input(button: MouseButton, pressed: bool) -> Option<OrbitInput> {
    match (button, pressed) {
        (MouseButton::Middle, true) => Some(OrbitInput::BeginDrag),
        (MouseButton::Middle, false) => Some(OrbitInput::EndDrag),
        _ => None,
    }
}

/// One zoom step per wheel event, in the direction of its sign.
pub fn scroll_input(delta: MouseScrollDelta) -> Option<OrbitInput> {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };
    if dy > 0.0 {
        Some(OrbitInput::ZoomIn)
    } else if dy < 0.0 {
        Some(OrbitInput::ZoomOut)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn middle_button_drives_drag() {
        assert_eq!(orbit_input(MouseButton::Middle, true), Some(OrbitInput::BeginDrag));
        assert_eq!(orbit_input(MouseButton::Middle, false), Some(OrbitInput::EndDrag));
        assert_eq!(orbit_input(MouseButton::Left, true), None);
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(
            scroll_input(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(OrbitInput::ZoomIn)
        );
        assert_eq!(
            scroll_input(MouseScrollDelta::LineDelta(0.0, -3.0)),
            Some(OrbitInput::ZoomOut)
        );
        assert_eq!(
            scroll_input(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 12.5))),
            Some(OrbitInput::ZoomIn)
        );
        assert_eq!(scroll_input(MouseScrollDelta::LineDelta(2.0, 0.0)), None);
    }
}
