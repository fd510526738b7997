//! Translation from winit events to shell events
//!
//! The platform loop feeds winit window events through here before
//! dispatching them to the application. Pointer button events need the
//! last known cursor position, so the translator keeps that bit of
//! state; the per-type mappings themselves are pure functions.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::core::event::{
    Event, FocusEvent, KeyCode, KeyEvent, PointerButton, PointerButtonEvent, PointerMoveEvent,
    ScrollEvent,
};

/// Map a winit key code to the shell's key code.
///
/// Keys outside the shell's set map to `Other(0)`.
pub fn map_key(key: winit::keyboard::KeyCode) -> KeyCode {
    use winit::keyboard::KeyCode as Wk;
    match key {
        Wk::KeyW => KeyCode::W,
        Wk::KeyA => KeyCode::A,
        Wk::KeyS => KeyCode::S,
        Wk::KeyD => KeyCode::D,
        Wk::Space => KeyCode::Space,
        Wk::Escape => KeyCode::Escape,
        Wk::Enter => KeyCode::Enter,
        Wk::Tab => KeyCode::Tab,
        Wk::ArrowUp => KeyCode::Up,
        Wk::ArrowDown => KeyCode::Down,
        Wk::ArrowLeft => KeyCode::Left,
        Wk::ArrowRight => KeyCode::Right,
        Wk::F1 => KeyCode::F1,
        Wk::F2 => KeyCode::F2,
        Wk::F3 => KeyCode::F3,
        Wk::F4 => KeyCode::F4,
        Wk::F5 => KeyCode::F5,
        Wk::F6 => KeyCode::F6,
        Wk::F7 => KeyCode::F7,
        Wk::F8 => KeyCode::F8,
        Wk::F9 => KeyCode::F9,
        Wk::F10 => KeyCode::F10,
        Wk::F11 => KeyCode::F11,
        Wk::F12 => KeyCode::F12,
        _ => KeyCode::Other(0),
    }
}

/// Map a winit mouse button to the shell's pointer button.
pub fn map_pointer_button(button: winit::event::MouseButton) -> PointerButton {
    use winit::event::MouseButton as Wb;
    match button {
        Wb::Left => PointerButton::Left,
        Wb::Right => PointerButton::Right,
        Wb::Middle => PointerButton::Middle,
        Wb::Back => PointerButton::Other(3),
        Wb::Forward => PointerButton::Other(4),
        Wb::Other(n) => PointerButton::Other(n),
    }
}

/// Map a winit scroll delta to (dx, dy) in lines.
pub fn map_scroll_delta(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
    }
}

/// Stateful winit-to-shell event translator.
pub struct EventTranslator {
    /// Last known cursor position, attached to pointer button events
    cursor: (f64, f64),
}

impl EventTranslator {
    pub fn new() -> Self {
        Self { cursor: (0.0, 0.0) }
    }

    /// Translate one winit window event into a shell event.
    ///
    /// Resize and close-request events are handled by the platform loop
    /// itself and are not produced here. Returns `None` for events the
    /// shell does not forward.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Box<dyn Event>> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => map_key(code),
                    PhysicalKey::Unidentified(_) => KeyCode::Other(0),
                };
                let shell_event = match event.state {
                    ElementState::Pressed => KeyEvent::pressed(key),
                    ElementState::Released => KeyEvent::released(key),
                };
                Some(Box::new(shell_event))
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                Some(Box::new(PointerMoveEvent::new(position.x, position.y)))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_pointer_button(*button);
                let (x, y) = self.cursor;
                let shell_event = match state {
                    ElementState::Pressed => PointerButtonEvent::pressed(button, x, y),
                    ElementState::Released => PointerButtonEvent::released(button, x, y),
                };
                Some(Box::new(shell_event))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = map_scroll_delta(*delta);
                Some(Box::new(ScrollEvent::new(dx, dy)))
            }
            WindowEvent::Focused(gained) => Some(Box::new(FocusEvent::new(*gained))),
            _ => None,
        }
    }
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_map_key_known_and_unknown() {
        assert_eq!(map_key(winit::keyboard::KeyCode::Escape), KeyCode::Escape);
        assert_eq!(map_key(winit::keyboard::KeyCode::KeyW), KeyCode::W);
        assert_eq!(map_key(winit::keyboard::KeyCode::F11), KeyCode::F11);
        assert_eq!(map_key(winit::keyboard::KeyCode::KeyZ), KeyCode::Other(0));
    }

    #[test]
    fn test_map_pointer_button() {
        assert_eq!(
            map_pointer_button(winit::event::MouseButton::Left),
            PointerButton::Left
        );
        assert_eq!(
            map_pointer_button(winit::event::MouseButton::Forward),
            PointerButton::Other(4)
        );
        assert_eq!(
            map_pointer_button(winit::event::MouseButton::Other(7)),
            PointerButton::Other(7)
        );
    }

    #[test]
    fn test_map_scroll_delta() {
        assert_eq!(map_scroll_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), (0.0, 1.0));

        let (dx, dy) =
            map_scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.0, -12.0)));
        assert_eq!((dx, dy), (3.0, -12.0));
    }
}
