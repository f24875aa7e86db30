//! winit → `InputEvent` translation.

use winit::event::{ElementState, MouseButton as WinitButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, Key, MouseButton, Transition};

/// Returns `None` for events the input layer does not track.
pub(crate) fn translate_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
        WindowEvent::CursorMoved { position, .. } => {
            let p = position.to_logical::<f64>(window.scale_factor());
            Some(InputEvent::PointerMoved { x: p.x as f32, y: p.y as f32 })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::Button {
            button: map_button(*button),
            transition: map_state(*state),
        }),
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            transition: map_state(event.state),
        }),
        _ => None,
    }
}

fn map_state(s: ElementState) -> Transition {
    match s {
        ElementState::Pressed => Transition::Pressed,
        ElementState::Released => Transition::Released,
    }
}

fn map_button(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
        PhysicalKey::Code(other) => Key::Other(other as u32),
        // Native codes have no stable numeric form in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Other(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_maps_to_named_key() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Other(_)));
    }

    #[test]
    fn element_state_maps_to_transition() {
        assert_eq!(map_state(ElementState::Pressed), Transition::Pressed);
        assert_eq!(map_state(ElementState::Released), Transition::Released);
    }
}
