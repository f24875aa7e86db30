use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the starfield reacts to get a name; the rest carry the
/// platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,
    Other(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Other(code) => write!(f, "key #{code}"),
            named => write!(f, "{named:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Press or release, for keys and buttons alike.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transition {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Positions are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, transition: Transition },
    Button { button: MouseButton, transition: Transition },
    PointerMoved { x: f32, y: f32 },
    /// Pointer left the window surface.
    PointerLeft,
    Focused(bool),
}
