use std::collections::HashSet;
use std::hash::Hash;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, MouseButton, Transition};

/// What is currently held, and where the pointer is.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event to the current state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Key { key, transition } => track(
                &mut self.keys_down,
                &mut frame.keys_pressed,
                &mut frame.keys_released,
                *key,
                *transition,
            ),
            InputEvent::Button { button, transition } => track(
                &mut self.buttons_down,
                &mut frame.buttons_pressed,
                &mut frame.buttons_released,
                *button,
                *transition,
            ),
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

/// OS key repeats arrive as extra presses; only the first one is an edge.
fn track<T: Copy + Eq + Hash>(
    down: &mut HashSet<T>,
    pressed: &mut HashSet<T>,
    released: &mut HashSet<T>,
    item: T,
    transition: Transition,
) {
    match transition {
        Transition::Pressed => {
            if down.insert(item) {
                pressed.insert(item);
            }
        }
        Transition::Released => {
            if down.remove(&item) {
                released.insert(item);
            }
        }
    }
}
