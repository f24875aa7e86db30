use sterne_engine::coords::Vec2;

/// Pointer events routed through the widget tree, all in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Cursor position, sent every frame while the cursor is in the window.
    Hover { pos: Vec2 },
    /// Primary button is held. Sent on the press frame and every frame after
    /// until release; `start` is where the press began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released. Sent even when `pos` is outside the widget
    /// that owns the drag; check `start` for ownership.
    DragEnd { pos: Vec2, start: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
