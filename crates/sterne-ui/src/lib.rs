//! Sterne UI: a small retained widget layer on top of `sterne-engine`.
//!
//! The overlay tree is rebuilt every frame from the application state and
//! handed to [`UiScene::frame`], which measures it, routes pointer events
//! (hover, press, drag, release) and paints it into the scene's
//! [`DrawList`](sterne_engine::scene::DrawList).
//!
//! Custom widgets implement [`Widget`] and convert into [`Element`]:
//!
//! ```rust,ignore
//! use sterne_ui::prelude::*;
//!
//! struct Swatch(Color);
//!
//! impl Widget for Swatch {
//!     fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
//!         c.constrain(Vec2::new(16.0, 16.0))
//!     }
//!     fn paint(&self, painter: &mut Painter, rect: Rect) {
//!         painter.fill_rounded_rect(rect, 3.0, self.0, None);
//!     }
//! }
//! ```

pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use scene::{UiInput, UiScene};
pub use widget::{Element, Widget};

pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        container::Container,
        flex::{Align, Column},
        slider::Slider,
        text::Text,
    };

    pub use sterne_engine::coords::{Rect, Vec2};
    pub use sterne_engine::paint::Color;
    pub use sterne_engine::scene::shapes::Border;
    pub use sterne_engine::text::FontId;
}
