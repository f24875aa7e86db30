//! Recorded 2D draw stream for the overlay.
//!
//! Widgets push commands into a [`DrawList`]; the renderers under
//! `render::shapes` consume them in paint order. The 3D starfield does not go
//! through here.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
