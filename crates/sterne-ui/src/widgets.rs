pub mod container;
pub mod flex;
pub mod slider;
pub mod text;
