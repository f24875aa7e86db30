//! Simulation core for the **Sterne** warp-speed starfield.
//!
//! This crate is intentionally free of GPU and windowing code so the star
//! update can be unit tested without a device.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`star`] | `Star` |
//! | [`field`] | `Starfield` (append / resize / advance) |
//! | [`config`] | `FieldConfig`, `ConfigError` |
//! | [`params`] | `SimParams`, `ParamChange` |
//! | [`sim`] | `Simulation` per-frame driver |
//!
//! # Quick start
//!
//! ```rust
//! use sterne_field::{FieldConfig, SimParams, Simulation};
//!
//! let config = FieldConfig::default();
//! let mut sim = Simulation::with_seed(config.clone(), 7);
//! let params = SimParams { speed: -0.1, target_count: 500 };
//!
//! let streaks = sim.update(&params, 1.0 / 60.0);
//! assert_eq!(streaks.len(), 1000); // two endpoints per star
//! ```

pub mod config;
pub mod field;
pub mod params;
pub mod sim;
pub mod star;

pub use config::{ConfigError, FieldConfig};
pub use field::Starfield;
pub use params::{ParamChange, SimParams};
pub use sim::Simulation;
pub use star::Star;
