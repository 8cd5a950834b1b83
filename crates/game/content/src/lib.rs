//! Data-driven content definitions and loaders.
//!
//! This crate reads level and controller data from files:
//! - Level layouts (ASCII grids inside RON files)
//! - Controller configuration (TOML)
//! - Action scripts (whitespace-separated tokens)
//!
//! Content is turned into `game-core` types and never does anything beyond
//! parsing and validation.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LevelLoader, ScriptLoader};
