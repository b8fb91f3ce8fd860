//! Configuration loader and schema types.
//!
//! This module exposes the settings that shape playback defaults and the
//! import allow-list, plus helpers to load them from disk and environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
