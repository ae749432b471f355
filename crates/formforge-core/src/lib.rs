//! # formforge-core
//!
//! Core types, settings, and error types for formforge.
//! This crate has no formforge dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text helpers (slugs, HTML escaping)
//! - [`settings`] - Application settings
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormForgeError, FormForgeResult};
pub use settings::Settings;
