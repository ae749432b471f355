//! Utility functions for formforge.
//!
//! - [`text`]: String helpers (slugify, HTML escaping, truncation).

pub mod text;
