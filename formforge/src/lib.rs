//! # formforge
//!
//! A form builder's core, without the browser: an element catalog, ordered
//! form documents with stable element ids, validation rules, a properties
//! edit session, and JSON / static HTML export.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `formforge` to get everything, or on individual crates for finer-grained
//! control.
//!
//! ```
//! use formforge::forms::{to_static_html, ElementType, FormDocument};
//!
//! let mut doc = FormDocument::new("Feedback");
//! doc.add(ElementType::MultiLine.template());
//! assert!(to_static_html(&doc).contains("<textarea"));
//! ```

/// Settings, logging, error types, and text helpers.
pub use formforge_core as core;

/// Element catalog, documents, validation, editing, and export.
pub use formforge_forms as forms;

/// Signal dispatcher used for document change notifications.
#[cfg(feature = "signals")]
pub use formforge_signals as signals;

/// The local form store and pagination.
#[cfg(feature = "store")]
pub use formforge_store as store;

/// Management commands behind the `formforge` binary.
#[cfg(feature = "cli")]
pub use formforge_cli as cli;

pub use formforge_core::{FormForgeError, FormForgeResult, Settings};

// Third-party re-exports
pub use serde;
pub use serde_json;
pub use tracing;
