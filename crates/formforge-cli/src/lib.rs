//! # formforge-cli
//!
//! The `formforge` binary and the management commands behind it.
//!
//! Every command works against the local form store named by
//! [`Settings::store_path`](formforge_core::Settings::store_path): create and
//! list forms, add, move, edit, and remove elements, validate a submission,
//! and export a form as JSON or static HTML.
//!
//! ```rust
//! use formforge_cli::command::CommandRegistry;
//! use formforge_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"create"));
//! assert!(names.contains(&"export"));
//! assert!(names.contains(&"validate"));
//! ```

// - unused_async: command handlers keep one async signature
// - doc_markdown: command names and flags in docs are not code items
#![allow(clippy::unused_async)]
#![allow(clippy::doc_markdown)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;
