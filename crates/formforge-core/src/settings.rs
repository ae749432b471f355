//! Settings for formforge.
//!
//! [`Settings`] holds everything the store, the exporter, and the CLI need to
//! know at runtime. Every field has a usable default, so an empty config file
//! (or none at all) yields a working setup. See
//! [`settings_loader`](crate::settings_loader) for file and environment loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete set of formforge settings.
///
/// # Examples
///
/// ```
/// use formforge_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.items_per_page, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "debug", "formforge_forms=trace").
    pub log_level: String,

    // ── Store ────────────────────────────────────────────────────────

    /// Path of the JSON file backing the local form store.
    pub store_path: PathBuf,
    /// Number of form summaries shown per page by `list`.
    pub items_per_page: usize,

    // ── Export ───────────────────────────────────────────────────────

    /// Directory that `export` writes into when no `--output` is given.
    pub export_dir: PathBuf,
    /// Stylesheet referenced by the `<link>` tag of static HTML exports.
    pub stylesheet_href: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            store_path: PathBuf::from("formforge-store.json"),
            items_per_page: 10,
            export_dir: PathBuf::from("."),
            stylesheet_href: "form.css".to_string(),
        }
    }
}
