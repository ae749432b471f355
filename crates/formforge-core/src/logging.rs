//! Logging integration for formforge.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-command spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error", or a full `EnvFilter` directive). In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one management command invocation.
///
/// # Examples
///
/// ```
/// use formforge_core::logging::command_span;
///
/// let span = command_span("export");
/// let _guard = span.enter();
/// tracing::info!("exporting");
/// ```
pub fn command_span(command: &str) -> tracing::Span {
    tracing::info_span!("command", name = command)
}
