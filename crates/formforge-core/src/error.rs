//! Core error types for formforge.
//!
//! [`FormForgeError`] covers the failures that can escape the library: store
//! lookups, empty titles on create, bad command arguments, configuration,
//! serialization, and IO. Structural no-ops on a document (removing an unknown
//! element, moving an element onto itself) are never errors.

use thiserror::Error;

/// The primary error type for formforge.
#[derive(Error, Debug)]
pub enum FormForgeError {
    /// A form was created (or renamed) with a blank title.
    #[error("Form title cannot be empty")]
    EmptyTitle,

    /// A form or element with the given id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An argument was syntactically valid but unusable (unknown element type,
    /// rule not allowed for an element, and so on).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A submission failed validation. Carries `(element_id, message)` pairs.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<(String, String)>),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FormForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl FormForgeError {
    /// Returns the process exit code the CLI uses for this error.
    ///
    /// - `InvalidArgument`, `EmptyTitle`, `Configuration` -> 2 (usage)
    /// - `NotFound` -> 3
    /// - `Validation` -> 4
    /// - everything else -> 1
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::EmptyTitle | Self::Configuration(_) => 2,
            Self::NotFound(_) => 3,
            Self::Validation(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 1,
        }
    }
}

/// A convenience type alias for `Result<T, FormForgeError>`.
pub type FormForgeResult<T> = Result<T, FormForgeError>;
