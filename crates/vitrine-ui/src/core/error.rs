//! Error types for the page controllers.

use thiserror::Error;

/// Errors returned by theme switcher operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// The requested theme is not part of the configured registry.
    #[error("unknown theme: {name}")]
    UnknownTheme {
        /// Theme name supplied by the caller.
        name: String,
    },
    /// The options payload could not be decoded.
    #[error("invalid theme options: {detail}")]
    InvalidOptions {
        /// Decoder error detail.
        detail: String,
    },
}

/// Errors raised by preference storage backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled or not exposed by the host.
    #[error("preference storage unavailable")]
    Unavailable,
    /// The backend rejected a read or write.
    #[error("storage {operation} failed for {key}: {detail}")]
    Rejected {
        /// Operation that failed (`read` or `write`).
        operation: &'static str,
        /// Storage key involved.
        key: String,
        /// Backend error detail.
        detail: String,
    },
}

/// Errors raised while wiring controllers into the document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The host did not expose a window or document.
    #[error("document is not available")]
    NoDocument,
    /// A DOM call failed.
    #[error("dom operation {operation} failed: {detail}")]
    Dom {
        /// DOM operation that failed.
        operation: &'static str,
        /// Stringified JS exception.
        detail: String,
    },
    /// An alert severity string was not recognised.
    #[error("unknown alert severity: {value}")]
    UnknownSeverity {
        /// Severity payload provided by the caller.
        value: String,
    },
}
