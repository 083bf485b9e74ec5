//! Error types for the localization corrector.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Corrector error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tile geometry or scoring parameter rejected at construction
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// Shorthand for a configuration rejection.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}
