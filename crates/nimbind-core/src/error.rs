//! Core error types.

/// Errors that can occur while loading configuration or extracting functions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Invalid generator configuration.
    #[error("invalid generator config: {detail}")]
    InvalidConfig { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
