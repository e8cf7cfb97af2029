//! Renderer error types.

/// Errors that can occur while rendering an artifact.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A textual-return function reached a renderer without an ownership
    /// tag. This is an extractor defect; guessing here could generate a
    /// leak or a use-after-free in the emitted bridge, so rendering fails
    /// instead.
    #[error("function '{function}' returns a textual type but carries no memory ownership tag")]
    MissingOwnership { function: String },
}

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, EmitError>;
