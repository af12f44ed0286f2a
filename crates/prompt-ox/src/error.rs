use thiserror::Error;

/// Errors raised at the edges of prompt formatting.
///
/// Rendering itself never fails; these cover selecting a family by name and
/// loading a conversation from an external source.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The given identifier does not name a supported model family
    #[error("Unknown model family: {0}")]
    UnknownFamily(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the conversation source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PromptError>;
