//! Error types for the compilation layer

/// Result type for platform and export operations
pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The target cannot be compiled: unresolved path, unsupported project,
    /// toolchain failure or unreadable build output.
    #[error("{0}")]
    InvalidCompilation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CompileError::InvalidCompilation(message.into())
    }

    pub fn is_invalid_compilation(&self) -> bool {
        matches!(self, CompileError::InvalidCompilation(_))
    }
}
