/// Convenience result type used across Walli.
pub type WalliResult<T> = Result<T, WalliError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum WalliError {
    /// Invalid style parameters or other caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uploaded bytes could not be decoded into a source image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A draw pass could not be prepared or executed.
    #[error("render error: {0}")]
    Render(String),

    /// Export refused before any surface was allocated.
    #[error("export rejected: {0}")]
    ExportRejected(String),

    /// The rendered surface could not be encoded or written.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Errors when parsing or emitting JSON.
    #[error("serde error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WalliError {
    /// Build a [`WalliError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WalliError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WalliError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WalliError::ExportRejected`] value.
    pub fn export_rejected(msg: impl Into<String>) -> Self {
        Self::ExportRejected(msg.into())
    }

    /// Build a [`WalliError::Serialization`] value.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Build a [`WalliError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors the user recovers from by re-editing or re-uploading.
    pub fn is_recoverable_input(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Decode(_) | Self::Serde(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
