/// Convenience result type used across the crate.
pub type FourierResult<T> = Result<T, FourierError>;

/// Top-level error taxonomy used by the public APIs.
#[derive(thiserror::Error, Debug)]
pub enum FourierError {
    /// Invalid term range, sample grid, or other configuration data.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The encoder is unavailable or the output could not be written.
    #[error("export error: {0}")]
    Export(String),

    /// Errors raised while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FourierError {
    /// Build a [`FourierError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FourierError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`FourierError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FourierError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
