/// Convenience result type used across the crate.
pub type AniResult<T> = Result<T, AniError>;

/// A frame of the sequence could not be fetched or decoded.
///
/// This is terminal for the component that requested the load: no partial frame set is ever
/// produced and no retry is attempted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load frame {index} ('{url}'): {reason}")]
pub struct LoadError {
    /// 0-based position of the failing frame in the requested sequence.
    pub index: usize,
    /// URL the frame was requested from.
    pub url: String,
    /// Human readable cause.
    pub reason: String,
}

impl LoadError {
    /// Build a [`LoadError`] for frame `index`.
    pub fn new(index: usize, url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum AniError {
    /// The frame sequence failed to load.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Invalid geometry, progress or other caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a rendering surface.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AniError {
    /// Build an [`AniError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AniError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AniError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
