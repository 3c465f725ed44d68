use std::path::PathBuf;

use crate::foundation::core::Resolution;

/// Convenience result type used across Laminate.
pub type LaminateResult<T> = Result<T, LaminateError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// Everything except [`LaminateError::Encode`] is a pre-condition failure
/// detected before any output file is written.
#[derive(thiserror::Error, Debug)]
pub enum LaminateError {
    /// Invalid job configuration or misused pixel buffer.
    #[error("validation error: {0}")]
    Validation(String),

    /// Every slot resolved to zero images.
    #[error("no images found in any slot")]
    NoImagesFound,

    /// The job has no output directory configured.
    #[error("no output directory configured")]
    OutputDirectoryUnset,

    /// Resolved images do not share a single pixel resolution.
    #[error("image resolutions do not match: found {}", format_resolutions(found))]
    ResolutionMismatch {
        /// Distinct resolutions seen across all resolved images.
        found: Vec<Resolution>,
    },

    /// A resolved image could not be opened for pixel access.
    #[error("unreadable image '{}': {reason}", path.display())]
    UnreadableImage {
        /// The offending file.
        path: PathBuf,
        /// Decoder or IO failure description.
        reason: String,
    },

    /// Failure while converting or writing an output file.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaminateError {
    /// Build a [`LaminateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LaminateError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LaminateError::UnreadableImage`] value for `path`.
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

fn format_resolutions(found: &[Resolution]) -> String {
    let parts: Vec<String> = found.iter().map(Resolution::to_string).collect();
    parts.join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
