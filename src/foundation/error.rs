/// Convenience result type used across the crate.
pub type WheelResult<T> = Result<T, WheelError>;

/// Error taxonomy for the wheel pipeline.
///
/// Every variant aborts the whole pipeline; callers never observe partially encoded output.
#[derive(thiserror::Error, Debug)]
pub enum WheelError {
    /// The selected winner index is outside the candidate list.
    #[error("invalid selection: index {index} is out of range for {len} candidates")]
    InvalidSelection {
        /// Requested index.
        index: usize,
        /// Number of candidates available.
        len: usize,
    },

    /// No candidates were provided.
    #[error("empty input: at least one candidate is required")]
    EmptyInput,

    /// The avatar or pointer image could not be fetched or decoded.
    #[error("asset load failure: {0}")]
    AssetLoad(String),

    /// Frames could not be assembled into the output animation.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid user-provided options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WheelError {
    /// Build a [`WheelError::InvalidSelection`] value.
    pub fn invalid_selection(index: usize, len: usize) -> Self {
        Self::InvalidSelection { index, len }
    }

    /// Build a [`WheelError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`WheelError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`WheelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
