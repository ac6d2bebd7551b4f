/// Convenience result type used across social-canvas.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy used by the compositing and batch APIs.
///
/// Variants split into two classes. Per-item failures (`InvalidDimensions`, `Decode`, `Encode`)
/// only affect one source and the batch skips them. Run-level failures (`InvalidQuality`,
/// `InvalidOption`, `Packaging`, `Cancelled`) abort the whole run.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// Non-positive source, canvas or box dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Unreadable or unsupported source bytes.
    #[error("decode failure: {0}")]
    Decode(String),

    /// Encoder quality outside `(0, 1]`.
    #[error("invalid quality: {0}")]
    InvalidQuality(String),

    /// Out-of-range or malformed processing option.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Codec error while encoding a composited raster.
    #[error("encode failure: {0}")]
    Encode(String),

    /// Archive serialization error.
    #[error("packaging failure: {0}")]
    Packaging(String),

    /// The run was abandoned between items.
    #[error("batch cancelled after {completed} of {total} items")]
    Cancelled {
        /// Items attempted before cancellation was observed.
        completed: usize,
        /// Items in the batch.
        total: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`CanvasError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CanvasError::InvalidQuality`] value.
    pub fn invalid_quality(msg: impl Into<String>) -> Self {
        Self::InvalidQuality(msg.into())
    }

    /// Build a [`CanvasError::InvalidOption`] value.
    pub fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOption(msg.into())
    }

    /// Build a [`CanvasError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CanvasError::Packaging`] value.
    pub fn packaging(msg: impl Into<String>) -> Self {
        Self::Packaging(msg.into())
    }

    /// `true` when the failure is confined to a single batch item and the run may continue.
    pub fn is_item_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions(_) | Self::Decode(_) | Self::Encode(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
