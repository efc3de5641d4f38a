/// Convenience result type used across the crate.
pub type LowPolyResult<T> = Result<T, LowPolyError>;

/// Top-level error taxonomy used by the stylization APIs.
///
/// Degenerate triangles and pixels that fall outside a buffer are not errors; they are skipped
/// silently by the rasterizer.
#[derive(thiserror::Error, Debug)]
pub enum LowPolyError {
    /// Invalid user-provided configuration or malformed input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The triangulation capability could not partition the point set.
    #[error("triangulation error: {0}")]
    Triangulation(String),

    /// Errors while decoding or encoding image bytes.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LowPolyError {
    /// Build a [`LowPolyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LowPolyError::Triangulation`] value.
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Self::Triangulation(msg.into())
    }

    /// Build a [`LowPolyError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
