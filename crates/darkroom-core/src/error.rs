//! Error types for raster construction and geometric operations.

/// Errors produced by the transformation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid dimension {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result alias used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;
