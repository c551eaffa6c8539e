//! Kernel error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("Surface dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel data has {actual} bytes, expected {expected} for the given size")]
    BufferSize { expected: usize, actual: usize },

    #[error("Selected area lies outside the surface")]
    EmptySelection,

    #[error("No preset {kind} with index {index}")]
    UnknownPreset { kind: &'static str, index: usize },

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KernelError>;
