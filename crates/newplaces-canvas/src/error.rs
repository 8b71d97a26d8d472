//! Error types for newplaces-canvas
//!
//! Load-time integrity failures are fatal for the caller. Everything else is a
//! per-write rejection that leaves both the durable store and the mirror as
//! they were.

use thiserror::Error;

/// Canvas error type
#[derive(Debug, Error)]
pub enum Error {
    /// Canvas blob missing or mis-sized at load
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Coordinate outside the grid
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfRange {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },

    /// Color not in the palette
    #[error("color {0:#010X} is not in the palette")]
    InvalidColor(u32),

    /// Durable store operation failed (backend message kept as-is)
    #[error("storage error: {0}")]
    Storage(String),

    /// Unusable canvas configuration
    #[error("invalid canvas configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error was caused by the request itself rather than the system.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::InvalidColor(_))
    }

    /// Stable upper-snake code for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Integrity(_) => "INTEGRITY_ERROR",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::InvalidColor(_) => "INVALID_COLOR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Canvas blob integrity failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// No blob under the canvas key
    #[error("canvas '{key}' not found in the durable store")]
    Missing {
        /// Durable key that was read
        key: String,
    },

    /// Blob length differs from `width * height * 4`
    #[error("wrong canvas length: expected {expected} bytes, found {actual}")]
    WrongLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
