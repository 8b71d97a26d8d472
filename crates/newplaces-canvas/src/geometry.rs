//! Canvas geometry and the cell addressing convention.
//!
//! Cells are addressed row-major: index `y * width + x`. Each cell occupies
//! 4 bytes in the blob, so its byte offset is `index * 4` and its bit offset in
//! the durable store is `index * 32`.

use serde::Serialize;

use crate::error::{Error, Result};

/// Bytes per cell (big-endian RGBA)
pub const BYTES_PER_PIXEL: usize = 4;

/// Fixed canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasGeometry {
    width: u32,
    height: u32,
}

impl CanvasGeometry {
    /// Validate dimensions: both non-zero and the blob size addressable.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Config(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }

        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                Error::Config(format!("canvas {width}x{height} is too large to address"))
            })?;

        Ok(Self { width, height })
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    #[must_use]
    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Exact blob length in bytes
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.total_pixels() * BYTES_PER_PIXEL
    }

    /// Whether `(x, y)` lies on the grid
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Linear cell index, or `OutOfRange`
    pub fn index(&self, x: u32, y: u32) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Byte offset of a cell index within the blob
    #[must_use]
    pub fn byte_offset(index: usize) -> usize {
        index * BYTES_PER_PIXEL
    }

    /// Bit offset of a cell index for the durable 32-bit field write
    #[must_use]
    pub fn bit_offset(index: usize) -> u64 {
        index as u64 * 32
    }
}
