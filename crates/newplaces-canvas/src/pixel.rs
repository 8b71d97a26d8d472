//! Pixel write value object.

use serde::{Deserialize, Serialize};

/// One committed cell write: position plus big-endian RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// RGBA color (red in the most significant byte)
    pub color: u32,
}

impl Pixel {
    /// Create a pixel
    #[must_use]
    pub fn new(x: u32, y: u32, color: u32) -> Self {
        Self { x, y, color }
    }

    /// Color as the 4 bytes stored in the canvas blob
    #[must_use]
    pub fn color_bytes(&self) -> [u8; 4] {
        self.color.to_be_bytes()
    }
}
