//! The fixed color palette.

use serde::Serialize;

/// The 16 permitted RGBA colors, in display order
pub const DEFAULT_PALETTE: [u32; 16] = [
    0xFFFFFFFF, // white
    0xE4E4E4FF, // light grey
    0x888888FF, // grey
    0x222222FF, // black
    0xFFA7D1FF, // pink
    0xE50000FF, // red
    0xE59500FF, // orange
    0xA06A42FF, // brown
    0xE5D900FF, // yellow
    0x94E044FF, // lime
    0x02BE01FF, // green
    0x00D3DDFF, // cyan
    0x0083C7FF, // blue
    0x0000EAFF, // dark blue
    0xCF6EE4FF, // magenta
    0x820080FF, // purple
];

/// Ordered set of permitted colors. Membership is exact, never nearest-color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<u32>);

impl Palette {
    /// Build a palette from colors in display order
    #[must_use]
    pub fn new(colors: impl Into<Vec<u32>>) -> Self {
        Self(colors.into())
    }

    /// Whether `color` is permitted
    #[must_use]
    pub fn contains(&self, color: u32) -> bool {
        self.0.contains(&color)
    }

    /// Colors in display order
    #[must_use]
    pub fn colors(&self) -> &[u32] {
        &self.0
    }

    /// Number of colors
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the palette has no colors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}
