//! Canvas configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::CanvasGeometry;

/// Default durable key holding the canvas blob
pub const DEFAULT_CANVAS_KEY: &str = "newplaces";
/// Default canvas width
pub const DEFAULT_WIDTH: u32 = 2_000;
/// Default canvas height
pub const DEFAULT_HEIGHT: u32 = 2_000;

/// Where the canvas lives and how large it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Durable key of the blob
    #[serde(default = "default_key")]
    pub key: String,
    /// Columns
    #[serde(default = "default_width")]
    pub width: u32,
    /// Rows
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_key() -> String {
    DEFAULT_CANVAS_KEY.to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl CanvasConfig {
    /// Validated geometry for these dimensions
    pub fn geometry(&self) -> Result<CanvasGeometry> {
        CanvasGeometry::new(self.width, self.height)
    }
}
