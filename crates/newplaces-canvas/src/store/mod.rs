//! Canvas store - the single source of truth for pixel state.
//!
//! Bridges the durable backend and an in-memory mirror used for fast reads.
//! A write is committed to the backend first and mirrored only on success,
//! so a failed write leaves both copies untouched.
//!
//! The commit and the mirror update run on their own task, so a caller that
//! stops waiting cannot leave the durable blob updated and the mirror stale.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::backend::CanvasBackend;
use crate::config::CanvasConfig;
use crate::error::{Error, IntegrityError, Result};
use crate::geometry::{CanvasGeometry, BYTES_PER_PIXEL};
use crate::palette::Palette;
use crate::pixel::Pixel;

/// Number of lock stripes serializing writes to the same cell
const WRITE_STRIPES: usize = 64;

/// Authoritative canvas state
pub struct CanvasStore {
    geometry: CanvasGeometry,
    palette: Palette,
    cells: Arc<Cells>,
}

/// State shared with in-flight write tasks
struct Cells {
    backend: Arc<dyn CanvasBackend>,
    key: String,
    mirror: RwLock<Vec<u8>>,
    /// Held across the durable write and the mirror update of a cell
    stripes: Vec<Mutex<()>>,
}

impl Cells {
    async fn commit(&self, index: usize, color: u32) -> Result<()> {
        let _cell = self.stripes[index % WRITE_STRIPES].lock().await;

        self.backend
            .set_u32(&self.key, CanvasGeometry::bit_offset(index), color)
            .await?;

        let offset = CanvasGeometry::byte_offset(index);
        let mut mirror = self.mirror.write().await;
        mirror[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_be_bytes());
        Ok(())
    }
}

impl CanvasStore {
    /// Load the canvas from the durable store.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend is unreachable, `Integrity` if the blob is
    /// missing or its length is not exactly `width * height * 4`. There is no
    /// repair: the blob must be provisioned beforehand.
    pub async fn initialize(backend: Arc<dyn CanvasBackend>, config: &CanvasConfig) -> Result<Self> {
        let geometry = config.geometry()?;

        backend.ping().await?;

        let blob = backend
            .get_blob(&config.key)
            .await?
            .ok_or_else(|| IntegrityError::Missing {
                key: config.key.clone(),
            })?;

        if blob.len() != geometry.total_bytes() {
            return Err(IntegrityError::WrongLength {
                expected: geometry.total_bytes(),
                actual: blob.len(),
            }
            .into());
        }

        info!(
            backend = backend.name(),
            key = %config.key,
            width = geometry.width(),
            height = geometry.height(),
            bytes = blob.len(),
            "Canvas loaded"
        );

        Ok(Self {
            geometry,
            palette: Palette::default(),
            cells: Arc::new(Cells {
                backend,
                key: config.key.clone(),
                mirror: RwLock::new(blob),
                stripes: (0..WRITE_STRIPES).map(|_| Mutex::new(())).collect(),
            }),
        })
    }

    /// Canvas dimensions
    #[must_use]
    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    /// Permitted colors
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Durable key of the blob
    #[must_use]
    pub fn key(&self) -> &str {
        &self.cells.key
    }

    /// Copy of the whole mirror, `width * height * 4` bytes.
    pub async fn snapshot(&self) -> Vec<u8> {
        self.cells.mirror.read().await.clone()
    }

    /// Current color of one cell, read from the mirror.
    pub async fn pixel(&self, x: u32, y: u32) -> Result<u32> {
        let offset = CanvasGeometry::byte_offset(self.geometry.index(x, y)?);
        let mirror = self.cells.mirror.read().await;

        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&mirror[offset..offset + BYTES_PER_PIXEL]);
        Ok(u32::from_be_bytes(bytes))
    }

    /// Check a write without performing it; returns the cell index.
    ///
    /// The range check runs first, so a write that is both off-canvas and
    /// off-palette is reported as `OutOfRange`.
    pub fn validate(&self, x: u32, y: u32, color: u32) -> Result<usize> {
        let index = self.geometry.index(x, y)?;
        if !self.palette.contains(color) {
            return Err(Error::InvalidColor(color));
        }
        Ok(index)
    }

    /// Validate and commit one cell to the durable store, then the mirror.
    ///
    /// Once validation passes the write runs to completion even if this
    /// future is dropped.
    ///
    /// # Errors
    ///
    /// `OutOfRange` / `InvalidColor` with no side effect, or `Storage` with
    /// the backend's message when the durable write fails (mirror untouched).
    pub async fn set_pixel(&self, x: u32, y: u32, color: u32) -> Result<Pixel> {
        let index = match self.validate(x, y, color) {
            Ok(index) => index,
            Err(e) => {
                debug!(x, y, color, error = %e, "Pixel write rejected");
                return Err(e);
            }
        };

        let cells = Arc::clone(&self.cells);
        let write = tokio::spawn(async move { cells.commit(index, color).await });

        match write.await {
            Ok(Ok(())) => Ok(Pixel::new(x, y, color)),
            Ok(Err(e)) => {
                warn!(x, y, error = %e, "Durable pixel write failed");
                Err(e)
            }
            Err(e) => Err(Error::Storage(format!("pixel write task failed: {e}"))),
        }
    }
}


/// Write a solid-color canvas blob under the configured key.
///
/// Used to provision a fresh store or wipe an existing canvas. The color must
/// be a member of the default palette.
pub async fn provision(backend: &dyn CanvasBackend, config: &CanvasConfig, color: u32) -> Result<()> {
    let geometry = config.geometry()?;
    if !Palette::default().contains(color) {
        return Err(Error::InvalidColor(color));
    }

    backend.ping().await?;

    let blob = color.to_be_bytes().repeat(geometry.total_pixels());
    backend.set_blob(&config.key, &blob).await?;

    info!(
        backend = backend.name(),
        key = %config.key,
        color = %format!("{color:#010X}"),
        bytes = blob.len(),
        "Canvas provisioned"
    );
    Ok(())
}
