//! Request-facing facade over the canvas store and the update broker.
//!
//! A write is committed to the store first; only a committed pixel is
//! published. Reads never touch the broker.

use std::sync::Arc;

use newplaces_broker::{BrokerHandle, Result as BrokerResult, SubscriberId, Subscription};
use newplaces_canvas::{CanvasStore, Error, Palette, Pixel, Result as CanvasResult};
use tracing::warn;

/// Shared handle given to every request handler
#[derive(Clone)]
pub struct PlaceService {
    store: Arc<CanvasStore>,
    broker: BrokerHandle<Pixel>,
}

impl PlaceService {
    pub fn new(store: Arc<CanvasStore>, broker: BrokerHandle<Pixel>) -> Self {
        Self { store, broker }
    }

    /// Whole canvas blob
    pub async fn canvas(&self) -> Vec<u8> {
        self.store.snapshot().await
    }

    /// Permitted colors, in display order
    pub fn palette(&self) -> &Palette {
        self.store.palette()
    }

    /// Validate, commit, then publish one pixel.
    ///
    /// Publishing is best effort: once the store accepted the write the call
    /// succeeds even if the broker has already stopped. Commit and publish
    /// run on their own task, so a dropped request cannot commit a pixel
    /// without announcing it.
    pub async fn set_pixel(&self, pixel: Pixel) -> CanvasResult<Pixel> {
        let store = Arc::clone(&self.store);
        let broker = self.broker.clone();

        let placed = tokio::spawn(async move {
            let committed = store.set_pixel(pixel.x, pixel.y, pixel.color).await?;

            if let Err(e) = broker.publish(committed).await {
                warn!(x = committed.x, y = committed.y, error = %e, "Committed pixel not published");
            }
            Ok::<_, Error>(committed)
        });

        placed
            .await
            .map_err(|e| Error::Storage(format!("pixel write task failed: {e}")))?
    }

    /// Start receiving committed pixels
    pub async fn subscribe(&self) -> BrokerResult<Subscription<Pixel>> {
        self.broker.subscribe().await
    }

    /// Stop receiving committed pixels
    pub async fn unsubscribe(&self, id: SubscriberId) -> BrokerResult<()> {
        self.broker.unsubscribe(id).await
    }

    pub fn broker(&self) -> &BrokerHandle<Pixel> {
        &self.broker
    }
}
