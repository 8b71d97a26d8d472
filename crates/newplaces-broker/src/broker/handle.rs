use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Control, SubscriberId, Subscription};
use crate::error::{BrokerError, Result};

/// Cloneable handle to a [`Broker`](super::Broker).
///
/// Every operation only enqueues a request for the control loop. Once the
/// broker is stopped, every operation fails with [`BrokerError::Stopped`].
pub struct BrokerHandle<T> {
    control_tx: mpsc::Sender<Control<T>>,
    publish_tx: mpsc::Sender<T>,
    cancel: CancellationToken,
    subscriber_capacity: usize,
}

impl<T> Clone for BrokerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            control_tx: self.control_tx.clone(),
            publish_tx: self.publish_tx.clone(),
            cancel: self.cancel.clone(),
            subscriber_capacity: self.subscriber_capacity,
        }
    }
}

impl<T: Send + 'static> std::fmt::Debug for BrokerHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerHandle")
            .field("subscriber_capacity", &self.subscriber_capacity)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl<T> BrokerHandle<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(
        control_tx: mpsc::Sender<Control<T>>,
        publish_tx: mpsc::Sender<T>,
        cancel: CancellationToken,
        subscriber_capacity: usize,
    ) -> Self {
        Self {
            control_tx,
            publish_tx,
            cancel,
            subscriber_capacity,
        }
    }

    /// Allocate a bounded queue and ask the loop to register it.
    ///
    /// Returns as soon as the request is queued. An event published
    /// concurrently by another task may or may not reach the new queue.
    pub async fn subscribe(&self) -> Result<Subscription<T>> {
        self.ensure_running()?;

        let (queue, rx) = mpsc::channel(self.subscriber_capacity);
        let id = SubscriberId::new();

        self.control_tx
            .send(Control::Subscribe { id, queue })
            .await
            .map_err(|_| BrokerError::Stopped)?;

        debug!(subscriber = %id, "Subscribe requested");
        Ok(Subscription::new(id, rx))
    }

    /// Ask the loop to drop a queue. Unknown ids are ignored.
    pub async fn unsubscribe(&self, id: SubscriberId) -> Result<()> {
        self.ensure_running()?;

        self.control_tx
            .send(Control::Unsubscribe(id))
            .await
            .map_err(|_| BrokerError::Stopped)
    }

    /// Queue an event for fan-out. Waits only while the publish queue is full.
    pub async fn publish(&self, event: T) -> Result<()> {
        self.ensure_running()?;

        self.publish_tx
            .send(event)
            .await
            .map_err(|_| BrokerError::Stopped)
    }

    /// Number of registered subscribers, as seen by the control loop.
    pub async fn subscriber_count(&self) -> Result<usize> {
        self.ensure_running()?;

        let (reply, rx) = oneshot::channel();
        self.control_tx
            .send(Control::Count(reply))
            .await
            .map_err(|_| BrokerError::Stopped)?;

        rx.await.map_err(|_| BrokerError::Stopped)
    }

    /// Stop the control loop. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_stopped() {
            return Err(BrokerError::Stopped);
        }
        Ok(())
    }
}
