use std::collections::HashMap;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::{BrokerHandle, Control, SubscriberId};
use crate::config::BrokerConfig;

/// The broker's control loop state.
///
/// Construct with [`Broker::new`], pass the returned [`BrokerHandle`] to
/// whoever needs to publish or subscribe, then start the loop with
/// [`Broker::spawn`] (or drive [`Broker::run`] yourself).
pub struct Broker<T> {
    control_rx: mpsc::Receiver<Control<T>>,
    publish_rx: mpsc::Receiver<T>,
    cancel: CancellationToken,
    subscribers: HashMap<SubscriberId, mpsc::Sender<T>>,
}

impl<T> Broker<T>
where
    T: Clone + Send + 'static,
{
    /// Create a stopped broker and its handle.
    #[must_use]
    pub fn new(config: BrokerConfig) -> (Self, BrokerHandle<T>) {
        let config = config.normalized();
        let (control_tx, control_rx) = mpsc::channel(config.control_capacity);
        let (publish_tx, publish_rx) = mpsc::channel(config.publish_capacity);
        let cancel = CancellationToken::new();

        let handle = BrokerHandle::new(
            control_tx,
            publish_tx,
            cancel.clone(),
            config.subscriber_capacity,
        );

        let broker = Self {
            control_rx,
            publish_rx,
            cancel,
            subscribers: HashMap::new(),
        };

        (broker, handle)
    }

    /// Run the control loop on the tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the control loop until stopped or until every handle is dropped.
    ///
    /// Stop is checked first on every turn, and subscribe/unsubscribe requests
    /// are taken before pending publishes.
    pub async fn run(mut self) {
        info!("Update broker started");

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!("Update broker received stop");
                    break;
                }
                control = self.control_rx.recv() => match control {
                    Some(control) => self.handle_control(control),
                    None => break,
                },
                event = self.publish_rx.recv() => match event {
                    Some(event) => self.fan_out(event),
                    None => break,
                },
            }
        }

        // Dropping the senders ends every subscriber's stream.
        let remaining = self.subscribers.len();
        self.subscribers.clear();
        info!(subscribers = remaining, "Update broker stopped");
    }

    fn handle_control(&mut self, control: Control<T>) {
        match control {
            Control::Subscribe { id, queue } => {
                self.subscribers.entry(id).or_insert(queue);
                debug!(subscriber = %id, live = self.subscribers.len(), "Subscriber registered");
            }
            Control::Unsubscribe(id) => {
                if self.subscribers.remove(&id).is_some() {
                    debug!(subscriber = %id, live = self.subscribers.len(), "Subscriber removed");
                }
            }
            Control::Count(reply) => {
                let _ = reply.send(self.subscribers.len());
            }
        }
    }

    /// Offer the event to every queue without waiting on any of them.
    fn fan_out(&mut self, event: T) {
        self.subscribers.retain(|id, queue| match queue.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!(subscriber = %id, "Subscriber queue full, event dropped");
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!(subscriber = %id, "Subscriber queue closed, pruning");
                false
            }
        });
    }
}
