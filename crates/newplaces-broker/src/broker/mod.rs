//! Broker - single-actor fan-out of events to bounded subscriber queues.
//!
//! One task owns the subscriber set and processes requests strictly one at a
//! time, so the set needs no lock:
//!
//! ```text
//! writers --publish--> [publish queue] --+
//!                                         +--> Broker loop --try_send--> Subscription 1..N
//! clients --sub/unsub--> [control queue] -+
//! ```

/// Control loop that owns the subscriber set.
pub mod actor;
/// Cloneable handle used by everything outside the loop.
pub mod handle;
/// Subscriber identity and delivery queue.
pub mod subscription;

pub use actor::Broker;
pub use handle::BrokerHandle;
pub use subscription::{SubscriberId, Subscription};

use tokio::sync::{mpsc, oneshot};

/// Requests carried on the control queue
pub(crate) enum Control<T> {
    /// Register a delivery queue
    Subscribe {
        id: SubscriberId,
        queue: mpsc::Sender<T>,
    },
    /// Remove a delivery queue (no-op if unknown)
    Unsubscribe(SubscriberId),
    /// Report the number of registered queues
    Count(oneshot::Sender<usize>),
}
