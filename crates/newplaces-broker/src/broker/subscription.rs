use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identity of one registered delivery queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiving end of a subscriber's bounded queue.
///
/// The stream ends once the broker drops its side, which happens on
/// unsubscribe or when the broker stops. Events already queued are still
/// delivered first.
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriberId,
    rx: mpsc::Receiver<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(id: SubscriberId, rx: mpsc::Receiver<T>) -> Self {
        Self { id, rx }
    }

    /// Id to pass to `unsubscribe`
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next event; `None` once the queue is closed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Convert into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        stream::unfold(self.rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        })
    }
}
