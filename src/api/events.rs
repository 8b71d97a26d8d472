//! Live pixel feed over server-sent events
//!
//! Each connection holds one broker subscription for its lifetime. When the
//! client goes away the stream is dropped and the subscription is removed.

use std::convert::Infallible;

use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{self, Stream};
use newplaces_broker::SubscriberId;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::service::PlaceService;

/// Removes the subscription when the SSE stream is dropped
struct UnsubscribeOnDrop {
    service: PlaceService,
    id: SubscriberId,
}

impl Drop for UnsubscribeOnDrop {
    fn drop(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let service = self.service.clone();
        let id = self.id;
        runtime.spawn(async move {
            match service.unsubscribe(id).await {
                Ok(()) => debug!(subscriber = %id, "Event stream closed"),
                Err(e) => debug!(subscriber = %id, error = %e, "Unsubscribe skipped"),
            }
        });
    }
}

async fn events(
    Extension(service): Extension<PlaceService>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let subscription = service.subscribe().await?;
    let guard = UnsubscribeOnDrop {
        service,
        id: subscription.id(),
    };
    debug!(subscriber = %guard.id, "Event stream opened");

    let stream = stream::unfold((subscription, guard), |(mut subscription, guard)| async move {
        let pixel = subscription.recv().await?;
        let event = match Event::default().event("message").json_data(pixel) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Failed to encode pixel event");
                Event::default().comment("encode error")
            }
        };
        Some((Ok(event), (subscription, guard)))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub fn events_routes() -> Router {
    Router::new().route("/events", get(events))
}
