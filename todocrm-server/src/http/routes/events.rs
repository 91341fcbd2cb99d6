//! Revalidation event stream (SSE)

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures::stream::{self, Stream};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::revalidate::RevalidateEvent;
use crate::state::AppState;

/// GET /api/events
async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("revalidation subscriber connected");
    Sse::new(revalidation_stream(state.revalidator().subscribe())).keep_alive(KeepAlive::default())
}

/// SSE events for every notice; ends when the publisher goes away.
fn revalidation_stream(
    rx: broadcast::Receiver<RevalidateEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notice) => match Event::default().event("revalidate").json_data(&notice) {
                    Ok(event) => return Some((Ok(event), rx)),
                    Err(e) => tracing::warn!(error = %e, "failed to encode revalidation event"),
                },
                // Missed notices are covered by the next one; pages refetch wholesale.
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "revalidation subscriber lagged")
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events", get(events))
}
