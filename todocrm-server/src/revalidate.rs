//! Cache-revalidation notices for front ends
//!
//! Every successful mutation publishes the pages that show the changed
//! entity. Subscribers (the `/api/events` stream) refresh those pages.

use serde::Serialize;
use tokio::sync::broadcast;
use todocrm_core::EntityKind;

/// Buffered notices per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// Pages to refresh after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevalidateEvent {
    pub entity: EntityKind,
    pub paths: Vec<&'static str>,
}

impl RevalidateEvent {
    pub fn for_entity(entity: EntityKind) -> Self {
        Self {
            entity,
            paths: paths_for(entity).to_vec(),
        }
    }
}

/// Pages displaying each entity kind.
pub fn paths_for(entity: EntityKind) -> &'static [&'static str] {
    match entity {
        EntityKind::Todo => &["/"],
        EntityKind::Contact => &["/admin", "/crm"],
    }
}

/// Fan-out of revalidation notices.
#[derive(Debug, Clone)]
pub struct Revalidator {
    tx: broadcast::Sender<RevalidateEvent>,
}

impl Revalidator {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish; a notice with no listeners is dropped.
    pub fn notify(&self, entity: EntityKind) {
        let event = RevalidateEvent::for_entity(entity);
        match self.tx.send(event) {
            Ok(receivers) => tracing::debug!(%entity, receivers, "revalidation published"),
            Err(_) => tracing::trace!(%entity, "no revalidation listeners"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RevalidateEvent> {
        self.tx.subscribe()
    }
}

impl Default for Revalidator {
    fn default() -> Self {
        Self::new()
    }
}
