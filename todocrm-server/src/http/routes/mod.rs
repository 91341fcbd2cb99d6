//! Route handlers organized by resource

pub mod contacts;
pub mod events;
pub mod health;
pub mod todos;

use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use todocrm_core::{EntityKind, Envelope};

use super::error::respond;
use crate::state::AppState;

/// `DELETE` body
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// `PUT` body
#[derive(Debug, Deserialize)]
pub struct UpdateRequest<T> {
    pub id: String,
    #[serde(default)]
    pub updates: T,
}

/// Respond to a mutation, announcing it when it succeeded.
fn mutation<T: Serialize>(
    state: &AppState,
    entity: EntityKind,
    success: StatusCode,
    env: Envelope<T>,
) -> Response {
    if env.is_success() {
        state.revalidator().notify(entity);
    }
    respond(success, env)
}
