//! Contact endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use todocrm_core::{ContactChanges, ContactRepo, EntityKind, NewContact};

use super::{mutation, IdRequest, UpdateRequest};
use crate::http::error::respond;
use crate::http::extractors::EnvelopeJson;
use crate::state::AppState;

async fn list_contacts(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, ContactRepo::new(state.db()).list().await)
}

async fn create_contact(
    State(state): State<AppState>,
    EnvelopeJson(input): EnvelopeJson<NewContact>,
) -> Response {
    let env = ContactRepo::new(state.db()).create(&input).await;
    mutation(&state, EntityKind::Contact, StatusCode::CREATED, env)
}

async fn update_contact(
    State(state): State<AppState>,
    EnvelopeJson(req): EnvelopeJson<UpdateRequest<ContactChanges>>,
) -> Response {
    let env = ContactRepo::new(state.db())
        .update(&req.id, &req.updates)
        .await;
    mutation(&state, EntityKind::Contact, StatusCode::OK, env)
}

async fn delete_contact(
    State(state): State<AppState>,
    EnvelopeJson(req): EnvelopeJson<IdRequest>,
) -> Response {
    let env = ContactRepo::new(state.db()).delete(&req.id).await;
    mutation(&state, EntityKind::Contact, StatusCode::OK, env)
}

/// Contact routes: list, create, update and delete on `/api/contacts`
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/contacts",
        get(list_contacts)
            .post(create_contact)
            .put(update_contact)
            .delete(delete_contact),
    )
}
