//! Todo endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use todocrm_core::{EntityKind, NewTodo, TodoChanges, TodoRepo};

use super::{mutation, IdRequest, UpdateRequest};
use crate::http::error::respond;
use crate::http::extractors::EnvelopeJson;
use crate::state::AppState;

/// GET /api/todos - newest first
async fn list_todos(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, TodoRepo::new(state.db()).list().await)
}

/// POST /api/todos
async fn create_todo(
    State(state): State<AppState>,
    EnvelopeJson(input): EnvelopeJson<NewTodo>,
) -> Response {
    let env = TodoRepo::new(state.db()).create(&input).await;
    mutation(&state, EntityKind::Todo, StatusCode::CREATED, env)
}

/// PUT /api/todos - body `{ id, updates }`
async fn update_todo(
    State(state): State<AppState>,
    EnvelopeJson(req): EnvelopeJson<UpdateRequest<TodoChanges>>,
) -> Response {
    let env = TodoRepo::new(state.db()).update(&req.id, &req.updates).await;
    mutation(&state, EntityKind::Todo, StatusCode::OK, env)
}

/// DELETE /api/todos - body `{ id }`
async fn delete_todo(
    State(state): State<AppState>,
    EnvelopeJson(req): EnvelopeJson<IdRequest>,
) -> Response {
    let env = TodoRepo::new(state.db()).delete(&req.id).await;
    mutation(&state, EntityKind::Todo, StatusCode::OK, env)
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/todos",
        get(list_todos)
            .post(create_todo)
            .put(update_todo)
            .delete(delete_todo),
    )
}
