use crate::interface_adapters::handlers::{
    approve_request, deny_request, health, list_requests, login, logout, lookup_manager, me,
    root, submit_request,
};
use crate::interface_adapters::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/manager/login", post(login).delete(logout))
        .route("/api/manager/me", get(me))
        .route("/api/manager/requests", get(list_requests))
        .route("/api/manager/requests/{id}/approve", post(approve_request))
        .route("/api/manager/requests/{id}/deny", post(deny_request))
        .route("/api/managers/{id}", get(lookup_manager))
        .route("/api/requests", post(submit_request))
        .with_state(state)
}
