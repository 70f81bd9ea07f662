use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::dispatcher::{DecisionDispatcher, SystemStatus};
use super::ExecutiveRole;
use crate::error::AppError;

/// Router builder exposing the executive decision endpoints.
pub fn decision_router(dispatcher: Arc<DecisionDispatcher>) -> Router {
    Router::new()
        .route("/api/v1/decisions/:decision_type", post(decide_handler))
        .route(
            "/api/v1/executives/:role/decisions/:decision_type",
            post(role_decide_handler),
        )
        .route("/api/v1/executives/status", get(status_handler))
        .with_state(dispatcher)
}

pub(crate) async fn decide_handler(
    State(dispatcher): State<Arc<DecisionDispatcher>>,
    Path(decision_type): Path<String>,
    Json(context): Json<Value>,
) -> Json<Value> {
    Json(dispatcher.dispatch(&decision_type, &context))
}

pub(crate) async fn role_decide_handler(
    State(dispatcher): State<Arc<DecisionDispatcher>>,
    Path((role, decision_type)): Path<(String, String)>,
    Json(context): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let role: ExecutiveRole = role.parse().map_err(|_| AppError::UnknownRole(role))?;
    Ok(Json(dispatcher.dispatch_as(role, &decision_type, &context)))
}

pub(crate) async fn status_handler(
    State(dispatcher): State<Arc<DecisionDispatcher>>,
) -> Json<SystemStatus> {
    Json(dispatcher.status())
}
