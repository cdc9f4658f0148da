//! Hiring status endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::feature::{names, FeatureFlags};
use crate::role::store::RoleStore;

pub const HIRING_MESSAGE: &str = "We're hiring! Check out our open roles.";
pub const NOT_HIRING_MESSAGE: &str = "We're not actively hiring right now.";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub hiring: bool,
    pub message: String,
    /// Roles visible in the default listing
    pub open_roles: usize,
}

#[derive(Clone)]
pub struct StatusState {
    pub store: Arc<RoleStore>,
    pub flags: Arc<dyn FeatureFlags>,
}

/// Hiring status message, controlled by the HiredStatusMessage flag
#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    operation_id = "getStatus",
    responses(
        (status = 200, description = "Hiring status", body = StatusResponse)
    )
)]
pub async fn get_status(State(state): State<StatusState>) -> Json<StatusResponse> {
    let hiring = state.flags.is_enabled(names::HIRED_STATUS_MESSAGE);
    let message = if hiring { HIRING_MESSAGE } else { NOT_HIRING_MESSAGE };

    Json(StatusResponse {
        hiring,
        message: message.to_string(),
        open_roles: state.store.list(false, false).len(),
    })
}

pub fn status_router(state: StatusState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_status))
        .with_state(state)
}
