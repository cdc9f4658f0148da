//! Roles API
//!
//! REST endpoints for posting, browsing and approving roles.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        State, Path, Query,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::{ToSchema, IntoParams};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::feature::{names, FeatureFlags};
use crate::role::entity::{Role, RoleFields};
use crate::role::store::{ApproveOutcome, RoleStore};
use crate::role::validation::validate_create_request;
use crate::shared::error::{ErrorResponse, PlatformError};

/// Create role request. Missing fields are treated as empty strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRoleRequest {
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
}

impl From<CreateRoleRequest> for RoleFields {
    fn from(req: CreateRoleRequest) -> Self {
        RoleFields {
            title: req.title,
            description: req.description,
            department: req.department,
            location: req.location,
        }
    }
}

/// Role as seen by API callers, with expiration resolved at read time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_expired: bool,
    pub is_approved: bool,
}

impl RoleResponse {
    pub fn from_role(role: Role, now: DateTime<Utc>) -> Self {
        let is_expired = role.is_expired_at(now);
        Self {
            id: role.id.to_string(),
            title: role.title,
            description: role.description,
            department: role.department,
            location: role.location,
            created_at: role.created_at,
            expires_at: role.expires_at,
            is_expired,
            is_approved: role.is_approved,
        }
    }
}

/// Approval confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRoleResponse {
    pub id: String,
    pub message: String,
    pub is_approved: bool,
}

/// Query parameters for roles list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RolesQuery {
    /// Include expired roles (honored only when ShowExpiredRoles is enabled)
    pub include_expired: Option<bool>,
}

/// Roles service state
#[derive(Clone)]
pub struct RolesState {
    pub store: Arc<RoleStore>,
    pub flags: Arc<dyn FeatureFlags>,
}

/// Ids that do not parse were never issued, so they are simply not found
fn parse_role_id(id: &str) -> Result<Uuid, PlatformError> {
    Uuid::parse_str(id).map_err(|_| PlatformError::not_found("Role", id))
}

/// Post a new role
#[utoipa::path(
    post,
    path = "/roles",
    tag = "roles",
    operation_id = "createRole",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "Role posting is disabled", body = ErrorResponse)
    )
)]
pub async fn create_role(
    State(state): State<RolesState>,
    payload: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> Result<Response, PlatformError> {
    if !state.flags.is_enabled(names::ENABLE_ROLE_POSTING) {
        return Err(PlatformError::service_unavailable("Role posting is currently disabled"));
    }
    let Json(req) = payload?;

    let fields: RoleFields = req.into();
    if let Err(e) = validate_create_request(&fields) {
        debug!(reason = %e, "Rejected role creation request");
        return Err(e.into());
    }

    let require_approval = state.flags.is_enabled(names::REQUIRE_ROLE_APPROVAL);
    let role = state.store.create(fields, require_approval);
    let location = format!("/roles/{}", role.id);
    let body = RoleResponse::from_role(role, state.store.now());

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

/// List open roles
#[utoipa::path(
    get,
    path = "/roles",
    tag = "roles",
    operation_id = "listRoles",
    params(RolesQuery),
    responses(
        (status = 200, description = "List of roles", body = [RoleResponse]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    )
)]
pub async fn list_roles(
    State(state): State<RolesState>,
    query: Result<Query<RolesQuery>, QueryRejection>,
) -> Result<Json<Vec<RoleResponse>>, PlatformError> {
    let Query(query) = query?;
    let include_expired = query.include_expired.unwrap_or(false)
        && state.flags.is_enabled(names::SHOW_EXPIRED_ROLES);

    let now = state.store.now();
    let roles = state.store
        .list(include_expired, false)
        .into_iter()
        .map(|r| RoleResponse::from_role(r, now))
        .collect();

    Ok(Json(roles))
}

/// Get role by ID
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "roles",
    operation_id = "getRole",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role found", body = RoleResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn get_role(
    State(state): State<RolesState>,
    Path(id): Path<String>,
) -> Result<Json<RoleResponse>, PlatformError> {
    let role_id = parse_role_id(&id)?;
    let role = state.store.get(&role_id)
        .ok_or_else(|| PlatformError::not_found("Role", &id))?;

    Ok(Json(RoleResponse::from_role(role, state.store.now())))
}

/// Approve a role
#[utoipa::path(
    put,
    path = "/roles/{id}/approve",
    tag = "roles",
    operation_id = "approveRole",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role approved, or already approved", body = ApproveRoleResponse),
        (status = 400, description = "Approval workflow is disabled", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
pub async fn approve_role(
    State(state): State<RolesState>,
    Path(id): Path<String>,
) -> Result<Json<ApproveRoleResponse>, PlatformError> {
    if !state.flags.is_enabled(names::REQUIRE_ROLE_APPROVAL) {
        return Err(PlatformError::validation("Role approval workflow is not enabled"));
    }

    // Existence is checked here; the store treats unknown ids as a no-op.
    let role_id = parse_role_id(&id)?;
    if state.store.get(&role_id).is_none() {
        return Err(PlatformError::not_found("Role", &id));
    }

    let message = match state.store.approve(&role_id) {
        ApproveOutcome::Approved => "Role approved",
        ApproveOutcome::AlreadyApproved => "Role is already approved",
        ApproveOutcome::NotFound => return Err(PlatformError::not_found("Role", &id)),
    };

    Ok(Json(ApproveRoleResponse {
        id: role_id.to_string(),
        message: message.to_string(),
        is_approved: true,
    }))
}

/// Create roles router
pub fn roles_router(state: RolesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_role, list_roles))
        .routes(routes!(get_role))
        .routes(routes!(approve_role))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::entity::ExpirationPeriod;
    use chrono::Duration;

    #[test]
    fn test_role_response_resolves_expiry() {
        let store = RoleStore::new(ExpirationPeriod::default());
        let role = store.create(RoleFields::new("Engineer", "Build things"), false);
        let expires_at = role.expires_at;

        let fresh = RoleResponse::from_role(role.clone(), role.created_at);
        assert!(!fresh.is_expired);
        assert_eq!(fresh.id, role.id.to_string());

        let stale = RoleResponse::from_role(role, expires_at + Duration::seconds(1));
        assert!(stale.is_expired);
    }

    #[test]
    fn test_role_response_is_camel_case() {
        let store = RoleStore::default();
        let role = store.create(RoleFields::new("Engineer", "Build things"), true);
        let json = serde_json::to_value(RoleResponse::from_role(role, store.now())).unwrap();

        for key in ["id", "title", "description", "department", "location", "createdAt", "expiresAt", "isExpired", "isApproved"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["isApproved"], false);
    }

    #[test]
    fn test_create_request_defaults_missing_fields() {
        let req: CreateRoleRequest = serde_json::from_str(r#"{"title":"Engineer"}"#).unwrap();
        let fields: RoleFields = req.into();
        assert_eq!(fields.title, "Engineer");
        assert!(fields.description.is_empty());
        assert!(fields.location.is_empty());
    }

    #[test]
    fn test_unparseable_id_is_not_found() {
        assert!(matches!(parse_role_id("not-a-uuid"), Err(PlatformError::NotFound { .. })));
    }
}
