//! # Policy API
//!
//! Insurance policy CRUD and paged listing:
//!
//! - GET    /api/policies — list every policy
//! - GET    /api/policies/paged — one page, `?page&size&sort&direction`
//! - GET    /api/policies/:id — fetch one policy
//! - POST   /api/policies — create (201)
//! - PUT    /api/policies/:id — overwrite client fields (200)
//! - DELETE /api/policies/:id — remove (204)
//!
//! Handlers hold no business logic beyond extraction — they delegate to
//! [`PolicyService`] and let [`ApiError`] shape every failure response.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use polman_core::{
    PageRequest, PagedResult, PolicyInput, PolicyRecord, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD,
};

use crate::error::ApiError;
use crate::extractors::extract_validated_json;
use crate::service::PolicyService;
use crate::state::AppState;

/// Raw pagination query parameters; absent values fall back to the
/// centralized defaults before normalization.
#[derive(Debug, Default, Deserialize)]
pub struct PagedQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl PagedQuery {
    fn into_request(self) -> Result<PageRequest, ApiError> {
        let request = PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort.unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string()),
            self.direction.as_deref().unwrap_or(DEFAULT_SORT_DIRECTION),
        )?;
        Ok(request)
    }
}

/// Build the policies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/policies", get(list_policies).post(create_policy))
        .route("/api/policies/paged", get(list_policies_paged))
        .route(
            "/api/policies/:id",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
}

/// GET /api/policies — List every policy.
#[utoipa::path(
    get,
    path = "/api/policies",
    responses(
        (status = 200, description = "All stored policies", body = Vec<PolicyRecord>),
    ),
    tag = "policies"
)]
pub(crate) async fn list_policies(State(state): State<AppState>) -> Json<Vec<PolicyRecord>> {
    Json(PolicyService::new(state).list_all())
}

/// GET /api/policies/paged — One normalized page of policies.
#[utoipa::path(
    get,
    path = "/api/policies/paged",
    params(
        ("page" = Option<i64>, Query, description = "Page index (default 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default 5)"),
        ("sort" = Option<String>, Query, description = "Sort field (default id)"),
        ("direction" = Option<String>, Query, description = "asc or anything else for desc"),
    ),
    responses(
        (status = 200, description = "Page of policies with position metadata"),
        (status = 400, description = "Negative page or size below one", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn list_policies_paged(
    State(state): State<AppState>,
    query: Result<Query<PagedQuery>, QueryRejection>,
) -> Result<Json<PagedResult<PolicyRecord>>, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = params.into_request()?;
    Ok(Json(PolicyService::new(state).list_paged(request)?))
}

/// GET /api/policies/:id — Fetch a single policy.
#[utoipa::path(
    get,
    path = "/api/policies/{id}",
    params(("id" = i64, Path, description = "Policy id")),
    responses(
        (status = 200, description = "Policy found", body = PolicyRecord),
        (status = 404, description = "No policy with that id", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PolicyRecord>, ApiError> {
    Ok(Json(PolicyService::new(state).get_by_id(id)?))
}

/// POST /api/policies — Create a policy.
#[utoipa::path(
    post,
    path = "/api/policies",
    request_body = PolicyInput,
    responses(
        (status = 201, description = "Policy created", body = PolicyRecord),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn create_policy(
    State(state): State<AppState>,
    body: Result<Json<PolicyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PolicyRecord>), ApiError> {
    let input = extract_validated_json(body)?;
    let record = PolicyService::new(state).create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/policies/:id — Overwrite the client fields of a policy.
#[utoipa::path(
    put,
    path = "/api/policies/{id}",
    params(("id" = i64, Path, description = "Policy id")),
    request_body = PolicyInput,
    responses(
        (status = 200, description = "Policy updated", body = PolicyRecord),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
        (status = 404, description = "No policy with that id", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn update_policy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<PolicyInput>, JsonRejection>,
) -> Result<Json<PolicyRecord>, ApiError> {
    let input = extract_validated_json(body)?;
    Ok(Json(PolicyService::new(state).update(id, input).await?))
}

/// DELETE /api/policies/:id — Remove a policy.
#[utoipa::path(
    delete,
    path = "/api/policies/{id}",
    params(("id" = i64, Path, description = "Policy id")),
    responses(
        (status = 204, description = "Policy removed"),
        (status = 404, description = "No policy with that id", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn delete_policy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    PolicyService::new(state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
