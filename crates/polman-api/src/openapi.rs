//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the policy API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Policy Manager API",
        version = "0.3.2",
        description = "CRUD REST backend for insurance policy records: create, read (single/list/paged), update, delete, with field-level validation and centralized error formatting.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::policies::list_policies,
        crate::routes::policies::list_policies_paged,
        crate::routes::policies::get_policy,
        crate::routes::policies::create_policy,
        crate::routes::policies::update_policy,
        crate::routes::policies::delete_policy,
    ),
    components(schemas(
        polman_core::PolicyRecord,
        polman_core::PolicyInput,
        polman_core::PolicyStatus,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "policies", description = "Insurance policy CRUD and paged listing"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
