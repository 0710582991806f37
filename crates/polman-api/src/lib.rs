//! # polman-api — Axum REST API for the Policy Manager
//!
//! CRUD backend for insurance policy records. The whole API surface lives
//! under `/api/policies`:
//!
//! | Method | Path                  | Operation            |
//! |--------|-----------------------|----------------------|
//! | GET    | `/api/policies`       | list every policy    |
//! | GET    | `/api/policies/paged` | one normalized page  |
//! | GET    | `/api/policies/{id}`  | fetch one policy     |
//! | POST   | `/api/policies`       | create (201)         |
//! | PUT    | `/api/policies/{id}`  | overwrite fields     |
//! | DELETE | `/api/policies/{id}`  | remove (204)         |
//!
//! ## Architecture
//!
//! Handlers delegate to [`service::PolicyService`], which composes the two
//! domain validation passes from `polman-core` around the in-memory store
//! in [`state::AppState`]. When `DATABASE_URL` is configured, mutations
//! are written through to Postgres via [`db`]. All failures map to
//! structured JSON via [`error::ApiError`].
//!
//! Health probes (`/health/*`) and `/openapi.json` sit outside the API
//! prefix; readiness pings the database when one is configured.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router.
///
/// Body size limit: 2 MiB — a policy record is tiny, anything larger is
/// not a legitimate request.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::policies::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks that the in-memory store is accessible and, when a pool is
/// configured, that the database answers. Returns 200 "ready" or 503
/// with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let _ = state.policies.len();

    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
