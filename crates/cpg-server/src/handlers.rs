//! REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use cpg_core::{
    CpgError, CpgResult, DbStats, Explorer, FunctionInfo, GraphResponse, ModuleInfo, PackageInfo,
};
use serde::{Deserialize, Serialize};

use crate::ServerState;

pub const MISSING_PACKAGE: &str = "missing package name";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `?module=` on the package listing.
#[derive(Debug, Default, Deserialize)]
pub struct PackagesQuery {
    pub module: Option<String>,
}

/// Error envelope: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CpgError> for ApiError {
    fn from(err: CpgError) -> Self {
        if err.is_validation() {
            ApiError::bad_request(err.to_string())
        } else {
            ApiError::internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        }
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Run a blocking store read off the async runtime.
async fn run_query<T, F>(state: Arc<ServerState>, query: F) -> Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Explorer) -> CpgResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || query(&state.explorer))
        .await
        .map_err(|e| ApiError::internal(format!("query task failed: {e}")))?;
    Ok(Json(result?))
}

pub async fn get_stats(State(state): State<Arc<ServerState>>) -> Result<Json<DbStats>, ApiError> {
    run_query(state, Explorer::stats).await
}

pub async fn get_modules(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<ModuleInfo>>, ApiError> {
    run_query(state, Explorer::modules).await
}

pub async fn get_packages(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PackagesQuery>,
) -> Result<Json<Vec<PackageInfo>>, ApiError> {
    run_query(state, move |explorer| {
        explorer.packages(params.module.as_deref())
    })
    .await
}

pub async fn get_package_graph(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<GraphResponse>, ApiError> {
    run_query(state, Explorer::package_graph).await
}

/// Package paths contain slashes, so they arrive as a wildcard capture.
pub async fn get_package_functions(
    State(state): State<Arc<ServerState>>,
    Path(package): Path<String>,
) -> Result<Json<Vec<FunctionInfo>>, ApiError> {
    let package = package.trim_start_matches('/').to_string();
    if package.is_empty() {
        return Err(ApiError::bad_request(MISSING_PACKAGE));
    }
    run_query(state, move |explorer| explorer.package_functions(&package)).await
}

/// `/api/packages/functions` with no package segment.
pub async fn missing_package() -> ApiError {
    ApiError::bad_request(MISSING_PACKAGE)
}

pub async fn api_not_found() -> ApiError {
    ApiError::not_found("not found")
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
