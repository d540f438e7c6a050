//! Axum router setup

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{
    assets::static_service,
    handlers::{
        api_not_found, get_modules, get_package_functions, get_package_graph, get_packages,
        get_stats, health_check, missing_package,
    },
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .route("/modules", get(get_modules))
        .route("/packages", get(get_packages))
        .route("/packages/graph", get(get_package_graph))
        // The wildcard does not match an empty segment.
        .route("/packages/functions", get(missing_package))
        .route("/packages/functions/", get(missing_package))
        .route("/packages/functions/*package", get(get_package_functions))
        .fallback(api_not_found);

    let mut router = Router::new().nest("/api", api);
    if let Some(dir) = &state.static_dir {
        router = router.fallback_service(static_service(dir));
    }

    router
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Open CORS for every response; any `OPTIONS` request is answered with 204.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
