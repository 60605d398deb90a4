use super::handlers;
use super::state::AppState;
use crate::config::HttpConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Per-deployment HTTP options
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Body cap for uploads; axum's 2 MB default applies when unset
    pub max_upload_bytes: Option<usize>,

    /// Allow cross-origin requests from anywhere
    pub cors_permissive: bool,

    /// Serve files from this directory for unmatched paths
    pub static_dir: Option<String>,
}

impl RouterOptions {
    pub fn from_config(http: &HttpConfig, static_dir: Option<String>) -> Self {
        Self {
            max_upload_bytes: Some(http.max_upload_bytes),
            cors_permissive: http.cors_permissive,
            static_dir,
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let mut upload = post(handlers::upload_timecard);
    if let Some(limit) = options.max_upload_bytes {
        upload = upload.layer(DefaultBodyLimit::max(limit));
    }

    let mut router = Router::new()
        // Liveness
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Timecards
        .route("/upload_timecard", upload)
        .route("/edit_timecard", put(handlers::edit_timecard));

    // Built frontend assets for everything the API does not claim
    if let Some(dir) = options.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    if options.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
