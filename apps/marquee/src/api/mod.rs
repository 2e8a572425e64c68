//! # Marquee HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Catalog counts
//! - `GET|POST|PUT /films` - List, create, update films
//! - `GET|DELETE /films/{id}` - Read, delete a film
//! - `GET /films/popular?count=N` - Most-liked films
//! - `PUT|DELETE /films/{id}/like/{userId}` - Add, remove a like
//! - `GET|POST|PUT /users` - List, create, update users
//! - `GET|DELETE /users/{id}` - Read, delete a user
//! - `GET /users/{id}/friends` - Friends of a user
//! - `PUT|DELETE /users/{id}/friends/{friendId}` - Add, remove a friendship
//! - `GET /users/{id}/friends/common/{otherId}` - Common friends
//!
//! ## Status Mapping
//!
//! - `NotFound` -> 404
//! - validation failures and non-positive counts -> 400
//! - everything else -> 500

mod handlers;
mod types;
mod validation;

// Re-export handlers and types for integration tests (via `marquee::api::*`)
pub use handlers::status_for;
pub use types::{ErrorResponse, FilmRequest, HealthResponse, PopularQuery, UserRequest};
pub use validation::is_valid_email;

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use marquee_core::{Catalog, CatalogError, primitives::DEFAULT_TOP_COUNT};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the catalog.
#[derive(Clone)]
pub struct AppState {
    /// The catalog. One lock covers both stores, so two-sided updates are atomic.
    pub catalog: Arc<RwLock<Catalog>>,
    /// Count used by `/films/popular` when the request has none.
    pub popular_default: usize,
}

impl AppState {
    /// Create new app state around a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            popular_default: DEFAULT_TOP_COUNT,
        }
    }

    /// Override the default `/films/popular` count.
    #[must_use]
    pub fn with_popular_default(mut self, count: usize) -> Self {
        self.popular_default = count;
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from the configured origins.
///
/// - `["*"]`: allows all origins (development mode)
/// - empty: localhost only (restrictive default)
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            let trimmed = origin.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(hv) => {
                    tracing::info!("CORS: Allowing origin: {}", trimmed);
                    Some(hv)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return restricted_cors(localhost_origins());
    }
    restricted_cors(allowed)
}

fn localhost_origins() -> Vec<HeaderValue> {
    [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect()
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router with localhost-only CORS.
pub fn create_router(state: AppState) -> Router {
    build_router(state, &[])
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let cors = build_cors_layer(cors_origins);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route(
            "/films",
            get(handlers::list_films_handler)
                .post(handlers::create_film_handler)
                .put(handlers::update_film_handler),
        )
        .route("/films/popular", get(handlers::popular_films_handler))
        .route(
            "/films/{id}",
            get(handlers::get_film_handler).delete(handlers::delete_film_handler),
        )
        .route(
            "/films/{id}/like/{user_id}",
            axum::routing::put(handlers::add_like_handler).delete(handlers::remove_like_handler),
        )
        .route(
            "/users",
            get(handlers::list_users_handler)
                .post(handlers::create_user_handler)
                .put(handlers::update_user_handler),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user_handler).delete(handlers::delete_user_handler),
        )
        .route("/users/{id}/friends", get(handlers::list_friends_handler))
        .route(
            "/users/{id}/friends/{friend_id}",
            axum::routing::put(handlers::add_friend_handler)
                .delete(handlers::remove_friend_handler),
        )
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(handlers::common_friends_handler),
        )
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &ServerConfig, catalog: Catalog) -> Result<(), CatalogError> {
    let state = AppState::new(catalog).with_popular_default(config.popular_default_count);
    let router = build_router(state, &config.cors_origins);
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Marquee HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
