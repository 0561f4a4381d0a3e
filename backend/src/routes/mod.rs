//! Route definitions for Gestione Olio

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public + protected identity)
        .nest("/auth", auth_routes())
        // Protected routes - warehouse reference data
        .nest("/warehouses", warehouse_routes())
        // Protected routes - stock projections
        .nest("/stock", stock_routes())
        // Protected routes - movement ledger
        .nest("/movements", movement_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .nest("/me", identity_routes())
}

/// Current-identity route (protected)
fn identity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Warehouse routes (protected)
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_warehouses))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_stock))
        .route("/variants", get(handlers::list_stock_variants))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Movement routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_movements).post(handlers::record_movement),
        )
        .route("/export", get(handlers::export_movements_csv))
        .route_layer(middleware::from_fn(auth_middleware))
}
