use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::AppConfig,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

/// Full router with the same error layers as the server binary, over any
/// connection (usually a `MockDatabase`).
pub fn test_app(db: DatabaseConnection) -> Router {
    let state = AppState::new(AppConfig::default(), db);
    router(Arc::clone(&state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}

/// Router over a mock that holds no canned results. Any request that reaches
/// the store fails, which makes it a probe for "no store access".
pub fn test_router() -> Router {
    test_app(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}
