use axum::{
    routing::{get, put},
    Router,
};

use super::handlers;
use crate::shared::store::AppState;

/// All routes of the service
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM USERS
        // ========================================
        .route(
            "/api/system/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        // ========================================
        // ACCESS ENTITLEMENTS AND ACCESS POINTS
        // ========================================
        .route(
            "/api/access/entitlements",
            get(handlers::access::list_entitlements),
        )
        .route(
            "/api/access/entitlements/:id",
            get(handlers::access::get_entitlement),
        )
        .route(
            "/api/access/entitlements/:id/access-points",
            put(handlers::access::update_access_points),
        )
        .route(
            "/api/access/points",
            get(handlers::access::list_access_points).post(handlers::access::create_access_point),
        )
        .with_state(state)
}
