use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const HEALTHZ_PATH: &str = "/healthz";
pub const SYNC_PATH: &str = "/api/sync";
pub const ASYNC_PATH: &str = "/api/async";

#[allow(clippy::needless_pass_by_value)] // Arc is intentionally passed by value for Extension layer
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // GET /healthz - Liveness probe
        .route(HEALTHZ_PATH, get(handlers::healthz))
        // POST /api/sync - Count primes on the request task
        .route(SYNC_PATH, post(handlers::count_primes_sync))
        // POST /api/async - Count primes on the blocking pool
        .route(ASYNC_PATH, post(handlers::count_primes_async))
        .layer(Extension(service))
}
