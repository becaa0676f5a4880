use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use prime_sieve::Bound;

use crate::domain::service::Service;

use super::dto::{CountPrimesRequest, CountPrimesResponse};
use super::error::{domain_error_to_problem, json_rejection_to_problem};
use super::problem::Problem;

pub type ApiResult<T> = Result<T, Problem>;

#[allow(clippy::unused_async)] // axum handlers must be async
pub async fn healthz() -> &'static str {
    "OK\n"
}

/// Runs the sieve inline on the request task.
///
/// The request timeout cannot preempt this, so the service caps it at its
/// `sync_max_bound`.
#[allow(clippy::unused_async)] // axum handlers must be async
pub async fn count_primes_sync(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    payload: Result<Json<CountPrimesRequest>, JsonRejection>,
) -> ApiResult<Json<CountPrimesResponse>> {
    let bound = bound_from_payload(payload, uri.path())?;
    let count = svc
        .count_primes(bound)
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(CountPrimesResponse { count }))
}

/// Runs the sieve on the blocking pool.
pub async fn count_primes_async(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    payload: Result<Json<CountPrimesRequest>, JsonRejection>,
) -> ApiResult<Json<CountPrimesResponse>> {
    let bound = bound_from_payload(payload, uri.path())?;
    let count = svc
        .count_primes_deferred(bound)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(CountPrimesResponse { count }))
}

fn bound_from_payload(
    payload: Result<Json<CountPrimesRequest>, JsonRejection>,
    instance: &str,
) -> ApiResult<Bound> {
    let Json(req) = payload.map_err(|rejection| json_rejection_to_problem(&rejection, instance))?;
    req.bound()
        .map_err(|e| domain_error_to_problem(&e, instance))
}
