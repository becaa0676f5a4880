//! HTTP host: owns the middleware stack and the serve loop.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use axum::http::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::rest::register_routes;
use crate::domain::service::Service;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit_bytes() -> usize {
    16 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl HostConfig {
    /// # Errors
    /// Returns an error if `bind_addr` is not an IP address.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Build the full application router: module routes plus middleware.
pub fn build_router(service: Arc<Service>, config: &HostConfig) -> Router {
    let mut router = register_routes(Router::new(), service);

    // 4) Body limit
    router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

    // 3) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(config.request_timeout_secs),
    ));

    // 2) Trace
    router = router.layer(TraceLayer::new_for_http().make_span_with(
        |req: &Request<axum::body::Body>| {
            let rid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %rid,
            )
        },
    ));

    // 1) Request id: set on the way in (outermost), echoed on the way out
    router = router.layer(PropagateRequestIdLayer::x_request_id());
    router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Bind `config`'s address and serve until `cancel` fires.
///
/// # Errors
/// Returns an error if the address is invalid, binding fails, or the server
/// stops with an I/O error.
pub async fn serve(
    router: Router,
    config: &HostConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve_listener(listener, router, cancel).await
}

/// Serve on an already bound listener until `cancel` fires.
///
/// # Errors
/// Returns an error if the server stops with an I/O error.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server bound on {}", addr);
    }

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
