//! Prime Counter Module
//!
//! Serves prime counts over HTTP. The counting itself lives in `prime-sieve`;
//! this crate validates requests, enforces the configured bound limit and
//! maps failures to RFC 9457 problems.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - bound limit and sync/deferred counting
//! - `api/rest/` - DTOs, handlers, routes and error mapping
//! - `host.rs` - middleware stack and serve loop
//! - `config.rs` - module configuration

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod host;

pub use config::PrimeCounterConfig;
pub use prime_sieve::Bound;
pub use domain::{DomainError, Service, ServiceConfig};
pub use host::{HostConfig, build_router, serve, serve_listener};

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
