//! Domain layer for the prime counter module

pub mod error;
pub mod service;

pub use error::DomainError;
pub use service::{Service, ServiceConfig};
