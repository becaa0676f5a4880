use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::api::rest::problem::Problem;
use crate::domain::error::DomainError;

pub const CODE_INVALID_BOUND: &str = "PRIMES_INVALID_BOUND";
pub const CODE_MALFORMED_BODY: &str = "PRIMES_MALFORMED_BODY";
pub const CODE_BOUND_TOO_LARGE: &str = "PRIMES_BOUND_TOO_LARGE";
pub const CODE_OVERFLOW: &str = "PRIMES_OVERFLOW";
pub const CODE_INTERNAL: &str = "PRIMES_INTERNAL";

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to RFC9457 Problem
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::InvalidBound { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Invalid Bound", message.clone())
                .with_code(CODE_INVALID_BOUND)
                .with_violation("max", message.clone())
        }
        DomainError::BoundTooLarge { .. } | DomainError::BoundOutOfRange { .. } => {
            Problem::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Bound Too Large",
                e.to_string(),
            )
            .with_code(CODE_BOUND_TOO_LARGE)
        }
        DomainError::Overflow { .. } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Bound Too Large",
            e.to_string(),
        )
        .with_code(CODE_OVERFLOW),
        DomainError::Internal(msg) => {
            tracing::error!(error = ?e, "Internal error: {}", msg);
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal error occurred",
            )
            .with_code(CODE_INTERNAL)
        }
    };

    problem
        .with_instance(instance)
        .with_trace_id(current_trace_id())
}

/// Map a JSON extractor rejection (bad syntax, wrong content type, ...) to a 400 Problem
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    tracing::debug!(error = %rejection, "rejecting malformed request body");
    Problem::new(
        StatusCode::BAD_REQUEST,
        "Malformed Body",
        rejection.body_text(),
    )
    .with_code(CODE_MALFORMED_BODY)
    .with_instance(instance)
    .with_trace_id(current_trace_id())
}

/// Implement From<DomainError> for Problem so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
