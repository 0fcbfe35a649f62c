//! Error types for adapter setup and adapted calls.
//!
//! # Design
//! The two enums split the taxonomy by when the error can occur.
//! `AdapterError` is a configuration mistake caught synchronously while
//! resolving a declared return shape; it never travels through a future.
//! `CallError` is the failure channel of an adapted call's future, and is
//! deliberately not generic over the payload so a single error type works
//! for every adapted call.

use crate::response::RawResponse;

/// Boxed transport or decoding failure reported by a `PendingCall`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Setup-time configuration errors. Resolution aborts immediately; no
/// translator is constructed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The declared type used the future wrapper without naming a payload.
    #[error("Future return type must be declared as Future<T> or Future<Response<T>>")]
    UnparameterizedFuture,

    /// The declared type nested the response envelope without naming a payload.
    #[error("Response must be declared as Response<T> inside Future")]
    UnparameterizedResponse,
}

/// Failures delivered through an adapted call's future.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// A response arrived but carried a non-success status (body mode only).
    /// Carries the envelope metadata for inspection.
    #[error("HTTP status {}", .0.status)]
    Status(RawResponse),

    /// The call failed before any response was obtained.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// A success-status response arrived with no decoded body (body mode only).
    #[error("success response carried no body")]
    MissingBody,

    /// The call dropped its callback without delivering a result, usually
    /// because it honored a cancellation request.
    #[error("call was abandoned before delivering a result")]
    Abandoned,
}
