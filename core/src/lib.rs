//! Adapter bridging callback-based pending HTTP calls into futures.
//!
//! # Overview
//! Client libraries that expose in-flight requests as one-shot-callback
//! handles (`PendingCall`) can be consumed with future combinators
//! instead of manual callback registration. `FutureCallAdapter` wires a
//! call's completion callback to a write-once promise and returns the
//! read side as an awaitable `CallFuture`, with cancellation propagated
//! back to the call. No networking, retrying, or request building happens
//! here; all of that stays in the wrapped client library.
//!
//! # Design
//! - Two adapter modes, selected explicitly at the call site: body mode
//!   (`adapt_body`) delivers the decoded payload and turns non-success
//!   statuses into failures; envelope mode (`adapt_response`) delivers
//!   the full `Response` and lets the consumer judge the status.
//! - Declared return shapes are resolved once at setup time through
//!   `FutureAdapterFactory` in a `HandlerChain`; the resulting
//!   `AdapterDescriptor` picks the mode without any runtime reflection.
//! - Duplicate settlement and cancel-after-complete are no-ops by
//!   construction (`Promise` / `CallFuture`), not assumptions about the
//!   surrounding libraries.
//! - The adapter never blocks: adaptation returns immediately and the
//!   future resolves when the call's own dispatch thread fires the
//!   callback, optionally marshaled onto a configured tokio runtime.

pub mod adapter;
pub mod call;
pub mod descriptor;
pub mod error;
pub mod promise;
pub mod response;

pub use adapter::FutureCallAdapter;
pub use call::{Completion, CompletionCallback, PendingCall};
pub use descriptor::{
    AdapterDescriptor, AdapterMode, FutureAdapterFactory, HandlerChain, ReturnTypeHandler,
    TypeShape,
};
pub use error::{AdapterError, BoxError, CallError};
pub use promise::{CallFuture, CancelHandle, Promise};
pub use response::{RawResponse, Response};
