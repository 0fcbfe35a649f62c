//! The pending-call collaborator the adapter wraps.

use crate::error::BoxError;
use crate::response::Response;

/// The single completion signal a pending call delivers.
#[derive(Debug)]
pub enum Completion<T> {
    /// A response was obtained, whatever its status.
    Response(Response<T>),
    /// The call failed at the transport or protocol level before any
    /// response was obtained.
    Error(BoxError),
}

/// One-shot completion callback registered on a `PendingCall`.
pub type CompletionCallback<T> = Box<dyn FnOnce(Completion<T>) + Send>;

/// An in-flight HTTP request owned by an external client library.
///
/// # Contract
/// - `enqueue` accepts exactly one callback per call, and the call fires
///   it exactly once, on a thread owned by the call's own dispatch
///   mechanism. The adapter relies on this single-firing guarantee and
///   does not defend against duplicates.
/// - `cancel` is best-effort and asynchronous: the request may still
///   complete normally after cancellation was requested. Cancelling an
///   already-completed call is a no-op.
///
/// Adapted calls are held as `Arc<C>` so the adapter can retain a cancel
/// handle after handing the callback over.
pub trait PendingCall: Send + Sync + 'static {
    /// The decoded body type the executing layer produces.
    type Payload: Send + 'static;

    /// Register the one-shot completion callback and start the request if
    /// it has not started yet.
    fn enqueue(&self, callback: CompletionCallback<Self::Payload>);

    /// Request cancellation of the in-flight request.
    fn cancel(&self);
}
