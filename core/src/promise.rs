//! Write-once promise and its consumer-facing future.
//!
//! # Design
//! The settlement cell is a `tokio::sync::oneshot` channel with the sender
//! parked behind a `Mutex<Option<_>>`. `try_success` / `try_failure` take
//! the sender out, so the first settlement wins and every later attempt is
//! a silent no-op. Cancellation intent flows the other way: the future
//! holds a `Canceller` whose hook fires at most once, on explicit
//! `cancel()`, through a `CancelHandle`, or when an unresolved future is
//! dropped. Both guarantees are implemented here rather than assumed of
//! the surrounding libraries.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::CallError;

type Settlement<T> = Result<T, CallError>;

/// Write-once settlement cell for one adapted call.
pub struct Promise<T> {
    tx: Mutex<Option<oneshot::Sender<Settlement<T>>>>,
}

impl<T: Send + 'static> Promise<T> {
    /// Create a promise and its consumer-facing future.
    ///
    /// `on_cancel` runs at most once, when cancellation is requested on the
    /// future or the future is dropped before settlement.
    pub fn pair(on_cancel: impl Fn() + Send + Sync + 'static) -> (Promise<T>, CallFuture<T>) {
        let (tx, rx) = oneshot::channel();
        let promise = Promise {
            tx: Mutex::new(Some(tx)),
        };
        let future = CallFuture {
            rx,
            done: false,
            canceller: Arc::new(Canceller {
                requested: AtomicBool::new(false),
                forward: Box::new(on_cancel),
            }),
        };
        (promise, future)
    }

    /// Settle with a value. Returns false if the promise was already
    /// settled or the consumer is gone; the value is discarded in that case.
    pub fn try_success(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with a failure. No-op after the first settlement.
    pub fn try_failure(&self, error: CallError) -> bool {
        self.settle(Err(error))
    }

    pub fn is_settled(&self) -> bool {
        self.tx.lock().unwrap().is_none()
    }

    fn settle(&self, settlement: Settlement<T>) -> bool {
        let Some(tx) = self.tx.lock().unwrap().take() else {
            debug!("late settlement ignored, promise already settled");
            return false;
        };
        // send only fails when the consumer dropped the future; the
        // settlement is discarded either way.
        tx.send(settlement).is_ok()
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settled", &self.tx.lock().unwrap().is_none())
            .finish()
    }
}

/// Backward cancellation path shared by the future and its handles.
struct Canceller {
    requested: AtomicBool,
    forward: Box<dyn Fn() + Send + Sync>,
}

impl Canceller {
    fn request(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            debug!("forwarding cancellation to the underlying call");
            (self.forward)();
        }
    }
}

/// Read side of an adapted call.
///
/// Resolves to the translated call outcome. Dropping the future before it
/// resolves counts as losing interest and forwards cancellation to the
/// underlying call.
pub struct CallFuture<T> {
    rx: oneshot::Receiver<Settlement<T>>,
    done: bool,
    canceller: Arc<Canceller>,
}

impl<T> CallFuture<T> {
    /// Request cancellation of the underlying call. Idempotent; harmless
    /// after the call completed (the call defines that case as a no-op).
    pub fn cancel(&self) {
        self.canceller.request();
    }

    /// Detached handle for cancelling while the future is being awaited.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            inner: Arc::clone(&self.canceller),
        }
    }

    /// Whether cancellation has been requested on this future.
    pub fn is_cancel_requested(&self) -> bool {
        self.canceller.requested.load(Ordering::SeqCst)
    }
}

impl<T> Future for CallFuture<T> {
    type Output = Settlement<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(settlement)) => {
                this.done = true;
                Poll::Ready(settlement)
            }
            // The promise was dropped without settling: the call abandoned
            // its callback, typically because it honored a cancellation.
            Poll::Ready(Err(_)) => {
                this.done = true;
                Poll::Ready(Err(CallError::Abandoned))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Drop for CallFuture<T> {
    fn drop(&mut self) {
        if !self.done {
            self.canceller.request();
        }
    }
}

impl<T> fmt::Debug for CallFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallFuture")
            .field("done", &self.done)
            .field("cancel_requested", &self.is_cancel_requested())
            .finish()
    }
}

/// Cloneable handle that cancels the associated `CallFuture`.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<Canceller>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.inner.request();
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancel_requested", &self.inner.requested.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counted_pair<T: Send + 'static>() -> (Promise<T>, CallFuture<T>, Arc<AtomicUsize>) {
        let cancels = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cancels);
        let (promise, future) = Promise::pair(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (promise, future, cancels)
    }

    #[tokio::test]
    async fn first_settlement_wins() {
        let (promise, future, _) = counted_pair::<u32>();
        assert!(promise.try_success(1));
        assert!(!promise.try_success(2));
        assert!(!promise.try_failure(CallError::MissingBody));
        assert!(promise.is_settled());
        assert_eq!(future.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failure_settles_err() {
        let (promise, future, _) = counted_pair::<u32>();
        assert!(promise.try_failure(CallError::MissingBody));
        assert!(matches!(future.await, Err(CallError::MissingBody)));
    }

    #[tokio::test]
    async fn dropped_promise_yields_abandoned() {
        let (promise, future, _) = counted_pair::<u32>();
        drop(promise);
        assert!(matches!(future.await, Err(CallError::Abandoned)));
    }

    #[test]
    fn cancel_forwards_exactly_once() {
        let (_promise, future, cancels) = counted_pair::<u32>();
        future.cancel();
        future.cancel();
        future.cancel_handle().cancel();
        assert!(future.is_cancel_requested());
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_unresolved_future_forwards_cancel() {
        let (_promise, future, cancels) = counted_pair::<u32>();
        drop(future);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completed_future_does_not_forward_cancel_on_drop() {
        let (promise, future, cancels) = counted_pair::<u32>();
        promise.try_success(7);
        assert_eq!(future.await.unwrap(), 7);
        assert_eq!(cancels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_after_settlement_leaves_result_intact() {
        let (promise, future, cancels) = counted_pair::<u32>();
        let handle = future.cancel_handle();
        promise.try_success(7);
        handle.cancel();
        // The forwarded cancel hits the call (a no-op there); the settled
        // value is unaffected.
        assert_eq!(future.await.unwrap(), 7);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }
}
