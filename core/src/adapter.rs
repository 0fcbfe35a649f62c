//! Translators turning pending calls into futures.
//!
//! # Design
//! `adapt_body` and `adapt_response` share one lifecycle and differ only
//! in how a delivered response is translated into a settlement. The
//! callback handed to the call does no I/O and takes no locks beyond the
//! promise's sender cell, so it is safe to run on whatever thread the
//! call's dispatch mechanism uses. With a configured runtime handle the
//! settlement itself is instead spawned onto that runtime, decoupling the
//! thread the callback fires on from the thread the consumer observes
//! completion on.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::call::{Completion, PendingCall};
use crate::error::CallError;
use crate::promise::{CallFuture, Promise};
use crate::response::Response;

/// Bridges `PendingCall`s into `CallFuture`s.
///
/// Construction and adaptation are synchronous and non-blocking; the
/// returned future resolves whenever the call's callback fires.
#[derive(Debug, Clone, Default)]
pub struct FutureCallAdapter {
    runtime: Option<Handle>,
}

impl FutureCallAdapter {
    /// Adapter that settles promises inline on the call's callback thread.
    /// The consumer task is woken on whichever executor it polls from.
    pub fn new() -> Self {
        FutureCallAdapter { runtime: None }
    }

    /// Adapter that marshals promise settlement onto `runtime` instead of
    /// settling inline on the call's callback thread.
    pub fn with_runtime(runtime: Handle) -> Self {
        FutureCallAdapter {
            runtime: Some(runtime),
        }
    }

    /// Adapt a call in body mode: the future resolves to the decoded body,
    /// and any non-success status becomes a `CallError::Status` failure.
    pub fn adapt_body<C>(&self, call: Arc<C>) -> CallFuture<C::Payload>
    where
        C: PendingCall,
    {
        trace!(mode = "body", "adapting pending call");
        self.adapt_with(call, |completion| match completion {
            Completion::Response(response) if response.is_success() => {
                let status = response.status;
                match response.into_body() {
                    Some(body) => Ok(body),
                    None => {
                        debug!(status, "success response without body");
                        Err(CallError::MissingBody)
                    }
                }
            }
            Completion::Response(response) => Err(CallError::Status(response.raw())),
            Completion::Error(error) => Err(CallError::Transport(error)),
        })
    }

    /// Adapt a call in envelope mode: the future resolves to the full
    /// response whatever its status, and only transport failures surface
    /// through the failure channel.
    pub fn adapt_response<C>(&self, call: Arc<C>) -> CallFuture<Response<C::Payload>>
    where
        C: PendingCall,
    {
        trace!(mode = "envelope", "adapting pending call");
        self.adapt_with(call, |completion| match completion {
            Completion::Response(response) => Ok(response),
            Completion::Error(error) => Err(CallError::Transport(error)),
        })
    }

    fn adapt_with<C, T>(
        &self,
        call: Arc<C>,
        translate: impl FnOnce(Completion<C::Payload>) -> Result<T, CallError> + Send + 'static,
    ) -> CallFuture<T>
    where
        C: PendingCall,
        T: Send + 'static,
    {
        let cancel_target = Arc::clone(&call);
        let (promise, future) = Promise::pair(move || cancel_target.cancel());
        let runtime = self.runtime.clone();
        call.enqueue(Box::new(move |completion| {
            let settlement = translate(completion);
            match runtime {
                Some(handle) => {
                    handle.spawn(async move {
                        settle(&promise, settlement);
                    });
                }
                None => settle(&promise, settlement),
            }
        }));
        future
    }
}

fn settle<T: Send + 'static>(promise: &Promise<T>, settlement: Result<T, CallError>) {
    let won = match settlement {
        Ok(value) => promise.try_success(value),
        Err(error) => {
            debug!(%error, "settling adapted call with failure");
            promise.try_failure(error)
        }
    };
    if !won {
        debug!("adapted call settlement discarded, consumer gone or already settled");
    }
}
