/*!
 * Resolvable Future
 * Manually settled one-shot future with externally stored handles
 */

use crate::host::{HostError, HostResult};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// A future settled manually through a [`SettleHandle`]
///
/// Created eagerly so the handle can be stored before the future is awaited.
/// At most one settlement ever takes effect; later calls are no-ops.
pub struct Resolvable<T> {
    rx: oneshot::Receiver<HostResult<T>>,
}

/// Externally callable resolve/reject side of a [`Resolvable`]
pub struct SettleHandle<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<HostResult<T>>>>>,
}

impl<T> Clone for SettleHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> Resolvable<T> {
    pub fn new() -> (Self, SettleHandle<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self { rx },
            SettleHandle {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
        )
    }
}

impl<T> SettleHandle<T> {
    /// Deliver the value; reports `false` if already settled
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Deliver the failure; reports `false` if already settled
    pub fn reject(&self, error: HostError) -> bool {
        self.settle(Err(error))
    }

    pub fn is_settled(&self) -> bool {
        self.tx.lock().is_none()
    }

    fn settle(&self, outcome: HostResult<T>) -> bool {
        match self.tx.lock().take() {
            Some(tx) => {
                // Send fails only when the future side was already dropped.
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}

impl<T> Future for Resolvable<T> {
    type Output = HostResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(HostError::Canceled(
                "operation handle dropped before settlement".to_string(),
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
