// animation/completion.rs - Awaitable animation completion
//
// A Completion resolves once, when the animation that produced it ends or is
// dropped. Awaiting it does not drive the animation: frames must still be fed
// through `advance(dt)` by whoever owns the animator.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Receiving half, handed to callers of `rotate`/`highlight`
#[derive(Debug)]
#[must_use = "a Completion does nothing unless awaited or polled"]
pub struct Completion {
    receiver: Option<oneshot::Receiver<()>>,
}

/// Sending half, kept by the animation job
#[derive(Debug)]
pub struct CompletionSignal {
    sender: Option<oneshot::Sender<()>>,
}

impl Completion {
    pub fn channel() -> (CompletionSignal, Completion) {
        let (tx, rx) = oneshot::channel();
        (
            CompletionSignal { sender: Some(tx) },
            Completion { receiver: Some(rx) },
        )
    }

    /// Already-resolved completion for no-op animations
    pub fn resolved() -> Self {
        Self { receiver: None }
    }

    /// Non-blocking check. A dropped signal counts as resolved.
    pub fn is_resolved(&mut self) -> bool {
        let Some(rx) = self.receiver.as_mut() else {
            return true;
        };
        match rx.try_recv() {
            Ok(()) | Err(TryRecvError::Closed) => {
                self.receiver = None;
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(rx) = this.receiver.as_mut() else {
            return Poll::Ready(());
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(_) => {
                this.receiver = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl CompletionSignal {
    /// Resolve the paired completion. Later calls do nothing.
    pub fn resolve(&mut self) {
        if let Some(tx) = self.sender.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.sender.is_none()
    }
}
