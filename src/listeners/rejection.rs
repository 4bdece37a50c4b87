use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use xguard_types::Failure;

/// Handle to a task started by [`spawn_observed`].
///
/// Awaiting it observes the task's outcome. Dropping it without awaiting
/// means a failure is reported as an unhandled rejection instead, whether
/// the task fails before or after the drop.
#[must_use = "an unobserved failure is reported as an unhandled rejection"]
pub struct Observed<T> {
    receiver: oneshot::Receiver<Result<T, Failure>>,
    completed: bool,
}

impl<T> Future for Observed<T> {
    type Output = Result<T, Failure>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let outcome = match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(outcome) => outcome,
            Poll::Pending => return Poll::Pending,
        };
        self.completed = true;
        Poll::Ready(outcome.unwrap_or_else(|_| {
            Err(Failure::other("task ended without producing a result"))
        }))
    }
}

impl<T> Drop for Observed<T> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        // After `close` the task either already sent its outcome, which we
        // pick up here, or its send fails and it reports the failure itself.
        self.receiver.close();
        if let Ok(Err(reason)) = self.receiver.try_recv() {
            super::report_unhandled_rejection(&reason);
        }
    }
}

/// Run `future` on the current Tokio runtime.
///
/// Must be called from within a runtime.
pub fn spawn_observed<F, T>(future: F) -> Observed<T>
where
    F: Future<Output = Result<T, Failure>> + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = future.await;
        if let Err(Err(reason)) = sender.send(outcome) {
            super::report_unhandled_rejection(&reason);
        }
    });
    Observed {
        receiver,
        completed: false,
    }
}
