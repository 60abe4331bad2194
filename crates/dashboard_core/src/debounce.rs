use std::future::Future;
use std::time::Duration;

use log::trace;
use tokio_util::sync::CancellationToken;

/// Runs a task after a quiet period, replacing any task still waiting.
///
/// At most one task is ever waiting. Cancellation only reaches a task during
/// its quiet period: once the delay elapses the task runs to completion.
/// Dropping the timer cancels whatever is still waiting.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        DebounceTimer {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => trace!("debounce | superseded"),
                _ = tokio::time::sleep(delay) => task.await,
            }
        });

        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
