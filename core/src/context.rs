//! Caller-owned cancellation and deadline for requests.
//!
//! The pipeline never imposes its own timeout. Whatever the caller attaches
//! to a [`Context`] is raced against the transport call and the body read,
//! and ending it surfaces as [`TransportError::Cancelled`] or
//! [`TransportError::DeadlineExceeded`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context cancelled through an externally owned token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline_in(timeout)
    }

    /// Same cancellation, with a deadline `timeout` from now. Keeps the
    /// earlier deadline if one is already set.
    pub fn deadline_in(mut self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drives `fut` unless the context ends first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, TransportError>
    where
        F: Future,
    {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(TransportError::Cancelled),
                _ = tokio::time::sleep_until(deadline) => Err(TransportError::DeadlineExceeded),
                output = fut => Ok(output),
            },
            None => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(TransportError::Cancelled),
                output = fut => Ok(output),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_runs_to_completion() {
        let out = Context::background().run(async { 7 }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn cancelled_context_short_circuits() {
        let ctx = Context::background();
        ctx.cancel();
        let err = ctx.run(async { 7 }).await.unwrap_err();
        assert!(matches!(err, TransportError::Cancelled));
    }

    #[tokio::test]
    async fn cancellation_is_shared_between_clones() {
        let ctx = Context::background();
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_slow_future() {
        let ctx = Context::with_timeout(Duration::from_millis(10));
        let err = ctx
            .run(tokio::time::sleep(Duration::from_secs(60)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn earlier_deadline_is_kept() {
        let ctx = Context::with_timeout(Duration::from_secs(1)).deadline_in(Duration::from_secs(60));
        let deadline = ctx.deadline().unwrap();
        assert!(deadline <= Instant::now() + Duration::from_secs(1));
    }
}
