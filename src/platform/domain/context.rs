//! Cancellation and deadline scope for a single platform call.

use crate::platform::error::{PlatformError, PlatformResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Execution context every platform operation receives first.
///
/// Wire calls run through [`RequestContext::run`], which abandons the call
/// as soon as the token is cancelled or the deadline passes. Cloning a
/// context shares its token.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with a fresh token and no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context bound to an existing cancellation token.
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derives a context whose token is cancelled with this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns whether the context can no longer run work.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled()
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Checks the context before starting work.
    ///
    /// # Errors
    ///
    /// Returns a `network_error` when already cancelled or expired.
    pub fn ensure_active(&self) -> PlatformResult<()> {
        if self.token.is_cancelled() {
            return Err(cancelled());
        }
        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return Err(deadline_exceeded());
        }
        Ok(())
    }

    /// Drives `future` until it completes or the context ends.
    ///
    /// # Errors
    ///
    /// Returns a `network_error` when the token is cancelled or the deadline
    /// passes before `future` resolves.
    pub async fn run<F, T>(&self, future: F) -> PlatformResult<T>
    where
        F: Future<Output = T> + Send,
    {
        self.ensure_active()?;
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(cancelled()),
                    () = tokio::time::sleep_until(deadline) => Err(deadline_exceeded()),
                    output = future => Ok(output),
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(cancelled()),
                    output = future => Ok(output),
                }
            }
        }
    }
}

fn cancelled() -> PlatformError {
    PlatformError::network("request cancelled")
}

fn deadline_exceeded() -> PlatformError {
    PlatformError::network("deadline exceeded")
}
