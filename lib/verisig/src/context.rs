//!
//! Caller-controlled cancellation
//!
//! Signing and verification never suspend, so the context is only consulted at the start of a
//! call and once more right before the cryptographic work begins.
//!

use crate::Error;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cancellation handle of a single sign or verify call
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancellation: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl Context {
    /// Context that never expires
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Abort the call once the token is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Abort the call once the deadline has passed
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the call once the timeout (measured from now) has elapsed
    ///
    /// A timeout too large to represent as an instant sets no deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Return an error if the context has expired
    pub fn check(&self) -> Result<(), Error> {
        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Err(Error::Cancelled);
        }

        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return Err(Error::DeadlineExceeded);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Context;
    use crate::Error;
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    #[test]
    fn background_never_expires() {
        assert!(Context::background().check().is_ok());
    }

    #[test]
    fn cancelled_token() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.clone());
        assert!(ctx.check().is_ok());

        token.cancel();
        assert!(matches!(ctx.check(), Err(Error::Cancelled)));
    }

    #[test]
    fn passed_deadline() {
        let ctx = Context::background().with_deadline(Instant::now());
        assert!(matches!(ctx.check(), Err(Error::DeadlineExceeded)));

        let ctx = Context::background().with_timeout(Duration::from_secs(60 * 60));
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn unrepresentable_timeout() {
        let ctx = Context::background().with_timeout(Duration::MAX);
        assert!(ctx.check().is_ok());
    }
}
