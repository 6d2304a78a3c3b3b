//! Execution context shared by every service call of a run

use crate::error::ServiceError;
use crate::gcp::auth::{Credentials, GcpCredentials};
use std::time::{Duration, Instant};

/// Credentials plus an optional deadline for the whole run
///
/// Created once at the top level and passed by reference into every
/// listing call. Services consult [`ExecContext::remaining`] before each
/// request and fail with [`ServiceError::DeadlineExceeded`] once it is gone.
#[derive(Clone)]
pub struct ExecContext {
    credentials: Credentials,
    deadline: Option<Instant>,
}

impl ExecContext {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            deadline: None,
        }
    }

    /// Context backed by Application Default Credentials
    pub fn application_default() -> Self {
        Self::new(Credentials::Adc(GcpCredentials::new()))
    }

    /// Context with a fixed bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Credentials::Static(token.into()))
    }

    /// Bound the run to `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `Ok(None)` when the run is unbounded
    pub fn remaining(&self) -> Result<Option<Duration>, ServiceError> {
        match self.deadline {
            None => Ok(None),
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                if left.is_zero() {
                    Err(ServiceError::DeadlineExceeded)
                } else {
                    Ok(Some(left))
                }
            }
        }
    }

    pub async fn token(&self) -> Result<String, ServiceError> {
        self.credentials.token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_context_has_no_remaining() {
        let ctx = ExecContext::with_token("t");
        assert!(ctx.deadline().is_none());
        assert!(matches!(ctx.remaining(), Ok(None)));
    }

    #[test]
    fn test_elapsed_deadline_is_exceeded() {
        let ctx = ExecContext::with_token("t").with_deadline(Instant::now());
        assert!(matches!(
            ctx.remaining(),
            Err(ServiceError::DeadlineExceeded)
        ));
    }

    #[test]
    fn test_future_deadline_leaves_time() {
        let ctx = ExecContext::with_token("t").with_timeout(Duration::from_secs(60));
        let left = ctx.remaining().unwrap().unwrap();
        assert!(left <= Duration::from_secs(60));
        assert!(left > Duration::from_secs(50));
    }

    #[tokio::test]
    async fn test_token_comes_from_credentials() {
        let ctx = ExecContext::with_token("secret");
        assert_eq!(ctx.token().await.unwrap(), "secret");
    }
}
