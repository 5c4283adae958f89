//! Retry bookkeeping for completion-callback registration.
//!
//! Registering the completion callback can be rejected by the host (for
//! instance while it is still starting up). The host-side collaborator owns
//! the timer; this type only tracks attempts and says whether another one is
//! worth making.

use crate::base::HostError;

/// What the caller should do after a registration attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    Registered,
    RetryLater,
    GiveUp,
}

#[derive(Clone, Debug)]
pub struct RegistrationRetry {
    max_attempts: u32,
    attempts: u32,
    registered: bool,
    last_error: Option<HostError>,
}

impl RegistrationRetry {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            attempts: 0,
            registered: false,
            last_error: None,
        }
    }

    /// Run one registration attempt unless already registered or exhausted.
    pub fn attempt<F>(&mut self, register: F) -> RetryDecision
    where
        F: FnOnce() -> Result<(), HostError>,
    {
        if self.registered {
            return RetryDecision::Registered;
        }
        if self.attempts >= self.max_attempts {
            return RetryDecision::GiveUp;
        }

        self.attempts += 1;
        match register() {
            Ok(()) => {
                tracing::info!(attempts = self.attempts, "completion callback registered");
                self.registered = true;
                self.last_error = None;
                RetryDecision::Registered
            }
            Err(err) => {
                tracing::warn!(%err, attempt = self.attempts, "completion registration rejected");
                self.last_error = Some(err);
                if self.attempts >= self.max_attempts {
                    RetryDecision::GiveUp
                } else {
                    RetryDecision::RetryLater
                }
            }
        }
    }

    /// Forget the registration, e.g. after the host unloads the callback.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.registered = false;
        self.last_error = None;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_error(&self) -> Option<&HostError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> Result<(), HostError> {
        Err(HostError::new("register_completion", "not ready"))
    }

    #[test]
    fn test_retries_until_success() {
        let mut retry = RegistrationRetry::new(3);
        assert_eq!(retry.attempt(rejected), RetryDecision::RetryLater);
        assert!(retry.last_error().is_some());
        assert_eq!(retry.attempt(|| Ok(())), RetryDecision::Registered);
        assert!(retry.is_registered());
        assert_eq!(retry.attempts(), 2);

        // Further calls do not re-register.
        assert_eq!(retry.attempt(rejected), RetryDecision::Registered);
        assert_eq!(retry.attempts(), 2);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut retry = RegistrationRetry::new(2);
        assert_eq!(retry.attempt(rejected), RetryDecision::RetryLater);
        assert_eq!(retry.attempt(rejected), RetryDecision::GiveUp);
        assert_eq!(retry.attempt(|| Ok(())), RetryDecision::GiveUp);

        retry.reset();
        assert_eq!(retry.attempt(|| Ok(())), RetryDecision::Registered);
    }
}
