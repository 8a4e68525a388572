//! Bounded login attempts for the interactive shell.

use crate::credentials::CredentialTable;

/// Attempts allowed before the shell gives up.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Outcome of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAttempt {
    Granted,
    Denied { remaining: u32 },
    LockedOut,
}

/// Counts failed attempts against a credential table.
#[derive(Debug)]
pub struct LoginGate<'a> {
    credentials: &'a CredentialTable,
    failures: u32,
    max_attempts: u32,
}

impl<'a> LoginGate<'a> {
    pub fn new(credentials: &'a CredentialTable) -> Self {
        Self::with_max_attempts(credentials, MAX_LOGIN_ATTEMPTS)
    }

    pub fn with_max_attempts(credentials: &'a CredentialTable, max_attempts: u32) -> Self {
        Self {
            credentials,
            failures: 0,
            max_attempts,
        }
    }

    pub fn attempt(&mut self, username: &str, password: &str) -> LoginAttempt {
        if self.failures >= self.max_attempts {
            return LoginAttempt::LockedOut;
        }

        if self.credentials.authenticate(username, password) {
            tracing::info!(username, "login succeeded");
            return LoginAttempt::Granted;
        }

        self.failures += 1;
        let remaining = self.max_attempts - self.failures;
        tracing::warn!(username, remaining, "login failed");
        if remaining == 0 {
            LoginAttempt::LockedOut
        } else {
            LoginAttempt::Denied { remaining }
        }
    }
}
