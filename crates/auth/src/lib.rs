//! `ppetrack-auth`: operator login against a configured credential table.
//!
//! This crate is intentionally decoupled from terminals and storage: the
//! shell feeds it usernames and passwords, it answers yes or no.

pub mod credentials;
pub mod login;

pub use credentials::{CredentialTable, UserCredential, hash_password};
pub use login::{LoginAttempt, LoginGate, MAX_LOGIN_ATTEMPTS};
