//! Username → password-hash table.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a password, the format stored in configuration.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// One configured operator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    /// Lowercase hex SHA-256 of the password.
    pub password_sha256: String,
}

impl UserCredential {
    pub fn from_plaintext(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_sha256: hash_password(password),
        }
    }
}

/// Fixed credential table, injected from configuration at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialTable {
    users: Vec<UserCredential>,
}

impl CredentialTable {
    pub fn new(users: Vec<UserCredential>) -> Self {
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Plain equality check of the password hash; no lockout or rate limiting.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let hashed = hash_password(password);
        self.users
            .iter()
            .any(|u| u.username == username && u.password_sha256.eq_ignore_ascii_case(&hashed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CredentialTable {
        CredentialTable::new(vec![
            UserCredential::from_plaintext("user1", "password1"),
            UserCredential::from_plaintext("user2", "password2"),
        ])
    }

    #[test]
    fn hash_is_lowercase_hex_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn matching_credentials_authenticate() {
        assert!(table().authenticate("user2", "password2"));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let table = table();
        assert!(!table.authenticate("user1", "password2"));
        assert!(!table.authenticate("nobody", "password1"));
    }

    #[test]
    fn empty_table_rejects_everyone() {
        assert!(!CredentialTable::default().authenticate("user1", "password1"));
    }
}
