//! Account registration and sign-in.
//!
//! Accounts only scope favorites to a user. Passwords are stored and compared as
//! given; this module makes no security claims.

use crate::domain::{PropfolioError, Result, UserId, UserSession};
use crate::storage::{AccountRecord, SharedStorage};

/// Registers accounts and opens sessions against the shared storage.
#[derive(Clone)]
pub struct AccountRegistry {
    storage: SharedStorage,
}

impl AccountRegistry {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// - [`PropfolioError::MissingCredentials`] if either field is empty
    /// - [`PropfolioError::UsernameTaken`] if the username is registered
    /// - [`PropfolioError::Persistence`] if the account cannot be committed
    pub fn register(&self, username: &str, password: &str) -> Result<UserId> {
        if username.is_empty() || password.is_empty() {
            return Err(PropfolioError::MissingCredentials);
        }

        let _span = tracing::debug_span!("account_register", username = %username).entered();

        let mut storage = self
            .storage
            .write()
            .map_err(|e| PropfolioError::Persistence(format!("storage lock poisoned: {e}")))?;

        let account = AccountRecord::new(username, password);
        let user_id = account.user_id();
        if !storage.insert_account(account)? {
            tracing::debug!("username already registered");
            return Err(PropfolioError::UsernameTaken(username.to_string()));
        }

        tracing::debug!("account registered");
        Ok(user_id)
    }

    /// Opens a session for the account matching both fields exactly.
    ///
    /// # Errors
    ///
    /// - [`PropfolioError::MissingCredentials`] if either field is empty
    /// - [`PropfolioError::InvalidCredentials`] if no account matches
    /// - [`PropfolioError::Persistence`] if the account table cannot be read
    pub fn login(&self, username: &str, password: &str) -> Result<UserSession> {
        if username.is_empty() || password.is_empty() {
            return Err(PropfolioError::MissingCredentials);
        }

        let storage = self
            .storage
            .read()
            .map_err(|e| PropfolioError::Persistence(format!("storage lock poisoned: {e}")))?;

        match storage.get_account(username)? {
            Some(account) if account.password == password => {
                tracing::debug!(username = %username, "login succeeded");
                Ok(UserSession::signed_in(account.user_id()))
            }
            _ => {
                tracing::debug!(username = %username, "login rejected");
                Err(PropfolioError::InvalidCredentials)
            }
        }
    }
}

impl std::fmt::Debug for AccountRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRegistry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStorage};

    fn registry() -> AccountRegistry {
        AccountRegistry::new(shared(MemoryStorage::new()))
    }

    #[test]
    fn register_then_login() {
        let registry = registry();
        let user = registry.register("kate", "hunter2").unwrap();

        let session = registry.login("kate", "hunter2").unwrap();
        assert_eq!(session.user(), Some(&user));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let registry = registry();
        registry.register("kate", "a").unwrap();

        assert!(matches!(
            registry.register("kate", "b"),
            Err(PropfolioError::UsernameTaken(name)) if name == "kate"
        ));
        assert!(registry.login("kate", "a").is_ok());
    }

    #[test]
    fn bad_credentials_are_rejected() {
        let registry = registry();
        registry.register("kate", "hunter2").unwrap();

        assert!(matches!(registry.login("kate", "wrong"), Err(PropfolioError::InvalidCredentials)));
        assert!(matches!(registry.login("sam", "hunter2"), Err(PropfolioError::InvalidCredentials)));
        assert!(matches!(registry.login("", "hunter2"), Err(PropfolioError::MissingCredentials)));
        assert!(matches!(registry.register("sam", ""), Err(PropfolioError::MissingCredentials)));
    }
}
