//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends. Each method maps directly to a use case of the favorites store or the
//! account registry; it is not a generic ORM.

use crate::domain::error::Result;
use crate::domain::UserId;
use crate::storage::models::{AccountRecord, FavoriteEntity};

/// Abstraction over persistent storage backends.
///
/// Every mutating method is a transaction: it either commits completely or
/// returns an error with the backend left at its pre-call state.
///
/// Implementations are `Send + Sync` so one instance can sit behind the shared
/// lock handed out by [`crate::initialize`]. Callers serialize writers
/// themselves; backends only need `&mut self` for mutations.
///
/// # Implementations
///
/// - [`crate::storage::JsonStorage`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryStorage`]: in-process only
pub trait Storage: Send + Sync {
    /// Inserts a favorite row unless one already exists for its user and property.
    ///
    /// Returns `true` if a row was inserted, `false` if an existing row was kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn insert_favorite(&mut self, favorite: FavoriteEntity) -> Result<bool>;

    /// Deletes every favorite row matching the user and property.
    ///
    /// Returns the number of rows removed; zero is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn delete_favorites(&mut self, user_id: &UserId, property_id: &str) -> Result<usize>;

    /// Checks whether a favorite row exists for the user and property.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn contains_favorite(&self, user_id: &UserId, property_id: &str) -> Result<bool>;

    /// Retrieves all favorite rows owned by a user, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn favorites_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntity>>;

    /// Inserts an account unless the username is already registered.
    ///
    /// Returns `true` if the account was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn insert_account(&mut self, account: AccountRecord) -> Result<bool>;

    /// Retrieves an account by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_account(&self, username: &str) -> Result<Option<AccountRecord>>;
}
