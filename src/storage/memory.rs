//! In-process storage backend without durability.

use crate::domain::error::Result;
use crate::domain::UserId;
use crate::storage::backend::Storage;
use crate::storage::data::StorageData;
use crate::storage::models::{AccountRecord, FavoriteEntity};

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: StorageData,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn insert_favorite(&mut self, favorite: FavoriteEntity) -> Result<bool> {
        Ok(self.data.insert_favorite(favorite))
    }

    fn delete_favorites(&mut self, user_id: &UserId, property_id: &str) -> Result<usize> {
        Ok(self.data.delete_favorites(user_id, property_id))
    }

    fn contains_favorite(&self, user_id: &UserId, property_id: &str) -> Result<bool> {
        Ok(self.data.contains_favorite(user_id, property_id))
    }

    fn favorites_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntity>> {
        Ok(self.data.favorites_for_user(user_id))
    }

    fn insert_account(&mut self, account: AccountRecord) -> Result<bool> {
        Ok(self.data.insert_account(account))
    }

    fn get_account(&self, username: &str) -> Result<Option<AccountRecord>> {
        Ok(self.data.get_account(username))
    }
}
