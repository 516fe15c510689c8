//! In-memory dataset shared by the storage backends.
//!
//! [`StorageData`] is also the on-disk document of [`super::JsonStorage`].

use crate::domain::UserId;
use crate::storage::models::{AccountRecord, FavoriteEntity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current version of the storage document.
pub const STORAGE_VERSION: u32 = 1;

/// Complete persisted state: favorites grouped per user, accounts by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageData {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Favorite rows per user, each list unique by property id.
    #[serde(default)]
    pub favorites: HashMap<UserId, Vec<FavoriteEntity>>,

    #[serde(default)]
    pub accounts: HashMap<String, AccountRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            favorites: HashMap::new(),
            accounts: HashMap::new(),
        }
    }
}

impl StorageData {
    pub fn contains_favorite(&self, user_id: &UserId, property_id: &str) -> bool {
        self.favorites
            .get(user_id)
            .is_some_and(|rows| rows.iter().any(|row| row.matches(user_id, property_id)))
    }

    pub fn favorites_for_user(&self, user_id: &UserId) -> Vec<FavoriteEntity> {
        self.favorites.get(user_id).cloned().unwrap_or_default()
    }

    /// Returns `false` and leaves the data untouched if the key is taken.
    pub fn insert_favorite(&mut self, favorite: FavoriteEntity) -> bool {
        if self.contains_favorite(&favorite.user_id, favorite.property_id()) {
            return false;
        }
        self.favorites
            .entry(favorite.user_id.clone())
            .or_default()
            .push(favorite);
        true
    }

    pub fn delete_favorites(&mut self, user_id: &UserId, property_id: &str) -> usize {
        let Some(rows) = self.favorites.get_mut(user_id) else {
            return 0;
        };

        let before = rows.len();
        rows.retain(|row| !row.matches(user_id, property_id));
        let removed = before - rows.len();

        if rows.is_empty() {
            self.favorites.remove(user_id);
        }
        removed
    }

    pub fn insert_account(&mut self, account: AccountRecord) -> bool {
        if self.accounts.contains_key(&account.username) {
            return false;
        }
        self.accounts.insert(account.username.clone(), account);
        true
    }

    pub fn get_account(&self, username: &str) -> Option<AccountRecord> {
        self.accounts.get(username).cloned()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PropertyRecord;

    #[test]
    fn delete_removes_duplicates_and_empty_groups() {
        let user = UserId::new("kate");
        let mut data = StorageData::default();
        let row = FavoriteEntity::new(user.clone(), &PropertyRecord::new("a"));

        // Simulate a document written with a duplicate row.
        data.favorites.insert(user.clone(), vec![row.clone(), row]);
        assert_eq!(data.delete_favorites(&user, "a"), 2);
        assert!(!data.favorites.contains_key(&user));
        assert_eq!(data.delete_favorites(&user, "a"), 0);
    }

    #[test]
    fn insert_keeps_existing_row() {
        let user = UserId::new("kate");
        let mut data = StorageData::default();
        let first = FavoriteEntity::new(user.clone(), &PropertyRecord::new("a").with_price(1.0));
        let second = FavoriteEntity::new(user.clone(), &PropertyRecord::new("a").with_price(2.0));

        assert!(data.insert_favorite(first));
        assert!(!data.insert_favorite(second));
        assert_eq!(data.favorite_count(), 1);
        assert_eq!(data.favorites_for_user(&user)[0].snapshot.price, Some(1.0));
    }
}
