//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Transactions
//!
//! Every mutation is staged on a copy of the in-memory data. The copy is written
//! to disk first and only replaces the live data once the rename has succeeded,
//! so a failed write leaves both memory and disk at the pre-operation state.
//!
//! # Performance Characteristics
//!
//! - **Read**: served from memory, file loaded once on open
//! - **Write**: O(n), serializes and writes the entire dataset
//! - **Best for**: personal favorites lists, infrequent writes

use crate::domain::error::{PropfolioError, Result};
use crate::domain::UserId;
use crate::storage::backend::Storage;
use crate::storage::data::StorageData;
use crate::storage::models::{AccountRecord, FavoriteEntity};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "favorites": {
///     "kate": [
///       {
///         "user_id": "kate",
///         "snapshot": { "propertyId": "2077", "price": 500000.0, "bedrooms": 3.0 },
///         "date_added": "2025-04-03T18:22:11Z"
///       }
///     ]
///   },
///   "accounts": {
///     "kate": { "username": "kate", "password": "...", "created_at": "2025-04-01T09:00:00Z" }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Last committed state.
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; nothing is
    /// written until the first mutation. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use propfolio::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::open(PathBuf::from("/tmp/propfolio/favorites.json"))?;
    /// # Ok::<(), propfolio::PropfolioError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(
            favorite_count = data.favorite_count(),
            account_count = data.accounts.len(),
            "storage initialized"
        );

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| PropfolioError::Persistence(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, "loaded storage data");
        Ok(data)
    }

    /// Writes `next` to disk and, only on success, makes it the live state.
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Persistence`] if serialization, the temporary
    /// write or the rename fails. The live state is unchanged in that case.
    fn commit(&mut self, next: StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(&next)
            .map_err(|e| PropfolioError::Persistence(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = tmp_path_for(&self.file_path);

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json).map_err(|e| {
            PropfolioError::Persistence(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(PropfolioError::Persistence(format!(
                "failed to replace {}: {e}",
                self.file_path.display()
            )));
        }

        self.data = next;
        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

/// Sibling path `<file name>.tmp`, distinct from `path` whatever its extension.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for JsonStorage {
    fn insert_favorite(&mut self, favorite: FavoriteEntity) -> Result<bool> {
        let _span = tracing::debug_span!("json_insert_favorite",
            user_id = %favorite.user_id,
            property_id = %favorite.property_id()
        ).entered();

        let mut next = self.data.clone();
        if !next.insert_favorite(favorite) {
            tracing::debug!("favorite already stored");
            return Ok(false);
        }

        self.commit(next)?;
        Ok(true)
    }

    fn delete_favorites(&mut self, user_id: &UserId, property_id: &str) -> Result<usize> {
        let _span = tracing::debug_span!("json_delete_favorites",
            user_id = %user_id,
            property_id = %property_id
        ).entered();

        let mut next = self.data.clone();
        let removed = next.delete_favorites(user_id, property_id);
        if removed > 0 {
            self.commit(next)?;
        }

        tracing::debug!(removed = removed, "favorites deleted");
        Ok(removed)
    }

    fn contains_favorite(&self, user_id: &UserId, property_id: &str) -> Result<bool> {
        Ok(self.data.contains_favorite(user_id, property_id))
    }

    fn favorites_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntity>> {
        let favorites = self.data.favorites_for_user(user_id);
        tracing::debug!(user_id = %user_id, count = favorites.len(), "retrieved favorites");
        Ok(favorites)
    }

    fn insert_account(&mut self, account: AccountRecord) -> Result<bool> {
        let _span = tracing::debug_span!("json_insert_account",
            username = %account.username
        ).entered();

        let mut next = self.data.clone();
        if !next.insert_account(account) {
            return Ok(false);
        }

        self.commit(next)?;
        Ok(true)
    }

    fn get_account(&self, username: &str) -> Result<Option<AccountRecord>> {
        Ok(self.data.get_account(username))
    }
}
