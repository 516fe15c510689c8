//! Per-user favorites over a shared storage backend.
//!
//! [`FavoriteStore`] is the only component that touches favorite rows. All
//! mutations go through the write lock of the [`SharedStorage`] handle, so two
//! concurrent adds of the same `(user, property)` pair are serialized and the
//! second one observes the first row. Reads share the read lock and see only
//! committed rows.

use crate::domain::{PropertyRecord, PropfolioError, Result, UserId};
use crate::search::{sort_favorites, SortKey};
use crate::storage::{FavoriteEntity, SharedStorage, Storage};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

/// Handle to the favorites of every user. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct FavoriteStore {
    storage: SharedStorage,
}

impl FavoriteStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Box<dyn Storage>>> {
        self.storage
            .write()
            .map_err(|e| PropfolioError::Persistence(format!("storage lock poisoned: {e}")))
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, Box<dyn Storage>>> {
        match self.storage.read() {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!(error = %e, "storage lock poisoned, treating read as empty");
                None
            }
        }
    }

    /// Favorites `record` for `user`, copying its fields into a new row.
    ///
    /// Adding a property the user already favorited is a successful no-op; the
    /// existing row and its snapshot are kept.
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Persistence`] if the row cannot be committed.
    pub fn add(&self, user: &UserId, record: &PropertyRecord) -> Result<()> {
        let _span = tracing::debug_span!("favorite_add",
            user_id = %user,
            property_id = %record.property_id
        ).entered();

        let mut storage = self.write()?;
        let inserted = storage.insert_favorite(FavoriteEntity::new(user.clone(), record))?;

        tracing::debug!(inserted = inserted, "favorite add complete");
        Ok(())
    }

    /// Deletes every row for `user` and `property_id`.
    ///
    /// Succeeds without doing anything when no row matches or when there is no
    /// signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Persistence`] if the deletion cannot be committed.
    pub fn remove(&self, user: Option<&UserId>, property_id: &str) -> Result<()> {
        let Some(user) = user else {
            tracing::debug!(property_id = %property_id, "remove without user ignored");
            return Ok(());
        };

        let _span = tracing::debug_span!("favorite_remove",
            user_id = %user,
            property_id = %property_id
        ).entered();

        let mut storage = self.write()?;
        let removed = storage.delete_favorites(user, property_id)?;

        tracing::debug!(removed = removed, "favorite remove complete");
        Ok(())
    }

    /// Returns whether `user` has favorited `property_id`.
    ///
    /// Never fails: a missing user or a read failure answers `false`.
    #[must_use]
    pub fn is_favorited(&self, user: Option<&UserId>, property_id: &str) -> bool {
        let Some(user) = user else {
            return false;
        };
        let Some(storage) = self.read() else {
            return false;
        };

        storage
            .contains_favorite(user, property_id)
            .unwrap_or_else(|e| {
                tracing::warn!(user_id = %user, property_id = %property_id, error = %e,
                    "favorite lookup failed, reporting not favorited");
                false
            })
    }

    /// Returns all of `user`'s favorites, most recently added first.
    ///
    /// Never fails: a read failure answers an empty list.
    #[must_use]
    pub fn list_for_user(&self, user: &UserId) -> Vec<FavoriteEntity> {
        let Some(storage) = self.read() else {
            return Vec::new();
        };

        let mut favorites = storage.favorites_for_user(user).unwrap_or_else(|e| {
            tracing::warn!(user_id = %user, error = %e, "favorites listing failed, reporting none");
            Vec::new()
        });
        drop(storage);

        sort_favorites(&mut favorites, SortKey::Recent);
        favorites
    }

    /// Flips the favorite state of `record` for `user` in one serialized step.
    ///
    /// Returns the state after the flip. The check and the write happen under
    /// the same lock, so rapid repeated toggles cannot interleave.
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Persistence`] if the change cannot be committed;
    /// the stored state is then unchanged.
    pub fn toggle(&self, user: &UserId, record: &PropertyRecord) -> Result<bool> {
        let _span = tracing::debug_span!("favorite_toggle",
            user_id = %user,
            property_id = %record.property_id
        ).entered();

        let mut storage = self.write()?;

        let favorited = if storage.contains_favorite(user, &record.property_id)? {
            storage.delete_favorites(user, &record.property_id)?;
            false
        } else {
            storage.insert_favorite(FavoriteEntity::new(user.clone(), record))?;
            true
        };

        tracing::debug!(favorited = favorited, "favorite toggled");
        Ok(favorited)
    }
}

impl std::fmt::Debug for FavoriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStorage};

    fn store() -> FavoriteStore {
        FavoriteStore::new(shared(MemoryStorage::new()))
    }

    #[test]
    fn repeated_add_keeps_one_row_and_first_snapshot() {
        let store = store();
        let user = UserId::new("kate");

        store.add(&user, &PropertyRecord::new("a").with_price(500_000.0)).unwrap();
        store.add(&user, &PropertyRecord::new("a").with_price(450_000.0)).unwrap();
        store.add(&user, &PropertyRecord::new("a")).unwrap();

        let favorites = store.list_for_user(&user);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].snapshot.price, Some(500_000.0));
    }

    #[test]
    fn favorites_are_scoped_per_user() {
        let store = store();
        let kate = UserId::new("kate");
        let sam = UserId::new("sam");

        store.add(&kate, &PropertyRecord::new("a")).unwrap();
        store.add(&sam, &PropertyRecord::new("a")).unwrap();
        store.remove(Some(&sam), "a").unwrap();

        assert!(store.is_favorited(Some(&kate), "a"));
        assert!(!store.is_favorited(Some(&sam), "a"));
    }

    #[test]
    fn remove_without_match_or_user_is_a_no_op() {
        let store = store();
        let user = UserId::new("kate");
        store.add(&user, &PropertyRecord::new("a")).unwrap();

        store.remove(Some(&user), "missing").unwrap();
        store.remove(None, "a").unwrap();

        assert_eq!(store.list_for_user(&user).len(), 1);
        assert!(!store.is_favorited(None, "a"));
    }

    #[test]
    fn list_is_most_recent_first() {
        let store = store();
        let user = UserId::new("kate");

        for id in ["first", "second", "third"] {
            store.add(&user, &PropertyRecord::new(id)).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let ids: Vec<String> = store
            .list_for_user(&user)
            .iter()
            .map(|f| f.property_id().to_string())
            .collect();
        assert_eq!(ids, ["third", "second", "first"]);
    }

    #[test]
    fn toggle_reports_resulting_state() {
        let store = store();
        let user = UserId::new("kate");
        let record = PropertyRecord::new("a");

        assert!(store.toggle(&user, &record).unwrap());
        assert!(store.is_favorited(Some(&user), "a"));
        assert!(!store.toggle(&user, &record).unwrap());
        assert!(!store.is_favorited(Some(&user), "a"));
    }
}
