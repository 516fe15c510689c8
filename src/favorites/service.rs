//! The favorites façade driven by the UI layer.
//!
//! [`FavoritesService`] is the only write entry point the UI sees. It exposes a
//! toggle rather than separate add and remove calls, and it only reports a new
//! favorite state after the store has committed it.

use crate::domain::{PropertyRecord, Result, UserId};
use crate::favorites::store::FavoriteStore;
use crate::search::{search_favorites, sort_favorites, SortKey};
use crate::storage::FavoriteEntity;

/// A search result annotated with the viewer's favorite state.
///
/// The flag is computed per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedProperty {
    pub record: PropertyRecord,
    pub is_favorited: bool,
}

/// Answers favorite queries for the search and favorites screens.
#[derive(Debug, Clone)]
pub struct FavoritesService {
    store: FavoriteStore,
}

impl FavoritesService {
    #[must_use]
    pub fn new(store: FavoriteStore) -> Self {
        Self { store }
    }

    /// Flips whether `user` has favorited `record` and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the change could not be committed. The
    /// caller should keep showing the previous state in that case.
    pub fn toggle_favorite(&self, user: &UserId, record: &PropertyRecord) -> Result<bool> {
        match self.store.toggle(user, record) {
            Ok(favorited) => {
                tracing::debug!(user_id = %user, property_id = %record.property_id,
                    favorited = favorited, "toggle committed");
                Ok(favorited)
            }
            Err(e) => {
                tracing::debug!(user_id = %user, property_id = %record.property_id,
                    error = %e, "toggle failed, state unchanged");
                Err(e)
            }
        }
    }

    /// Point lookup of one property's favorite state.
    #[must_use]
    pub fn is_favorited(&self, user: Option<&UserId>, property_id: &str) -> bool {
        self.store.is_favorited(user, property_id)
    }

    /// Pairs each search result with the viewer's favorite state, keeping the
    /// provider's order. Without a user every flag is `false`.
    #[must_use]
    pub fn search_results_with_favorite_flags(
        &self,
        user: Option<&UserId>,
        records: &[PropertyRecord],
    ) -> Vec<FlaggedProperty> {
        let _span = tracing::debug_span!("flag_search_results",
            count = records.len()
        ).entered();

        records
            .iter()
            .map(|record| FlaggedProperty {
                is_favorited: self.store.is_favorited(user, &record.property_id),
                record: record.clone(),
            })
            .collect()
    }

    /// The favorites screen list: narrowed by an address query, then sorted.
    ///
    /// With `sort` absent the list stays most-recent-first.
    #[must_use]
    pub fn favorites(
        &self,
        user: &UserId,
        query: &str,
        sort: Option<SortKey>,
    ) -> Vec<FavoriteEntity> {
        let mut favorites = search_favorites(self.store.list_for_user(user), query);
        if let Some(key) = sort {
            sort_favorites(&mut favorites, key);
        }
        favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PropfolioError;
    use crate::storage::{shared, AccountRecord, MemoryStorage, Storage};

    /// Backend whose every operation fails.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn insert_favorite(&mut self, _favorite: FavoriteEntity) -> Result<bool> {
            Err(PropfolioError::Persistence("disk full".to_string()))
        }

        fn delete_favorites(&mut self, _user_id: &UserId, _property_id: &str) -> Result<usize> {
            Err(PropfolioError::Persistence("disk full".to_string()))
        }

        fn contains_favorite(&self, _user_id: &UserId, _property_id: &str) -> Result<bool> {
            Err(PropfolioError::Persistence("unreadable".to_string()))
        }

        fn favorites_for_user(&self, _user_id: &UserId) -> Result<Vec<FavoriteEntity>> {
            Err(PropfolioError::Persistence("unreadable".to_string()))
        }

        fn insert_account(&mut self, _account: AccountRecord) -> Result<bool> {
            Err(PropfolioError::Persistence("disk full".to_string()))
        }

        fn get_account(&self, _username: &str) -> Result<Option<AccountRecord>> {
            Err(PropfolioError::Persistence("unreadable".to_string()))
        }
    }

    fn service() -> FavoritesService {
        FavoritesService::new(FavoriteStore::new(shared(MemoryStorage::new())))
    }

    #[test]
    fn even_toggles_restore_the_original_state() {
        let service = service();
        let user = UserId::new("kate");
        let record = PropertyRecord::new("a");

        for round in 1..=6 {
            let state = service.toggle_favorite(&user, &record).unwrap();
            assert_eq!(state, round % 2 == 1);
        }
        assert!(!service.is_favorited(Some(&user), "a"));
        assert!(service.favorites(&user, "", None).is_empty());
    }

    #[test]
    fn flags_follow_the_store_without_reordering() {
        let service = service();
        let user = UserId::new("kate");
        let records = vec![
            PropertyRecord::new("a"),
            PropertyRecord::new("b"),
            PropertyRecord::new("c"),
        ];
        service.toggle_favorite(&user, &records[1]).unwrap();

        let flagged = service.search_results_with_favorite_flags(Some(&user), &records);
        let flags: Vec<(&str, bool)> = flagged
            .iter()
            .map(|f| (f.record.property_id.as_str(), f.is_favorited))
            .collect();
        assert_eq!(flags, [("a", false), ("b", true), ("c", false)]);

        let anonymous = service.search_results_with_favorite_flags(None, &records);
        assert!(anonymous.iter().all(|f| !f.is_favorited));
    }

    #[test]
    fn favorites_view_searches_then_sorts() {
        let service = service();
        let user = UserId::new("kate");
        for (id, address, price) in [
            ("a", "1 Oak St, Austin", 500_000.0),
            ("b", "2 Elm St, Austin", 250_000.0),
            ("c", "3 Bay Rd, Dallas", 100_000.0),
        ] {
            let record = PropertyRecord::new(id).with_address(address).with_price(price);
            service.toggle_favorite(&user, &record).unwrap();
        }

        let ids: Vec<String> = service
            .favorites(&user, "austin", Some(SortKey::Price))
            .iter()
            .map(|f| f.property_id().to_string())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn failed_toggle_is_reported_and_reads_degrade() {
        let service = FavoritesService::new(FavoriteStore::new(shared(BrokenStorage)));
        let user = UserId::new("kate");

        let err = service.toggle_favorite(&user, &PropertyRecord::new("a")).unwrap_err();
        assert!(matches!(err, PropfolioError::Persistence(_)));

        assert!(!service.is_favorited(Some(&user), "a"));
        assert!(service.favorites(&user, "", Some(SortKey::Recent)).is_empty());
    }
}
