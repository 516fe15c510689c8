//! Free-text search over the favorites list.

use crate::storage::FavoriteEntity;

/// Keeps favorites whose address contains the query, ignoring case.
///
/// The query is trimmed and matched as one piece. An empty query keeps
/// everything; a favorite without an address never matches a non-empty query.
/// Input order is preserved.
#[must_use]
pub fn search_favorites(favorites: Vec<FavoriteEntity>, query: &str) -> Vec<FavoriteEntity> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return favorites;
    }

    let _span = tracing::debug_span!("search_favorites",
        total = favorites.len(),
        query = %needle
    ).entered();

    let kept: Vec<FavoriteEntity> = favorites
        .into_iter()
        .filter(|favorite| {
            favorite
                .snapshot
                .address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(&needle))
        })
        .collect();

    tracing::debug!(kept_count = kept.len(), "favorites search applied");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PropertyRecord, UserId};

    fn favorites() -> Vec<FavoriteEntity> {
        let user = UserId::new("kate");
        vec![
            FavoriteEntity::new(user.clone(), &PropertyRecord::new("a").with_address("12 Oak Street, Austin TX")),
            FavoriteEntity::new(user.clone(), &PropertyRecord::new("b").with_address("400 Pine Ave, Dallas TX")),
            FavoriteEntity::new(user, &PropertyRecord::new("c")),
        ]
    }

    fn ids(kept: &[FavoriteEntity]) -> Vec<&str> {
        kept.iter().map(FavoriteEntity::property_id).collect()
    }

    #[test]
    fn blank_query_keeps_everything() {
        assert_eq!(search_favorites(favorites(), "   ").len(), 3);
    }

    #[test]
    fn query_is_a_case_insensitive_substring() {
        assert_eq!(ids(&search_favorites(favorites(), "  OAK street ")), ["a"]);
        assert_eq!(ids(&search_favorites(favorites(), "austin tx")), ["a"]);
    }

    #[test]
    fn scattered_letters_and_reordered_words_do_not_match() {
        for query in ["oat", "Austin Oak", "okstr"] {
            assert!(
                search_favorites(favorites(), query).is_empty(),
                "unexpected match for {query:?}"
            );
        }
    }

    #[test]
    fn rows_without_address_never_match() {
        assert_eq!(ids(&search_favorites(favorites(), "tx")), ["a", "b"]);
    }
}
