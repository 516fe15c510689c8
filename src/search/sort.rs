//! Ordering strategies for the favorites list.
//!
//! Live search results are never re-sorted; they keep the provider's order.

use crate::domain::{PropfolioError, Result};
use crate::storage::FavoriteEntity;
use chrono::Utc;
use std::fmt;
use std::str::FromStr;

/// Named ordering selected by the favorites screen's sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending by price.
    Price,
    /// Ascending by bedrooms, then bathrooms.
    Rooms,
    /// Newest first; a row without a timestamp counts as added now.
    Recent,
}

impl FromStr for SortKey {
    type Err = PropfolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "rooms" => Ok(Self::Rooms),
            "recent" => Ok(Self::Recent),
            other => Err(PropfolioError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Price => "price",
            Self::Rooms => "rooms",
            Self::Recent => "recent",
        })
    }
}

/// Sorts favorites in place. The sort is stable: equal keys keep input order.
///
/// Missing price and room counts compare as `0`.
///
/// # Examples
///
/// ```
/// use propfolio::{FavoriteEntity, PropertyRecord, UserId};
/// use propfolio::search::{sort_favorites, SortKey};
///
/// let user = UserId::new("kate");
/// let mut favorites: Vec<FavoriteEntity> = [500_000.0, 250_000.0, 750_000.0]
///     .iter()
///     .enumerate()
///     .map(|(i, price)| {
///         FavoriteEntity::new(user.clone(), &PropertyRecord::new(i.to_string()).with_price(*price))
///     })
///     .collect();
///
/// sort_favorites(&mut favorites, SortKey::Price);
/// let prices: Vec<f64> = favorites.iter().map(|f| f.snapshot.price_or_zero()).collect();
/// assert_eq!(prices, [250_000.0, 500_000.0, 750_000.0]);
/// ```
pub fn sort_favorites(favorites: &mut [FavoriteEntity], key: SortKey) {
    let _span = tracing::debug_span!("sort_favorites",
        count = favorites.len(),
        key = %key
    ).entered();

    match key {
        SortKey::Price => favorites.sort_by(|a, b| {
            a.snapshot.price_or_zero().total_cmp(&b.snapshot.price_or_zero())
        }),
        SortKey::Rooms => favorites.sort_by(|a, b| {
            a.snapshot
                .bedrooms_or_zero()
                .total_cmp(&b.snapshot.bedrooms_or_zero())
                .then_with(|| {
                    a.snapshot
                        .bathrooms_or_zero()
                        .total_cmp(&b.snapshot.bathrooms_or_zero())
                })
        }),
        SortKey::Recent => {
            let now = Utc::now();
            favorites.sort_by(|a, b| {
                b.date_added.unwrap_or(now).cmp(&a.date_added.unwrap_or(now))
            });
        }
    }
}
