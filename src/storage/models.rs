//! Storage record models for the persistence layer.
//!
//! A [`FavoriteEntity`] is a snapshot: the listing fields are copied at the moment
//! the user favorites the property and are never refreshed from later search
//! results. Row presence is the favorited state; there is no flag to flip.

use crate::domain::{PropertyRecord, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One favorited property for one user.
///
/// At most one row exists per `(user_id, snapshot.property_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntity {
    pub user_id: UserId,

    /// Listing fields as they were when the favorite was created.
    pub snapshot: PropertyRecord,

    /// Creation time; `None` only for rows written without a timestamp.
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl FavoriteEntity {
    /// Creates a favorite row stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use propfolio::{FavoriteEntity, PropertyRecord, UserId};
    ///
    /// let row = FavoriteEntity::new(UserId::new("kate"), &PropertyRecord::new("a"));
    /// assert_eq!(row.property_id(), "a");
    /// assert!(row.date_added.is_some());
    /// ```
    #[must_use]
    pub fn new(user_id: UserId, record: &PropertyRecord) -> Self {
        Self {
            user_id,
            snapshot: record.clone(),
            date_added: Some(Utc::now()),
        }
    }

    #[must_use]
    pub fn property_id(&self) -> &str {
        &self.snapshot.property_id
    }

    #[must_use]
    pub fn matches(&self, user_id: &UserId, property_id: &str) -> bool {
        self.user_id == *user_id && self.snapshot.property_id == property_id
    }
}

/// A registered account.
///
/// The password is compared verbatim; no security contract is attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    /// The identity favorites are scoped under.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.username.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_does_not_follow_the_source_record() {
        let mut record = PropertyRecord::new("a").with_price(500_000.0);
        let row = FavoriteEntity::new(UserId::new("kate"), &record);

        record.price = Some(450_000.0);
        assert_eq!(row.snapshot.price, Some(500_000.0));
    }

    #[test]
    fn rows_without_timestamp_still_load() {
        let json = r#"{"user_id": "kate", "snapshot": {"propertyId": "a"}}"#;
        let row: FavoriteEntity = serde_json::from_str(json).unwrap();
        assert!(row.date_added.is_none());
        assert!(row.matches(&UserId::new("kate"), "a"));
        assert!(!row.matches(&UserId::new("sam"), "a"));
    }
}
