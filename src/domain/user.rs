//! User identity and session values.
//!
//! Identity is passed explicitly into every component that needs it. There is no
//! process-wide "current user"; the caller owns the [`UserSession`] and hands it
//! to the service on each call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an account, used to scope favorites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The signed-in state of one UI session.
///
/// A logged-out session has no user: favorite lookups answer `false` and
/// removals do nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    user: Option<UserId>,
}

impl UserSession {
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
