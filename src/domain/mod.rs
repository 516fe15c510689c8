//! Domain layer for propfolio.
//!
//! Core value types shared by every other layer, independent of how they are
//! stored or displayed.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`property`]: Listing records and search-response ingestion
//! - [`user`]: User identity and session values

pub mod error;
pub mod property;
pub mod user;

pub use error::{PropfolioError, Result};
pub use property::{parse_search_response, PropertyRecord, SearchResponse, LOT_AREA_UNKNOWN};
pub use user::{UserId, UserSession};
