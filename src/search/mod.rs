//! Filter and sort pipeline for listings and favorites.
//!
//! All functions here are pure: they never fail and never mutate their input
//! except for [`sort_favorites`], which sorts the caller's slice in place.
//!
//! # Modules
//!
//! - `filter`: Multi-criteria narrowing of search results
//! - `sort`: Price, rooms and recency ordering of favorites
//! - `text`: Case-insensitive address search over favorites

pub mod filter;
pub mod sort;
pub mod text;

pub use filter::{apply, parse_number, FilterCriteria};
pub use sort::{sort_favorites, SortKey};
pub use text::search_favorites;
