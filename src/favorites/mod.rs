//! Favorites: the per-user store and the service the UI drives.
//!
//! - `store`: [`FavoriteStore`], CRUD over favorite rows with the
//!   one-row-per-(user, property) guarantee
//! - `service`: [`FavoritesService`], toggle and annotated queries

pub mod service;
pub mod store;

pub use service::{FavoritesService, FlaggedProperty};
pub use store::FavoriteStore;
