//! Propfolio: per-user property favorites with a listing filter and sort pipeline.
//!
//! Propfolio is the core behind a property search app:
//! - A durable favorites store with at most one favorite per user and property
//! - A multi-criteria filter for search results returned by a listing provider
//! - Price, rooms and recency ordering for the favorites list
//! - A favorites service that toggles favorites and flags search results
//! - Minimal account registration to scope favorites per user
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Composition root (initialize → AppContext)         │
//! └─────────────────────────────────────────────────────┘
//!          │                                  │
//! ┌────────────────────────┐      ┌──────────────────────┐
//! │ Favorites (favorites/) │      │ Accounts (accounts)  │
//! │ - FavoritesService     │      │ - register / login   │
//! │ - FavoriteStore        │      └──────────────────────┘
//! └────────────────────────┘                  │
//!          │             │                    │
//! ┌────────────────┐   ┌─────────────────────────────────┐
//! │ Search         │   │ Storage (storage/)              │
//! │ - filter       │   │ - Storage trait                 │
//! │ - sort         │   │ - JsonStorage / MemoryStorage   │
//! │ - text search  │   │ - SharedStorage (RwLock handle) │
//! └────────────────┘   └─────────────────────────────────┘
//!          │                          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): PropertyRecord, UserId, errors   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Search results flow from the provider through [`search::apply`] straight to
//! the UI in provider order. Favorites flow from the UI through
//! [`FavoritesService::toggle_favorite`] into the store; the favorites list is
//! read back, searched and sorted with [`search::SortKey`].
//!
//! # Example
//!
//! ```
//! use propfolio::search::{apply, FilterCriteria};
//! use propfolio::{parse_search_response, FavoriteStore, FavoritesService, UserId};
//! use propfolio::storage::{shared, MemoryStorage};
//!
//! let records = parse_search_response(r#"{"props": [
//!     {"propertyId": "a", "bedrooms": 3, "price": 300000},
//!     {"propertyId": "b", "bedrooms": 2, "price": 200000}
//! ]}"#)?;
//!
//! let criteria = FilterCriteria { min_beds: Some(3.0), ..Default::default() };
//! let results = apply(&records, &criteria);
//!
//! let service = FavoritesService::new(FavoriteStore::new(shared(MemoryStorage::new())));
//! let user = UserId::new("kate");
//! assert!(service.toggle_favorite(&user, &results[0])?);
//! assert!(service.is_favorited(Some(&user), "a"));
//! # Ok::<(), propfolio::PropfolioError>(())
//! ```

pub mod accounts;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod search;
pub mod storage;

pub mod observability;

pub use accounts::AccountRegistry;
pub use domain::{
    parse_search_response, PropertyRecord, PropfolioError, Result, UserId, UserSession,
};
pub use favorites::{FavoriteStore, FavoritesService, FlaggedProperty};
pub use storage::{FavoriteEntity, JsonStorage};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default file name of the favorites store inside the data directory.
pub const DEFAULT_STORE_FILE: &str = "favorites.json";

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// data_dir = "~/.local/share/propfolio"
/// store_file = "favorites.json"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the store and the span log.
    pub data_dir: PathBuf,

    /// File name of the JSON store inside `data_dir`.
    pub store_file: String,

    /// Tracing filter directive, e.g. `debug` or `propfolio=trace`.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::default_data_dir(),
            store_file: DEFAULT_STORE_FILE.to_string(),
            trace_level: None,
        }
    }
}

/// On-disk form of [`Config`]; every key optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_dir: Option<String>,
    store_file: Option<String>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: `~` is expanded; empty falls back to the default
    /// - `store_file`: empty falls back to `favorites.json`
    /// - `trace_level`: empty means unset
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use propfolio::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/var/lib/propfolio".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_dir, PathBuf::from("/var/lib/propfolio"));
    /// assert_eq!(config.store_file, "favorites.json");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::from_parts(ConfigFile {
            data_dir: map.get("data_dir").cloned(),
            store_file: map.get("store_file").cloned(),
            trace_level: map.get("trace_level").cloned(),
        })
    }

    /// Reads configuration from a TOML file with the same keys as [`Config::from_map`].
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Config`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PropfolioError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PropfolioError::Config`] if the document is not valid TOML or a
    /// key has the wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| PropfolioError::Config(format!("invalid configuration: {e}")))?;
        Ok(Self::from_parts(file))
    }

    fn from_parts(file: ConfigFile) -> Self {
        let non_empty = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
        let defaults = Self::default();

        Self {
            data_dir: non_empty(file.data_dir)
                .map_or(defaults.data_dir, |dir| infrastructure::expand_tilde(dir.trim())),
            store_file: non_empty(file.store_file).unwrap_or(defaults.store_file),
            trace_level: non_empty(file.trace_level),
        }
    }

    /// Full path of the JSON store.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }
}

/// Components sharing one storage handle, built by [`initialize`].
#[derive(Debug, Clone)]
pub struct AppContext {
    pub favorites: FavoritesService,
    pub accounts: AccountRegistry,
}

impl AppContext {
    /// Builds the components over an existing storage handle.
    #[must_use]
    pub fn with_storage(shared: storage::SharedStorage) -> Self {
        Self {
            favorites: FavoritesService::new(FavoriteStore::new(shared.clone())),
            accounts: AccountRegistry::new(shared),
        }
    }
}

/// Opens the JSON store named by `config` and builds the application components.
///
/// Tracing is not initialized here; call [`observability::init_tracing`] first
/// if spans should be exported.
///
/// # Errors
///
/// Returns an error if the store file cannot be opened or parsed.
///
/// # Example
///
/// ```no_run
/// use propfolio::{initialize, Config};
///
/// let app = initialize(&Config::default())?;
/// let user = app.accounts.register("kate", "hunter2")?;
/// assert!(app.favorites.favorites(&user, "", None).is_empty());
/// # Ok::<(), propfolio::PropfolioError>(())
/// ```
pub fn initialize(config: &Config) -> Result<AppContext> {
    tracing::debug!(store_path = ?config.store_path(), "initializing propfolio");

    let backend = JsonStorage::open(config.store_path())?;
    Ok(AppContext::with_storage(storage::shared(backend)))
}
