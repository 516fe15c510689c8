//! Storage layer for persistent favorites and accounts.
//!
//! This module provides the storage abstraction behind the favorites store and
//! the account registry, plus the shared handle type that gives the process a
//! single serialized write path.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `data`: In-memory dataset and on-disk document shared by the backends
//! - `json`: JSON file-based storage implementation
//! - `memory`: Non-durable in-process implementation
//! - `models`: Persisted row types

pub mod backend;
pub mod data;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use models::{AccountRecord, FavoriteEntity};

use std::sync::{Arc, RwLock};

/// One storage backend shared by every component of a process.
///
/// Writers take the write lock, so mutations are serialized; readers share the
/// read lock and always observe a fully committed state.
pub type SharedStorage = Arc<RwLock<Box<dyn Storage>>>;

/// Wraps a backend in a [`SharedStorage`] handle.
pub fn shared(storage: impl Storage + 'static) -> SharedStorage {
    let backend: Box<dyn Storage> = Box::new(storage);
    Arc::new(RwLock::new(backend))
}
