//! Error types for propfolio.
//!
//! This module defines the centralized error type [`PropfolioError`] and a type alias
//! [`Result`] used by every fallible operation in the crate.
//!
//! Lookups that find nothing are not errors: read operations answer `false` or an
//! empty list instead. Adding a favorite that already exists is likewise a
//! successful no-op, so there is no conflict variant.

use thiserror::Error;

/// The main error type for propfolio operations.
///
/// # Examples
///
/// ```
/// use propfolio::PropfolioError;
///
/// fn commit() -> Result<(), PropfolioError> {
///     Err(PropfolioError::Persistence("disk full".to_string()))
/// }
///
/// assert!(commit().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PropfolioError {
    /// The storage backend failed to commit or load data.
    ///
    /// Mutating operations that return this variant have left the store at its
    /// pre-call state.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A search response could not be decoded as a whole batch.
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration attempted with a username that already exists.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Username or password was empty.
    #[error("Username and password are required")]
    MissingCredentials,

    /// No account matches the supplied username and password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A sort strategy name outside `price`, `rooms`, `recent`.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// A specialized `Result` type for propfolio operations.
pub type Result<T> = std::result::Result<T, PropfolioError>;
