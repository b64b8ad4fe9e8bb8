//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define persistence contracts for favorites and settings.
//! - Isolate SQL details from the in-memory stores.
//!
//! # Invariants
//! - Repositories never decide membership or flag values; stores do.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::quote::QuoteValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod favorite_repo;
pub mod setting_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by favorites and settings persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    Validation(QuoteValidationError),
    /// Connection mutex was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "storage connection lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) | Self::Poisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}
