//! Persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Store content items and their schemaless meta rows.
//! - Keep SQL details behind repository traits.
//!
//! # Invariants
//! - Meta writes run through the attached field registry before SQL.
//! - Read paths report malformed rows instead of masking them.

pub mod content_repo;
pub mod meta_store;

use crate::db::DbError;
use crate::model::content::ContentId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item and meta persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ContentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "content item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
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
