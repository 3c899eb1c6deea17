//! Tagged outcome of a single-record read.

use crate::error::RepoError;

/// Result of looking up one record.
///
/// Keeps "no such row" apart from "the query failed" until the caller decides
/// to collapse both into an absent value.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    QueryFailed(RepoError),
}

impl<T> Lookup<T> {
    /// Drop the distinction between a missing row and a failed query.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::QueryFailed(_) => None,
        }
    }
}

impl<T> From<Result<Option<T>, RepoError>> for Lookup<T> {
    fn from(result: Result<Option<T>, RepoError>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) | Err(RepoError::NotFound) => Lookup::NotFound,
            Err(err) => Lookup::QueryFailed(err),
        }
    }
}
