use thiserror::Error;

use crate::types::{ApplyError, DataError};

/// Unified error type covering JSON parsing, rule data validation, I/O, and
/// apply-time failures.
///
/// Returned by convenience methods like
/// [`PropertySetterManager::parse_string()`](crate::PropertySetterManager::parse_string)
/// and [`PropertySetterManager::load_file()`](crate::PropertySetterManager::load_file).
#[derive(Debug, Error)]
pub enum PropFilterError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}
