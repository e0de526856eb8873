//! Failures of the Diesel-backed repository.
//!
//! SQLite constraint failures are split by what they mean for a lead tracking
//! request: a second account or client with the same key, a record pointing at
//! a client or user that does not exist, or a row the schema refuses outright.

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// Unique index hit: user email or client phone already stored.
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// A lead, call log or meet log referenced a missing client or user.
    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),

    /// NOT NULL or CHECK rejected the row, e.g. an unknown status label.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value no longer satisfies the domain value objects.
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => RepositoryError::Duplicate(message),
                    DatabaseErrorKind::ForeignKeyViolation => {
                        RepositoryError::MissingReference(message)
                    }
                    DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
                        RepositoryError::ConstraintViolation(message)
                    }
                    _ => RepositoryError::DatabaseError(message),
                }
            }
            DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Stored row is unreadable: {e}"))
            }
            DieselError::SerializationError(e) => {
                RepositoryError::ValidationError(format!("Value cannot be stored: {e}"))
            }
            _ => RepositoryError::Unexpected(err.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
