//! Request payloads accepted by the API and their validation.
//!
//! Every form deserializes leniently (all fields optional) so that a missing
//! field produces a readable [`FormError::MissingFields`] instead of a serde
//! error, then converts into a typed payload via `TryFrom`.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod assign;
pub mod call_logs;
pub mod clients;
pub mod leads;
pub mod meet_logs;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Missing assignee id")]
    MissingAssignee,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("New password and confirm password do not match")]
    PasswordMismatch,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("failed to read CSV: {0}")]
    Csv(String),

    #[error("no valid clients found in upload")]
    NoValidRows,
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            other => FormError::InvalidValue(other.to_string()),
        }
    }
}

impl From<csv::Error> for FormError {
    fn from(err: csv::Error) -> Self {
        FormError::Csv(err.to_string())
    }
}

/// Returns the value when it holds something other than whitespace.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Builds [`FormError::MissingFields`] from `(name, is_present)` pairs.
pub(crate) fn missing_fields(fields: &[(&'static str, bool)]) -> FormError {
    let names = fields
        .iter()
        .filter(|(_, is_present)| !is_present)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();
    FormError::MissingFields(names.join(", "))
}

/// Point in time as sent by mobile clients: either epoch milliseconds or a
/// textual date.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    /// Resolves the timestamp to a naive UTC datetime.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and
    /// stringified epoch milliseconds.
    pub fn to_naive_utc(&self) -> Result<NaiveDateTime, FormError> {
        match self {
            Timestamp::Millis(ms) => from_millis(*ms),
            Timestamp::Text(text) => {
                let text = text.trim();
                if let Ok(ms) = text.parse::<i64>() {
                    return from_millis(ms);
                }
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Ok(parsed.naive_utc());
                }
                ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .ok_or_else(|| FormError::InvalidTimestamp(text.to_string()))
            }
        }
    }
}

fn from_millis(ms: i64) -> Result<NaiveDateTime, FormError> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| FormError::InvalidTimestamp(ms.to_string()))
}
