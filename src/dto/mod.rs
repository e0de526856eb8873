//! Wire representations returned by the HTTP API.
//!
//! Persisted records expose their identifier as `_id` and every body is
//! wrapped in a `{ "success": ..., ... }` envelope.

use serde::Serialize;

use crate::pagination::{PageRef, Paginated};

pub mod call_logs;
pub mod clients;
pub mod leads;
pub mod meet_logs;
pub mod statistics;
pub mod users;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<PageRef>,
}

impl<T> From<Paginated<T>> for ListResponse<T> {
    fn from(page: Paginated<T>) -> Self {
        Self {
            success: true,
            count: page.items.len(),
            total: page.total,
            data: page.items,
            next_page: page.next_page,
            previous_page: page.previous_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub msg: String,
    /// Details of an unexpected failure, only set for server errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
