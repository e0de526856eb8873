use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::AssigneeRole;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub location: Option<String>,
    pub assigned_to: Option<i32>,
    pub assigned_role: Option<AssigneeRole>,
    pub created_at: NaiveDateTime,
}

impl From<Client> for ClientView {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.get(),
            name: client.name.into_inner(),
            phone: client.phone.into_inner(),
            location: client.location.map(|location| location.into_inner()),
            assigned_to: client.assigned_to.map(|id| id.get()),
            assigned_role: client.assigned_role,
            created_at: client.created_at,
        }
    }
}

/// Row of a bulk assignment that could not be imported.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedClient {
    pub name: String,
    pub phone: String,
    pub reason: String,
}

/// Summary of a bulk assignment run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AssignmentReport {
    pub assigned: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub failed: Vec<FailedClient>,
    pub clients: Vec<ClientView>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    /// `false` as soon as one row failed to import.
    pub success: bool,
    pub data: AssignmentReport,
}

impl From<AssignmentReport> for AssignmentResponse {
    fn from(report: AssignmentReport) -> Self {
        Self {
            success: report.failed.is_empty(),
            data: report,
        }
    }
}
