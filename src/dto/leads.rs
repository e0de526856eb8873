use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::lead::Lead;
use crate::domain::types::{LoanStatus, LoanType};
use crate::dto::clients::ClientView;

/// A lead with its client embedded.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadView {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(rename = "clientId")]
    pub client: ClientView,
    pub user_id: i32,
    pub loan_type: LoanType,
    pub loan_status: LoanStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<(Lead, Client)> for LeadView {
    fn from((lead, client): (Lead, Client)) -> Self {
        Self {
            id: lead.id.get(),
            client: client.into(),
            user_id: lead.user_id.get(),
            loan_type: lead.loan_type,
            loan_status: lead.loan_status,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}
