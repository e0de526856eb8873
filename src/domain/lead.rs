use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, LeadId, LoanStatus, LoanType, UserId};

/// Links a client to a loan interest classification owned by a user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub client_id: ClientId,
    pub user_id: UserId,
    pub loan_type: LoanType,
    pub loan_status: LoanStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewLead {
    pub client_id: ClientId,
    pub user_id: UserId,
    pub loan_type: LoanType,
    pub loan_status: LoanStatus,
}

impl NewLead {
    #[must_use]
    pub fn new(
        client_id: ClientId,
        user_id: UserId,
        loan_type: LoanType,
        loan_status: LoanStatus,
    ) -> Self {
        Self {
            client_id,
            user_id,
            loan_type,
            loan_status,
        }
    }
}
