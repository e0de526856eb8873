use serde::Deserialize;

use crate::domain::lead::NewLead;
use crate::domain::types::{ClientId, LoanStatus, LoanType, UserId};
use crate::forms::{FormError, missing_fields, present};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadForm {
    pub client_id: Option<i32>,
    pub loan_type: Option<String>,
    pub loan_status: Option<String>,
    pub user_id: Option<i32>,
}

impl TryFrom<CreateLeadForm> for NewLead {
    type Error = FormError;

    fn try_from(form: CreateLeadForm) -> Result<Self, Self::Error> {
        let (Some(client_id), Some(loan_type), Some(loan_status), Some(user_id)) = (
            form.client_id,
            present(&form.loan_type),
            present(&form.loan_status),
            form.user_id,
        ) else {
            return Err(missing_fields(&[
                ("clientId", form.client_id.is_some()),
                ("loanType", present(&form.loan_type).is_some()),
                ("loanStatus", present(&form.loan_status).is_some()),
                ("userId", form.user_id.is_some()),
            ]));
        };

        Ok(NewLead::new(
            ClientId::new(client_id)?,
            UserId::new(user_id)?,
            loan_type.parse::<LoanType>()?,
            loan_status.parse::<LoanStatus>()?,
        ))
    }
}
