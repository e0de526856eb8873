use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::{ClientId, LeadId, LoanStatus, LoanType, TypeConstraintError, UserId};
use crate::models::client::Client;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::leads)]
pub struct Lead {
    pub id: i32,
    pub client_id: i32,
    pub user_id: i32,
    pub loan_type: String,
    pub loan_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
pub struct NewLead<'a> {
    pub client_id: i32,
    pub user_id: i32,
    pub loan_type: &'a str,
    pub loan_status: &'a str,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::try_from(lead.id)?,
            client_id: ClientId::try_from(lead.client_id)?,
            user_id: UserId::try_from(lead.user_id)?,
            loan_type: lead.loan_type.parse::<LoanType>()?,
            loan_status: lead.loan_status.parse::<LoanStatus>()?,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            client_id: lead.client_id.get(),
            user_id: lead.user_id.get(),
            loan_type: lead.loan_type.as_str(),
            loan_status: lead.loan_status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn lead_into_domain_parses_labels() {
        let now = Utc::now().naive_utc();
        let db = Lead {
            id: 3,
            client_id: 7,
            user_id: 2,
            loan_type: "home".into(),
            loan_status: "warm".into(),
            created_at: now,
            updated_at: now,
        };
        let lead = DomainLead::try_from(db).expect("valid lead");
        assert_eq!(lead.loan_type, LoanType::Home);
        assert_eq!(lead.loan_status, LoanStatus::Warm);
        assert_eq!(lead.client_id.get(), 7);
    }

    #[test]
    fn new_lead_stores_labels() {
        let new_lead = DomainNewLead::new(
            ClientId::new(1).unwrap(),
            UserId::new(2).unwrap(),
            LoanType::Business,
            LoanStatus::Hot,
        );
        let db = NewLead::from(&new_lead);
        assert_eq!(db.loan_type, "business");
        assert_eq!(db.loan_status, "hot");
    }
}
