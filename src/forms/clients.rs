use serde::Deserialize;

use crate::domain::client::NewClient;
use crate::domain::types::{AssigneeRole, ClientName, Location, PhoneNumber, UserId};
use crate::forms::{FormError, missing_fields, present};

/// Body of the single client creation endpoint.
///
/// The assignee may be given under any of three keys; `assignedUserId` wins
/// over `fieldPersonId`, which wins over `salespersonId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub salesperson_id: Option<i32>,
    pub field_person_id: Option<i32>,
    pub assigned_user_id: Option<i32>,
    pub assigned_role: Option<String>,
}

pub struct CreateClientPayload {
    pub assignee_id: UserId,
    pub client: NewClient,
}

impl TryFrom<CreateClientForm> for CreateClientPayload {
    type Error = FormError;

    fn try_from(form: CreateClientForm) -> Result<Self, Self::Error> {
        let (Some(name), Some(phone)) = (present(&form.name), present(&form.phone)) else {
            return Err(missing_fields(&[
                ("name", present(&form.name).is_some()),
                ("phone", present(&form.phone).is_some()),
            ]));
        };

        let assignee_id = form
            .assigned_user_id
            .or(form.field_person_id)
            .or(form.salesperson_id)
            .ok_or(FormError::MissingAssignee)?;

        let role = match present(&form.assigned_role) {
            Some(role) => role.parse::<AssigneeRole>()?,
            None if form.field_person_id.is_some() => AssigneeRole::Fieldperson,
            None => AssigneeRole::Salesperson,
        };

        let location = present(&form.location).map(Location::new).transpose()?;
        let assignee_id = UserId::new(assignee_id)?;

        let client = NewClient::new(ClientName::new(name)?, PhoneNumber::new(phone)?, location)
            .assign(assignee_id, role);

        Ok(Self {
            assignee_id,
            client,
        })
    }
}
