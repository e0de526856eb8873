use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{
    AssigneeRole, ClientId, ClientName, Location, PhoneNumber, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub location: Option<String>,
    pub assigned_to: Option<i32>,
    pub assigned_role: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub location: Option<&'a str>,
    pub assigned_to: Option<i32>,
    pub assigned_role: Option<&'a str>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(client.id)?,
            name: ClientName::new(client.name)?,
            phone: PhoneNumber::new(client.phone)?,
            location: client.location.map(Location::new).transpose()?,
            assigned_to: client.assigned_to.map(UserId::try_from).transpose()?,
            assigned_role: client
                .assigned_role
                .map(|role| role.parse::<AssigneeRole>())
                .transpose()?,
            created_at: client.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            phone: client.phone.as_str(),
            location: client.location.as_ref().map(Location::as_str),
            assigned_to: client.assigned_to.map(UserId::get),
            assigned_role: client.assigned_role.map(AssigneeRole::as_str),
        }
    }
}
