use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AssigneeRole, ClientId, ClientName, Location, PhoneNumber, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub phone: PhoneNumber,
    pub location: Option<Location>,
    /// User the client is assigned to.
    pub assigned_to: Option<UserId>,
    pub assigned_role: Option<AssigneeRole>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: PhoneNumber,
    pub location: Option<Location>,
    pub assigned_to: Option<UserId>,
    pub assigned_role: Option<AssigneeRole>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, phone: PhoneNumber, location: Option<Location>) -> Self {
        Self {
            name,
            phone,
            location,
            assigned_to: None,
            assigned_role: None,
        }
    }

    /// Assigns the new client to a salesperson or fieldperson.
    #[must_use]
    pub fn assign(mut self, user_id: UserId, role: AssigneeRole) -> Self {
        self.assigned_to = Some(user_id);
        self.assigned_role = Some(role);
        self
    }
}
