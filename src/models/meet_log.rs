//! Diesel models for storing field visit outcomes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::meet_log::{MeetLog as DomainMeetLog, NewMeetLog as DomainNewMeetLog};
use crate::domain::types::{
    ClientId, MeetLogId, MeetStatus, Note, TypeConstraintError, UserId,
};
use crate::models::client::Client;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(belongs_to(User, foreign_key = field_person_id))]
#[diesel(table_name = crate::schema::meet_logs)]
pub struct MeetLog {
    pub id: i32,
    pub field_person_id: i32,
    pub client_id: i32,
    pub meet_status: String,
    pub distance_travelled: Option<f64>,
    pub visited_at: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meet_logs)]
pub struct NewMeetLog<'a> {
    pub field_person_id: i32,
    pub client_id: i32,
    pub meet_status: &'a str,
    pub distance_travelled: Option<f64>,
    pub visited_at: NaiveDateTime,
    pub notes: Option<&'a str>,
}

impl TryFrom<MeetLog> for DomainMeetLog {
    type Error = TypeConstraintError;

    fn try_from(log: MeetLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MeetLogId::try_from(log.id)?,
            field_person_id: UserId::try_from(log.field_person_id)?,
            client_id: ClientId::try_from(log.client_id)?,
            meet_status: log.meet_status.parse::<MeetStatus>()?,
            distance_travelled: log.distance_travelled,
            visited_at: log.visited_at,
            notes: log.notes.map(Note::new).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewMeetLog> for NewMeetLog<'a> {
    fn from(log: &'a DomainNewMeetLog) -> Self {
        Self {
            field_person_id: log.field_person_id.get(),
            client_id: log.client_id.get(),
            meet_status: log.meet_status.as_str(),
            distance_travelled: log.distance_travelled,
            visited_at: log.visited_at,
            notes: log.notes.as_ref().map(Note::as_str),
        }
    }
}
