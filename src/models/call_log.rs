//! Diesel models for storing sales call outcomes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::call_log::{CallLog as DomainCallLog, NewCallLog as DomainNewCallLog};
use crate::domain::types::{
    CallDuration, CallLogId, CallStatus, CallType, ClientId, Note, TypeConstraintError, UserId,
};
use crate::models::client::Client;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::call_logs)]
pub struct CallLog {
    pub id: i32,
    pub user_id: i32,
    pub client_id: i32,
    pub status: String,
    pub call_type: String,
    pub duration: Option<String>,
    pub called_time: NaiveDateTime,
    pub note: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::call_logs)]
pub struct NewCallLog<'a> {
    pub user_id: i32,
    pub client_id: i32,
    pub status: &'a str,
    pub call_type: &'a str,
    pub duration: Option<&'a str>,
    pub called_time: NaiveDateTime,
    pub note: Option<&'a str>,
}

impl TryFrom<CallLog> for DomainCallLog {
    type Error = TypeConstraintError;

    fn try_from(log: CallLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CallLogId::try_from(log.id)?,
            user_id: UserId::try_from(log.user_id)?,
            client_id: ClientId::try_from(log.client_id)?,
            status: log.status.parse::<CallStatus>()?,
            call_type: log.call_type.parse::<CallType>()?,
            duration: log.duration.map(CallDuration::new).transpose()?,
            called_time: log.called_time,
            // Stored notes were sanitized on the way in.
            note: log.note.map(Note::new).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewCallLog> for NewCallLog<'a> {
    fn from(log: &'a DomainNewCallLog) -> Self {
        Self {
            user_id: log.user_id.get(),
            client_id: log.client_id.get(),
            status: log.status.as_str(),
            call_type: log.call_type.as_str(),
            duration: log.duration.as_ref().map(CallDuration::as_str),
            called_time: log.called_time,
            note: log.note.as_ref().map(Note::as_str),
        }
    }
}
