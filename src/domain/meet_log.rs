use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, MeetLogId, MeetStatus, Note, UserId};

/// Outcome of a field visit made by a fieldperson.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeetLog {
    pub id: MeetLogId,
    pub field_person_id: UserId,
    pub client_id: ClientId,
    pub meet_status: MeetStatus,
    pub distance_travelled: Option<f64>,
    pub visited_at: NaiveDateTime,
    pub notes: Option<Note>,
}

#[derive(Clone, Debug)]
pub struct NewMeetLog {
    pub field_person_id: UserId,
    pub client_id: ClientId,
    pub meet_status: MeetStatus,
    pub distance_travelled: Option<f64>,
    pub visited_at: NaiveDateTime,
    pub notes: Option<Note>,
}
