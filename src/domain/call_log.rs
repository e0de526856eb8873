use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CallDuration, CallLogId, CallStatus, CallType, ClientId, Note, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CallLog {
    pub id: CallLogId,
    pub user_id: UserId,
    pub client_id: ClientId,
    pub status: CallStatus,
    pub call_type: CallType,
    pub duration: Option<CallDuration>,
    pub called_time: NaiveDateTime,
    pub note: Option<Note>,
}

#[derive(Clone, Debug)]
pub struct NewCallLog {
    pub user_id: UserId,
    pub client_id: ClientId,
    pub status: CallStatus,
    pub call_type: CallType,
    pub duration: Option<CallDuration>,
    pub called_time: NaiveDateTime,
    pub note: Option<Note>,
}
