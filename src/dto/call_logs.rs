use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::call_log::CallLog;
use crate::domain::client::Client;
use crate::domain::types::{CallStatus, CallType};
use crate::dto::clients::ClientView;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallLogView {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(rename = "clientId")]
    pub client: ClientView,
    pub user_id: i32,
    pub status: CallStatus,
    pub call_type: CallType,
    pub duration: Option<String>,
    pub called_time: NaiveDateTime,
    pub note: Option<String>,
}

impl From<(CallLog, Client)> for CallLogView {
    fn from((log, client): (CallLog, Client)) -> Self {
        Self {
            id: log.id.get(),
            client: client.into(),
            user_id: log.user_id.get(),
            status: log.status,
            call_type: log.call_type,
            duration: log.duration.map(|duration| duration.into_inner()),
            called_time: log.called_time,
            note: log.note.map(|note| note.into_inner()),
        }
    }
}
