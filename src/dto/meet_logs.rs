use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::meet_log::MeetLog;
use crate::domain::statistics::MeetStatusCounts;
use crate::domain::types::MeetStatus;
use crate::domain::user::User;
use crate::dto::clients::ClientView;
use crate::dto::users::UserView;

/// Filters accepted by `GET /fieldperson/meetlogs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetLogQuery {
    pub field_person_id: Option<i32>,
    pub client_id: Option<i32>,
    /// Unknown statuses are ignored rather than rejected.
    pub meet_status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetStatisticsQuery {
    pub field_person_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetLogView {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(rename = "clientId")]
    pub client: ClientView,
    #[serde(rename = "fieldPersonId")]
    pub field_person: UserView,
    pub meet_status: MeetStatus,
    pub distance_travelled: Option<f64>,
    pub timestamp: NaiveDateTime,
    pub notes: Option<String>,
}

impl From<(MeetLog, Client, User)> for MeetLogView {
    fn from((log, client, field_person): (MeetLog, Client, User)) -> Self {
        Self {
            id: log.id.get(),
            client: client.into(),
            field_person: field_person.into(),
            meet_status: log.meet_status,
            distance_travelled: log.distance_travelled,
            timestamp: log.visited_at,
            notes: log.notes.map(|notes| notes.into_inner()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetStatisticsView {
    pub total_meets: usize,
    pub meet_status_counts: MeetStatusCounts,
}

impl From<MeetStatusCounts> for MeetStatisticsView {
    fn from(counts: MeetStatusCounts) -> Self {
        Self {
            total_meets: counts.total(),
            meet_status_counts: counts,
        }
    }
}
