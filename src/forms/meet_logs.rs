use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::meet_log::NewMeetLog;
use crate::domain::types::{ClientId, MeetStatus, Note, UserId};
use crate::forms::{FormError, Timestamp, missing_fields, present};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetLogForm {
    pub client_id: Option<i32>,
    pub field_person_id: Option<i32>,
    pub meet_status: Option<String>,
    #[validate(range(min = 0.0))]
    pub distance_travelled: Option<f64>,
    /// Time of the visit; defaults to now.
    pub timestamp: Option<Timestamp>,
    pub notes: Option<String>,
}

impl TryFrom<CreateMeetLogForm> for NewMeetLog {
    type Error = FormError;

    fn try_from(form: CreateMeetLogForm) -> Result<Self, Self::Error> {
        let (Some(client_id), Some(field_person_id), Some(meet_status)) = (
            form.client_id,
            form.field_person_id,
            present(&form.meet_status),
        ) else {
            return Err(missing_fields(&[
                ("clientId", form.client_id.is_some()),
                ("fieldPersonId", form.field_person_id.is_some()),
                ("meetStatus", present(&form.meet_status).is_some()),
            ]));
        };

        form.validate()?;

        let visited_at = match &form.timestamp {
            Some(timestamp) => timestamp.to_naive_utc()?,
            None => Utc::now().naive_utc(),
        };

        Ok(NewMeetLog {
            field_person_id: UserId::new(field_person_id)?,
            client_id: ClientId::new(client_id)?,
            meet_status: meet_status.parse::<MeetStatus>()?,
            distance_travelled: form.distance_travelled,
            visited_at,
            notes: present(&form.notes).map(Note::new).transpose()?,
        })
    }
}
