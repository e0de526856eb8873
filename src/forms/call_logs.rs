use serde::Deserialize;

use crate::domain::call_log::NewCallLog;
use crate::domain::types::{CallDuration, CallStatus, CallType, ClientId, Note, UserId};
use crate::forms::{FormError, Timestamp, missing_fields, present};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallLogForm {
    pub client_id: Option<i32>,
    pub status: Option<String>,
    pub call_type: Option<String>,
    pub duration: Option<String>,
    pub called_time: Option<Timestamp>,
    pub note: Option<String>,
    pub user_id: Option<i32>,
}

impl TryFrom<CreateCallLogForm> for NewCallLog {
    type Error = FormError;

    fn try_from(form: CreateCallLogForm) -> Result<Self, Self::Error> {
        let (Some(client_id), Some(status), Some(call_type), Some(called_time), Some(user_id)) = (
            form.client_id,
            present(&form.status),
            present(&form.call_type),
            form.called_time.as_ref(),
            form.user_id,
        ) else {
            return Err(missing_fields(&[
                ("clientId", form.client_id.is_some()),
                ("status", present(&form.status).is_some()),
                ("callType", present(&form.call_type).is_some()),
                ("calledTime", form.called_time.is_some()),
                ("userId", form.user_id.is_some()),
            ]));
        };

        Ok(NewCallLog {
            user_id: UserId::new(user_id)?,
            client_id: ClientId::new(client_id)?,
            status: status.parse::<CallStatus>()?,
            call_type: call_type.parse::<CallType>()?,
            duration: present(&form.duration).map(CallDuration::new).transpose()?,
            called_time: called_time.to_naive_utc()?,
            note: present(&form.note).map(Note::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_log_form_to_domain() {
        let form: CreateCallLogForm = serde_json::from_str(
            r#"{"clientId": 4, "status": "connected", "callType": "incoming",
                "duration": "2m 10s", "calledTime": "2025-05-02T10:15:00Z",
                "note": "<b>asked</b> for rates", "userId": 2}"#,
        )
        .unwrap();
        let log = NewCallLog::try_from(form).unwrap();
        assert_eq!(log.status, CallStatus::Connected);
        assert_eq!(log.call_type, CallType::Incoming);
        assert_eq!(log.duration.as_ref().map(CallDuration::as_str), Some("2m 10s"));
        assert_eq!(log.note.as_ref().map(Note::as_str), Some("<b>asked</b> for rates"));
        assert_eq!(log.called_time.to_string(), "2025-05-02 10:15:00");
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let form = CreateCallLogForm {
            client_id: Some(1),
            status: Some("missed".into()),
            call_type: Some("missed".into()),
            duration: Some(" ".into()),
            called_time: Some(Timestamp::Millis(0)),
            note: Some("".into()),
            user_id: Some(1),
        };
        let log = NewCallLog::try_from(form).unwrap();
        assert!(log.duration.is_none());
        assert!(log.note.is_none());
    }

    #[test]
    fn missing_called_time_is_reported() {
        let form = CreateCallLogForm {
            client_id: Some(1),
            status: Some("missed".into()),
            call_type: Some("outgoing".into()),
            user_id: Some(1),
            ..CreateCallLogForm::default()
        };
        let err = NewCallLog::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: calledTime");
    }

    #[test]
    fn invalid_call_type_is_rejected() {
        let form = CreateCallLogForm {
            client_id: Some(1),
            status: Some("connected".into()),
            call_type: Some("video".into()),
            called_time: Some(Timestamp::Millis(0)),
            user_id: Some(1),
            ..CreateCallLogForm::default()
        };
        assert!(matches!(
            NewCallLog::try_from(form),
            Err(FormError::InvalidValue(_))
        ));
    }
}
