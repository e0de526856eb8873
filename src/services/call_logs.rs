use crate::domain::auth::AuthenticatedUser;
use crate::domain::call_log::NewCallLog;
use crate::domain::types::UserId;
use crate::dto::call_logs::CallLogView;
use crate::forms::call_logs::CreateCallLogForm;
use crate::pagination::{PageParams, Paginated};
use crate::repository::{CallLogListQuery, CallLogReader, CallLogWriter, ClientReader, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_self_or_admin};

/// Call logs of `user_id`, latest call first.
pub fn list_call_logs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    params: PageParams,
) -> ServiceResult<Paginated<CallLogView>>
where
    R: CallLogReader + ?Sized,
{
    let user_id = UserId::new(user_id)?;
    ensure_self_or_admin(user, user_id)?;

    let page = params.resolve();
    let mut query = CallLogListQuery::new(user_id);
    if let Some(page) = page {
        query = query.paginate(page.page, page.limit);
    }

    let (total, logs) = repo.list_call_logs(query)?;
    Ok(Paginated::new(logs, total, page).map(CallLogView::from))
}

pub fn create_call_log<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateCallLogForm,
) -> ServiceResult<CallLogView>
where
    R: CallLogWriter + ClientReader + UserReader + ?Sized,
{
    let new_log = NewCallLog::try_from(form)?;
    ensure_self_or_admin(user, new_log.user_id)?;

    let client = repo
        .get_client_by_id(new_log.client_id)?
        .ok_or(ServiceError::NotFound("Client"))?;
    repo.get_user_by_id(new_log.user_id)?
        .ok_or(ServiceError::NotFound("User"))?;

    let log = repo.create_call_log(&new_log).map_err(|err| {
        log::error!("Failed to create call log: {err}");
        ServiceError::from(err)
    })?;

    Ok(CallLogView::from((log, client)))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::call_log::CallLog;
    use crate::domain::types::{CallLogId, CallStatus, Role};
    use crate::forms::Timestamp;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{auth_user, client, user};

    fn form() -> CreateCallLogForm {
        CreateCallLogForm {
            client_id: Some(4),
            status: Some("followup".into()),
            call_type: Some("outgoing".into()),
            duration: Some("5m".into()),
            called_time: Some(Timestamp::Text("2025-06-01 09:00:00".into())),
            note: None,
            user_id: Some(2),
        }
    }

    #[test]
    fn create_call_log_embeds_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client(id.get(), 2))));
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(user(id.get(), Role::Salesperson))));
        repo.expect_create_call_log().returning(|new_log| {
            Ok(CallLog {
                id: CallLogId::new(30).unwrap(),
                user_id: new_log.user_id,
                client_id: new_log.client_id,
                status: new_log.status,
                call_type: new_log.call_type,
                duration: new_log.duration.clone(),
                called_time: new_log.called_time,
                note: new_log.note.clone(),
            })
        });

        let view = create_call_log(&repo, &auth_user(2, Role::Salesperson), form()).unwrap();
        assert_eq!(view.id, 30);
        assert_eq!(view.client.id, 4);
        assert_eq!(view.status, CallStatus::Followup);
        assert_eq!(view.duration.as_deref(), Some("5m"));
    }

    #[test]
    fn unknown_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));
        repo.expect_create_call_log().never();
        assert!(matches!(
            create_call_log(&repo, &auth_user(2, Role::Salesperson), form()),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client(id.get(), 2))));
        repo.expect_get_user_by_id().returning(|_| Ok(None));
        repo.expect_create_call_log().never();
        assert!(matches!(
            create_call_log(&repo, &auth_user(1, Role::Admin), form()),
            Err(ServiceError::NotFound("User"))
        ));
    }

    #[test]
    fn listing_other_users_logs_is_denied() {
        let repo = MockRepository::new();
        assert!(matches!(
            list_call_logs(&repo, &auth_user(2, Role::Salesperson), 3, PageParams::default()),
            Err(ServiceError::Unauthorized)
        ));
    }
}
