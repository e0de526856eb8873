//! Field visit logging for fieldpersons.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::meet_log::NewMeetLog;
use crate::domain::types::{ClientId, MeetLogId, MeetStatus, UserId};
use crate::dto::meet_logs::{MeetLogQuery, MeetLogView, MeetStatisticsQuery, MeetStatisticsView};
use crate::forms::meet_logs::CreateMeetLogForm;
use crate::pagination::{PageParams, Paginated};
use crate::repository::{
    ClientReader, MeetLogListQuery, MeetLogReader, MeetLogWriter, StatisticsReader, UserReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_self_or_admin};

pub fn create_meet_log<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateMeetLogForm,
) -> ServiceResult<MeetLogView>
where
    R: MeetLogWriter + ClientReader + UserReader + ?Sized,
{
    let new_log = NewMeetLog::try_from(form)?;
    ensure_self_or_admin(user, new_log.field_person_id)?;

    let client = repo
        .get_client_by_id(new_log.client_id)?
        .ok_or(ServiceError::NotFound("Client"))?;
    let field_person = repo
        .get_user_by_id(new_log.field_person_id)?
        .ok_or(ServiceError::NotFound("Field person"))?;

    let log = repo.create_meet_log(&new_log).map_err(|err| {
        log::error!("Failed to create meet log: {err}");
        ServiceError::from(err)
    })?;

    Ok(MeetLogView::from((log, client, field_person)))
}

/// Lists meet logs matching the filters. Non-admins only ever see their own.
pub fn list_meet_logs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: MeetLogQuery,
) -> ServiceResult<Paginated<MeetLogView>>
where
    R: MeetLogReader + ?Sized,
{
    let mut query = MeetLogListQuery::new();

    if user.is_admin() {
        if let Some(field_person_id) = params.field_person_id {
            query = query.field_person_id(UserId::new(field_person_id)?);
        }
    } else {
        query = query.field_person_id(user.user_id()?);
    }

    if let Some(client_id) = params.client_id {
        query = query.client_id(ClientId::new(client_id)?);
    }

    if let Some(status) = params
        .meet_status
        .as_deref()
        .and_then(|status| status.parse::<MeetStatus>().ok())
    {
        query = query.meet_status(status);
    }

    let page = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    if let Some(page) = page {
        query = query.paginate(page.page, page.limit);
    }

    let (total, logs) = repo.list_meet_logs(query)?;
    Ok(Paginated::new(logs, total, page).map(MeetLogView::from))
}

pub fn get_meet_log<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<MeetLogView>
where
    R: MeetLogReader + ?Sized,
{
    let (log, client, field_person) = repo
        .get_meet_log_by_id(MeetLogId::new(id)?)?
        .filter(|(log, _, _)| user.can_act_for(log.field_person_id))
        .ok_or(ServiceError::NotFound("Meet log"))?;

    Ok(MeetLogView::from((log, client, field_person)))
}

/// Visit outcome counters for one fieldperson over all time.
pub fn meet_statistics<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: MeetStatisticsQuery,
) -> ServiceResult<MeetStatisticsView>
where
    R: StatisticsReader + ?Sized,
{
    let field_person_id = params
        .field_person_id
        .ok_or_else(|| ServiceError::Form("fieldPersonId is required".to_string()))?;
    let field_person_id = UserId::new(field_person_id)?;
    ensure_self_or_admin(user, field_person_id)?;

    let counts = repo.count_meets_by_status(field_person_id, None)?;
    Ok(counts.into())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::meet_log::MeetLog;
    use crate::domain::statistics::MeetStatusCounts;
    use crate::domain::types::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{auth_user, client, timestamp, user};

    fn stored(id: i32, field_person_id: i32) -> MeetLog {
        MeetLog {
            id: MeetLogId::new(id).unwrap(),
            field_person_id: UserId::new(field_person_id).unwrap(),
            client_id: ClientId::new(1).unwrap(),
            meet_status: MeetStatus::Met,
            distance_travelled: Some(3.2),
            visited_at: timestamp(),
            notes: None,
        }
    }

    #[test]
    fn non_admin_listing_is_pinned_to_self() {
        let mut repo = MockRepository::new();
        repo.expect_list_meet_logs()
            .withf(|query| {
                query.field_person_id == UserId::new(5).ok()
                    && query.meet_status.is_none()
                    && query.client_id == ClientId::new(2).ok()
            })
            .returning(|_| Ok((0, vec![])));

        let params = MeetLogQuery {
            field_person_id: Some(9),
            client_id: Some(2),
            meet_status: Some("whenever".into()),
            ..MeetLogQuery::default()
        };
        list_meet_logs(&repo, &auth_user(5, Role::Fieldperson), params).unwrap();
    }

    #[test]
    fn admin_listing_honours_filters() {
        let mut repo = MockRepository::new();
        repo.expect_list_meet_logs()
            .withf(|query| {
                query.field_person_id == UserId::new(9).ok()
                    && query.meet_status == Some(MeetStatus::NotMet)
            })
            .returning(|_| Ok((1, vec![(stored(1, 9), client(1, 9), user(9, Role::Fieldperson))])));

        let params = MeetLogQuery {
            field_person_id: Some(9),
            meet_status: Some("notmet".into()),
            ..MeetLogQuery::default()
        };
        let page = list_meet_logs(&repo, &auth_user(1, Role::Admin), params).unwrap();
        assert_eq!(page.items[0].field_person.id, 9);
    }

    #[test]
    fn foreign_meet_log_is_hidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_meet_log_by_id()
            .returning(|_| Ok(Some((stored(4, 9), client(1, 9), user(9, Role::Fieldperson)))));

        assert!(matches!(
            get_meet_log(&repo, &auth_user(5, Role::Fieldperson), 4),
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(get_meet_log(&repo, &auth_user(9, Role::Fieldperson), 4).unwrap().id, 4);
    }

    #[test]
    fn statistics_require_field_person_id() {
        let mut repo = MockRepository::new();
        assert!(matches!(
            meet_statistics(&repo, &auth_user(1, Role::Admin), MeetStatisticsQuery::default()),
            Err(ServiceError::Form(_))
        ));

        repo.expect_count_meets_by_status().returning(|_, _| {
            Ok(MeetStatusCounts {
                met: 2,
                notmet: 1,
                meetagain: 4,
            })
        });
        let view = meet_statistics(
            &repo,
            &auth_user(1, Role::Admin),
            MeetStatisticsQuery {
                field_person_id: Some(9),
            },
        )
        .unwrap();
        assert_eq!(view.total_meets, 7);
        assert_eq!(view.meet_status_counts.meetagain, 4);
    }
}
