use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::statistics::{Timespan, UserStatistics};
use crate::domain::types::UserId;
use crate::dto::statistics::{StatisticsQuery, StatisticsView};
use crate::repository::StatisticsReader;
use crate::services::{ServiceResult, ensure_self_or_admin};

/// Calls, leads and visits of `user_id` within the requested timespan.
pub fn user_statistics<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    params: StatisticsQuery,
) -> ServiceResult<StatisticsView>
where
    R: StatisticsReader + ?Sized,
{
    let user_id = UserId::new(user_id)?;
    ensure_self_or_admin(user, user_id)?;

    let timespan = match params.timespan.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<Timespan>()?,
        _ => Timespan::default(),
    };
    let since = timespan.since(Utc::now().naive_utc());

    let stats = UserStatistics {
        timespan,
        total_calls: repo.count_call_logs(user_id, since)?,
        leads: repo.count_leads_by_status(user_id, since)?,
        meets: repo.count_meets_by_status(user_id, since)?,
    };

    Ok(stats.into())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::statistics::{LeadStatusCounts, MeetStatusCounts};
    use crate::domain::types::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::auth_user;

    #[test]
    fn aggregates_counts_for_timespan() {
        let mut repo = MockRepository::new();
        repo.expect_count_call_logs()
            .withf(|_, since| since.is_some())
            .returning(|_, _| Ok(12));
        repo.expect_count_leads_by_status().returning(|_, _| {
            Ok(LeadStatusCounts {
                hot: 3,
                warm: 2,
                cold: 1,
            })
        });
        repo.expect_count_meets_by_status().returning(|_, _| {
            Ok(MeetStatusCounts {
                met: 1,
                notmet: 0,
                meetagain: 2,
            })
        });

        let view = user_statistics(
            &repo,
            &auth_user(4, Role::Salesperson),
            4,
            StatisticsQuery {
                timespan: Some("this_week".into()),
            },
        )
        .unwrap();

        assert_eq!(view.total_calls, 12);
        assert_eq!(view.hot_leads, 3);
        assert_eq!(view.total_meets, 3);
        assert_eq!(view.timespan, Timespan::ThisWeek);
    }

    #[test]
    fn all_time_has_no_lower_bound() {
        let mut repo = MockRepository::new();
        repo.expect_count_call_logs()
            .withf(|_, since| since.is_none())
            .returning(|_, _| Ok(0));
        repo.expect_count_leads_by_status()
            .returning(|_, _| Ok(LeadStatusCounts::default()));
        repo.expect_count_meets_by_status()
            .returning(|_, _| Ok(MeetStatusCounts::default()));

        let view = user_statistics(
            &repo,
            &auth_user(1, Role::Admin),
            4,
            StatisticsQuery::default(),
        )
        .unwrap();
        assert_eq!(view.timespan, Timespan::AllTime);
    }

    #[test]
    fn unknown_timespan_is_rejected() {
        let repo = MockRepository::new();
        assert!(matches!(
            user_statistics(
                &repo,
                &auth_user(4, Role::Salesperson),
                4,
                StatisticsQuery {
                    timespan: Some("decade".into())
                }
            ),
            Err(ServiceError::TypeConstraint(_))
        ));
    }
}
