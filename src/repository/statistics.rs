//! Aggregate counters backing the dashboard statistics.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::{
    domain::{
        statistics::{LeadStatusCounts, MeetStatusCounts},
        types::{LoanStatus, MeetStatus, UserId},
    },
    repository::{DieselRepository, StatisticsReader, errors::RepositoryResult},
};

impl StatisticsReader for DieselRepository {
    fn count_call_logs(
        &self,
        user_id: UserId,
        since: Option<NaiveDateTime>,
    ) -> RepositoryResult<usize> {
        use crate::schema::call_logs;

        let mut conn = self.conn()?;
        let mut query = call_logs::table
            .filter(call_logs::user_id.eq(user_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(since) = since {
            query = query.filter(call_logs::called_time.ge(since));
        }

        let total = query.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }

    fn count_leads_by_status(
        &self,
        user_id: UserId,
        since: Option<NaiveDateTime>,
    ) -> RepositoryResult<LeadStatusCounts> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let mut counts = LeadStatusCounts::default();

        for status in LoanStatus::ALL {
            let mut query = leads::table
                .filter(leads::user_id.eq(user_id.get()))
                .filter(leads::loan_status.eq(status.as_str()))
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(since) = since {
                query = query.filter(leads::created_at.ge(since));
            }
            let count = query.count().get_result::<i64>(&mut conn)?;
            counts.set(*status, count as usize);
        }

        Ok(counts)
    }

    fn count_meets_by_status(
        &self,
        field_person_id: UserId,
        since: Option<NaiveDateTime>,
    ) -> RepositoryResult<MeetStatusCounts> {
        use crate::schema::meet_logs;

        let mut conn = self.conn()?;
        let mut counts = MeetStatusCounts::default();

        for status in MeetStatus::ALL {
            let mut query = meet_logs::table
                .filter(meet_logs::field_person_id.eq(field_person_id.get()))
                .filter(meet_logs::meet_status.eq(status.as_str()))
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(since) = since {
                query = query.filter(meet_logs::visited_at.ge(since));
            }
            let count = query.count().get_result::<i64>(&mut conn)?;
            counts.set(*status, count as usize);
        }

        Ok(counts)
    }
}
