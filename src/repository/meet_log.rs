use diesel::prelude::*;

use crate::{
    domain::{
        client::Client,
        meet_log::{MeetLog, NewMeetLog},
        types::MeetLogId,
        user::User,
    },
    models::{
        client::Client as DbClient,
        meet_log::{MeetLog as DbMeetLog, NewMeetLog as DbNewMeetLog},
        user::User as DbUser,
    },
    repository::{
        DieselRepository, MeetLogListQuery, MeetLogReader, MeetLogWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn into_domain(
    (log, client, user): (DbMeetLog, DbClient, DbUser),
) -> RepositoryResult<(MeetLog, Client, User)> {
    Ok((
        MeetLog::try_from(log).map_err(RepositoryError::from)?,
        Client::try_from(client).map_err(RepositoryError::from)?,
        User::try_from(user).map_err(RepositoryError::from)?,
    ))
}

impl MeetLogReader for DieselRepository {
    fn list_meet_logs(
        &self,
        query: MeetLogListQuery,
    ) -> RepositoryResult<(usize, Vec<(MeetLog, Client, User)>)> {
        use crate::schema::{clients, meet_logs, users};

        let mut conn = self.conn()?;

        let mut count_query = meet_logs::table.into_boxed::<diesel::sqlite::Sqlite>();
        let mut items = meet_logs::table
            .inner_join(clients::table)
            .inner_join(users::table.on(users::id.eq(meet_logs::field_person_id)))
            .select((
                DbMeetLog::as_select(),
                DbClient::as_select(),
                DbUser::as_select(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(field_person_id) = query.field_person_id {
            count_query = count_query.filter(meet_logs::field_person_id.eq(field_person_id.get()));
            items = items.filter(meet_logs::field_person_id.eq(field_person_id.get()));
        }
        if let Some(client_id) = query.client_id {
            count_query = count_query.filter(meet_logs::client_id.eq(client_id.get()));
            items = items.filter(meet_logs::client_id.eq(client_id.get()));
        }
        if let Some(status) = query.meet_status {
            count_query = count_query.filter(meet_logs::meet_status.eq(status.as_str()));
            items = items.filter(meet_logs::meet_status.eq(status.as_str()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .order((meet_logs::visited_at.desc(), meet_logs::id.desc()))
            .load::<(DbMeetLog, DbClient, DbUser)>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, rows))
    }

    fn get_meet_log_by_id(
        &self,
        id: MeetLogId,
    ) -> RepositoryResult<Option<(MeetLog, Client, User)>> {
        use crate::schema::{clients, meet_logs, users};

        let mut conn = self.conn()?;
        let row = meet_logs::table
            .inner_join(clients::table)
            .inner_join(users::table.on(users::id.eq(meet_logs::field_person_id)))
            .filter(meet_logs::id.eq(id.get()))
            .select((
                DbMeetLog::as_select(),
                DbClient::as_select(),
                DbUser::as_select(),
            ))
            .first::<(DbMeetLog, DbClient, DbUser)>(&mut conn)
            .optional()?;

        row.map(into_domain).transpose()
    }
}

impl MeetLogWriter for DieselRepository {
    fn create_meet_log(&self, new_meet_log: &NewMeetLog) -> RepositoryResult<MeetLog> {
        use crate::schema::meet_logs;

        let mut conn = self.conn()?;
        let db_new_log = DbNewMeetLog::from(new_meet_log);

        let db_log = diesel::insert_into(meet_logs::table)
            .values(&db_new_log)
            .get_result::<DbMeetLog>(&mut conn)?;

        Ok(MeetLog::try_from(db_log)?)
    }
}
