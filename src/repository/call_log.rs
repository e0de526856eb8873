use std::collections::{HashMap, HashSet};

use diesel::prelude::*;

use crate::{
    domain::{
        call_log::{CallLog, NewCallLog},
        client::Client,
    },
    models::{
        call_log::{CallLog as DbCallLog, NewCallLog as DbNewCallLog},
        client::Client as DbClient,
    },
    repository::{
        CallLogListQuery, CallLogReader, CallLogWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CallLogReader for DieselRepository {
    fn list_call_logs(
        &self,
        query: CallLogListQuery,
    ) -> RepositoryResult<(usize, Vec<(CallLog, Client)>)> {
        use crate::schema::{call_logs, clients};

        let mut conn = self.conn()?;

        let total = call_logs::table
            .filter(call_logs::user_id.eq(query.user_id.get()))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = call_logs::table
            .filter(call_logs::user_id.eq(query.user_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_logs = items
            .order((call_logs::called_time.desc(), call_logs::id.desc()))
            .load::<DbCallLog>(&mut conn)?;

        let client_ids: HashSet<i32> = db_logs.iter().map(|log| log.client_id).collect();
        let client_map: HashMap<i32, DbClient> = clients::table
            .filter(clients::id.eq_any(client_ids))
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|client| (client.id, client))
            .collect();

        let combined = db_logs
            .into_iter()
            .filter_map(|log| {
                client_map
                    .get(&log.client_id)
                    .cloned()
                    .map(|client| (log, client))
            })
            .map(|(log, client)| {
                Ok((
                    CallLog::try_from(log).map_err(RepositoryError::from)?,
                    Client::try_from(client).map_err(RepositoryError::from)?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, combined))
    }
}

impl CallLogWriter for DieselRepository {
    fn create_call_log(&self, new_call_log: &NewCallLog) -> RepositoryResult<CallLog> {
        use crate::schema::call_logs;

        let mut conn = self.conn()?;
        let db_new_log = DbNewCallLog::from(new_call_log);

        let db_log = diesel::insert_into(call_logs::table)
            .values(&db_new_log)
            .get_result::<DbCallLog>(&mut conn)?;

        Ok(CallLog::try_from(db_log)?)
    }
}
