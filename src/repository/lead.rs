use std::collections::{HashMap, HashSet};

use diesel::prelude::*;

use crate::{
    domain::{
        client::Client,
        lead::{Lead, NewLead},
    },
    models::{
        client::Client as DbClient,
        lead::{Lead as DbLead, NewLead as DbNewLead},
    },
    repository::{
        DieselRepository, LeadListQuery, LeadReader, LeadWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl LeadReader for DieselRepository {
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<(Lead, Client)>)> {
        use crate::schema::{clients, leads};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = leads::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(user_id) = query.user_id {
                items = items.filter(leads::user_id.eq(user_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_leads = items
            .order((leads::created_at.desc(), leads::id.desc()))
            .load::<DbLead>(&mut conn)?;

        let client_ids: HashSet<i32> = db_leads.iter().map(|lead| lead.client_id).collect();
        let client_map: HashMap<i32, DbClient> = clients::table
            .filter(clients::id.eq_any(client_ids))
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|client| (client.id, client))
            .collect();

        let combined = db_leads
            .into_iter()
            .filter_map(|lead| {
                client_map
                    .get(&lead.client_id)
                    .cloned()
                    .map(|client| (lead, client))
            })
            .map(|(lead, client)| {
                Ok((
                    Lead::try_from(lead).map_err(RepositoryError::from)?,
                    Client::try_from(client).map_err(RepositoryError::from)?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, combined))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_new_lead = DbNewLead::from(new_lead);

        let db_lead = diesel::insert_into(leads::table)
            .values(&db_new_lead)
            .get_result::<DbLead>(&mut conn)?;

        Ok(Lead::try_from(db_lead)?)
    }
}
