use diesel::prelude::*;

use crate::{
    domain::{
        client::{Client, NewClient},
        types::{ClientId, PhoneNumber},
    },
    models::client::{Client as DbClient, NewClient as DbNewClient},
    repository::{
        ClientListQuery, ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        db_client
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_client_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_client = clients::table
            .filter(clients::phone.eq(phone.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        db_client
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = clients::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(user_id) = query.assigned_to {
                items = items.filter(clients::assigned_to.eq(user_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let clients = items
            .order(clients::id.asc())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_new_client = DbNewClient::from(new_client);

        let db_client = diesel::insert_into(clients::table)
            .values(&db_new_client)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(db_client)?)
    }
}
