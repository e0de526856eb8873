use chrono::NaiveDateTime;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        call_log::{CallLog, NewCallLog},
        client::{Client, NewClient},
        lead::{Lead, NewLead},
        meet_log::{MeetLog, NewMeetLog},
        statistics::{LeadStatusCounts, MeetStatusCounts},
        types::{ClientId, MeetLogId, MeetStatus, PhoneNumber, Role, UserEmail, UserId},
        user::{NewUser, User},
    },
    repository::errors::RepositoryResult,
};

pub mod call_log;
pub mod client;
pub mod errors;
pub mod lead;
pub mod meet_log;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod statistics;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip. Saturates instead of overflowing for huge page numbers.
    pub(crate) fn offset(&self) -> i64 {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub(crate) fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub assigned_to: Option<UserId>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default)]
pub struct LeadListQuery {
    pub user_id: Option<UserId>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone)]
pub struct CallLogListQuery {
    pub user_id: UserId,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default)]
pub struct MeetLogListQuery {
    pub field_person_id: Option<UserId>,
    pub client_id: Option<ClientId>,
    pub meet_status: Option<MeetStatus>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl CallLogListQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl MeetLogListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_person_id(mut self, user_id: UserId) -> Self {
        self.field_person_id = Some(user_id);
        self
    }

    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn meet_status(mut self, status: MeetStatus) -> Self {
        self.meet_status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    fn list_users_by_role(&self, role: Role) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_password_hash(&self, id: UserId, password_hash: &str) -> RepositoryResult<()>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
}

pub trait LeadReader {
    /// Leads paired with their client, newest first.
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<(Lead, Client)>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
}

pub trait CallLogReader {
    /// Call logs paired with their client, latest call first.
    fn list_call_logs(
        &self,
        query: CallLogListQuery,
    ) -> RepositoryResult<(usize, Vec<(CallLog, Client)>)>;
}

pub trait CallLogWriter {
    fn create_call_log(&self, new_call_log: &NewCallLog) -> RepositoryResult<CallLog>;
}

pub trait MeetLogReader {
    /// Meet logs paired with their client and field person, latest visit first.
    fn list_meet_logs(
        &self,
        query: MeetLogListQuery,
    ) -> RepositoryResult<(usize, Vec<(MeetLog, Client, User)>)>;
    fn get_meet_log_by_id(&self, id: MeetLogId)
    -> RepositoryResult<Option<(MeetLog, Client, User)>>;
}

pub trait MeetLogWriter {
    fn create_meet_log(&self, new_meet_log: &NewMeetLog) -> RepositoryResult<MeetLog>;
}

/// Aggregate counters. `since` restricts each count to records at or after it.
pub trait StatisticsReader {
    fn count_call_logs(&self, user_id: UserId, since: Option<NaiveDateTime>)
    -> RepositoryResult<usize>;
    fn count_leads_by_status(
        &self,
        user_id: UserId,
        since: Option<NaiveDateTime>,
    ) -> RepositoryResult<LeadStatusCounts>;
    fn count_meets_by_status(
        &self,
        field_person_id: UserId,
        since: Option<NaiveDateTime>,
    ) -> RepositoryResult<MeetStatusCounts>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
        let first = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 100,
        };
        assert_eq!(pagination.offset(), i64::MAX);
    }
}
