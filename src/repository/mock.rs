//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::call_log::{CallLog, NewCallLog};
use crate::domain::client::{Client, NewClient};
use crate::domain::lead::{Lead, NewLead};
use crate::domain::meet_log::{MeetLog, NewMeetLog};
use crate::domain::statistics::{LeadStatusCounts, MeetStatusCounts};
use crate::domain::types::{ClientId, MeetLogId, PhoneNumber, Role, UserEmail, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CallLogListQuery, CallLogReader, CallLogWriter, ClientListQuery, ClientReader, ClientWriter,
    LeadListQuery, LeadReader, LeadWriter, MeetLogListQuery, MeetLogReader, MeetLogWriter,
    StatisticsReader, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn list_users_by_role(&self, role: Role) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_password_hash(&self, id: UserId, password_hash: &str) -> RepositoryResult<()>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    }

    impl LeadReader for Repository {
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<(Lead, Client)>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    }

    impl CallLogReader for Repository {
        fn list_call_logs(
            &self,
            query: CallLogListQuery,
        ) -> RepositoryResult<(usize, Vec<(CallLog, Client)>)>;
    }

    impl CallLogWriter for Repository {
        fn create_call_log(&self, new_call_log: &NewCallLog) -> RepositoryResult<CallLog>;
    }

    impl MeetLogReader for Repository {
        fn list_meet_logs(
            &self,
            query: MeetLogListQuery,
        ) -> RepositoryResult<(usize, Vec<(MeetLog, Client, User)>)>;
        fn get_meet_log_by_id(
            &self,
            id: MeetLogId,
        ) -> RepositoryResult<Option<(MeetLog, Client, User)>>;
    }

    impl MeetLogWriter for Repository {
        fn create_meet_log(&self, new_meet_log: &NewMeetLog) -> RepositoryResult<MeetLog>;
    }

    impl StatisticsReader for Repository {
        fn count_call_logs(
            &self,
            user_id: UserId,
            since: Option<NaiveDateTime>,
        ) -> RepositoryResult<usize>;
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
}
