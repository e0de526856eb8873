//! Client listing, creation and bulk assignment.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::client::NewClient;
use crate::domain::types::{AssigneeRole, Role, UserId};
use crate::dto::clients::{AssignmentReport, ClientView, FailedClient};
use crate::forms::assign::{AssignClientsPayload, ParsedClients};
use crate::forms::clients::{CreateClientForm, CreateClientPayload};
use crate::pagination::{PageParams, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_role, ensure_self_or_admin};

const DUPLICATE_PHONE: &str = "Client with this phone number already exists";

/// Lists the clients assigned to `user_id`.
pub fn list_assigned_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    params: PageParams,
) -> ServiceResult<Paginated<ClientView>>
where
    R: ClientReader + ?Sized,
{
    let user_id = UserId::new(user_id)?;
    ensure_self_or_admin(user, user_id)?;

    let page = params.resolve();
    let mut query = ClientListQuery::new().assigned_to(user_id);
    if let Some(page) = page {
        query = query.paginate(page.page, page.limit);
    }

    let (total, clients) = repo.list_clients(query)?;
    Ok(Paginated::new(clients, total, page).map(ClientView::from))
}

/// Creates a single client assigned to a salesperson or fieldperson.
pub fn create_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateClientForm,
) -> ServiceResult<ClientView>
where
    R: ClientReader + ClientWriter + UserReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let payload = CreateClientPayload::try_from(form)?;

    repo.get_user_by_id(payload.assignee_id)?
        .ok_or(ServiceError::NotFound("Assignee"))?;

    if repo.get_client_by_phone(&payload.client.phone)?.is_some() {
        return Err(ServiceError::Conflict(DUPLICATE_PHONE.to_string()));
    }

    let client = repo.create_client(&payload.client).map_err(|err| match err {
        RepositoryError::Duplicate(_) => ServiceError::Conflict(DUPLICATE_PHONE.to_string()),
        err => {
            log::error!("Failed to create client: {err}");
            ServiceError::from(err)
        }
    })?;

    Ok(client.into())
}

/// Admin entry point for bulk assignment, from either JSON or a CSV upload.
pub fn assign_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: AssignClientsPayload,
) -> ServiceResult<AssignmentReport>
where
    R: ClientReader + ClientWriter + UserReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;

    let assignee = repo
        .get_user_by_id(payload.assignee_id)?
        .ok_or(ServiceError::NotFound("Assignee"))?;

    let role = match payload.assigned_role {
        Some(role) => role,
        None => AssigneeRole::try_from(assignee.role)?,
    };

    Ok(import_clients(repo, assignee.id, role, payload.clients))
}

/// Creates every parsed row independently and reports per-row failures.
///
/// A failing row never aborts the remaining ones.
pub fn import_clients<R>(
    repo: &R,
    assignee_id: UserId,
    role: AssigneeRole,
    parsed: ParsedClients,
) -> AssignmentReport
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let mut report = AssignmentReport {
        duplicates: parsed.duplicates,
        invalid: parsed.invalid,
        ..AssignmentReport::default()
    };

    for row in parsed.rows {
        let new_client =
            NewClient::new(row.name, row.phone, Some(row.location)).assign(assignee_id, role);

        let result = match repo.get_client_by_phone(&new_client.phone) {
            Ok(Some(_)) => Err(DUPLICATE_PHONE.to_string()),
            Ok(None) => repo.create_client(&new_client).map_err(|err| match err {
                RepositoryError::Duplicate(_) => DUPLICATE_PHONE.to_string(),
                err => err.to_string(),
            }),
            Err(err) => Err(err.to_string()),
        };

        match result {
            Ok(client) => {
                report.assigned += 1;
                report.clients.push(client.into());
            }
            Err(reason) => {
                log::warn!("Failed to import client {}: {reason}", new_client.phone);
                report.failed.push(FailedClient {
                    name: new_client.name.into_inner(),
                    phone: new_client.phone.into_inner(),
                    reason,
                });
            }
        }
    }

    log::info!(
        "Assigned {} clients to user {assignee_id} ({} failed, {} duplicates, {} invalid)",
        report.assigned,
        report.failed.len(),
        report.duplicates,
        report.invalid
    );

    report
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::forms::assign::{RawClientRow, collect_client_rows};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{auth_user, client, timestamp, user};

    fn created(new_client: &NewClient, id: i32) -> Client {
        Client {
            id: crate::domain::types::ClientId::new(id).unwrap(),
            name: new_client.name.clone(),
            phone: new_client.phone.clone(),
            location: new_client.location.clone(),
            assigned_to: new_client.assigned_to,
            assigned_role: new_client.assigned_role,
            created_at: timestamp(),
        }
    }

    fn row(name: &str, phone: &str) -> RawClientRow {
        RawClientRow {
            name: Some(name.into()),
            phone: Some(phone.into()),
            location: None,
        }
    }

    #[test]
    fn list_is_limited_to_self_unless_admin() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .withf(|query| query.assigned_to.map(UserId::get) == Some(3))
            .returning(|_| Ok((1, vec![client(1, 3)])));

        let page = list_assigned_clients(
            &repo,
            &auth_user(3, Role::Salesperson),
            3,
            PageParams::default(),
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].assigned_to, Some(3));

        assert!(matches!(
            list_assigned_clients(&repo, &auth_user(4, Role::Salesperson), 3, PageParams::default()),
            Err(ServiceError::Unauthorized)
        ));
        assert!(list_assigned_clients(&repo, &auth_user(1, Role::Admin), 3, PageParams::default()).is_ok());
    }

    #[test]
    fn create_client_requires_admin_and_existing_assignee() {
        let repo = MockRepository::new();
        let form = CreateClientForm {
            name: Some("Ana".into()),
            phone: Some("5551234".into()),
            salesperson_id: Some(2),
            ..CreateClientForm::default()
        };
        assert!(matches!(
            create_client(&repo, &auth_user(2, Role::Salesperson), form),
            Err(ServiceError::Unauthorized)
        ));

        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));
        let form = CreateClientForm {
            name: Some("Ana".into()),
            phone: Some("5551234".into()),
            salesperson_id: Some(2),
            ..CreateClientForm::default()
        };
        assert!(matches!(
            create_client(&repo, &auth_user(1, Role::Admin), form),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn create_client_rejects_existing_phone() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Ok(Some(user(2, Role::Salesperson))));
        repo.expect_get_client_by_phone()
            .returning(|_| Ok(Some(client(9, 2))));
        repo.expect_create_client().never();

        let form = CreateClientForm {
            name: Some("Ana".into()),
            phone: Some("5551234".into()),
            salesperson_id: Some(2),
            ..CreateClientForm::default()
        };
        assert!(matches!(
            create_client(&repo, &auth_user(1, Role::Admin), form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn import_reports_failures_without_aborting() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_phone().returning(|phone| {
            if phone.as_str() == "5550002" {
                Ok(Some(client(50, 9)))
            } else {
                Ok(None)
            }
        });
        repo.expect_create_client().returning(|new_client| {
            if new_client.phone.as_str() == "5550003" {
                Err(RepositoryError::DatabaseError("disk I/O error".into()))
            } else {
                Ok(created(new_client, 1))
            }
        });

        let parsed = collect_client_rows(vec![
            row("One", "555-0001"),
            row("Two", "555-0002"),
            row("Three", "555-0003"),
            row("One Again", "5550001"),
            row("", "5550004"),
            row("Four", "555 0004"),
        ]);
        let report = import_clients(
            &repo,
            UserId::new(3).unwrap(),
            AssigneeRole::Fieldperson,
            parsed,
        );

        assert_eq!(report.assigned, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].phone, "5550002");
        assert_eq!(report.failed[0].reason, DUPLICATE_PHONE);
        assert!(report.failed[1].reason.contains("disk I/O error"));
        assert!(
            report
                .clients
                .iter()
                .all(|c| c.assigned_role == Some(AssigneeRole::Fieldperson))
        );
    }

    #[test]
    fn assign_defaults_role_to_assignee_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Ok(Some(user(5, Role::Fieldperson))));
        repo.expect_get_client_by_phone().returning(|_| Ok(None));
        repo.expect_create_client()
            .withf(|new_client| new_client.assigned_role == Some(AssigneeRole::Fieldperson))
            .returning(|new_client| Ok(created(new_client, 1)));

        let payload = AssignClientsPayload {
            assignee_id: UserId::new(5).unwrap(),
            assigned_role: None,
            clients: collect_client_rows(vec![row("Gita", "5559999")]),
        };
        let report = assign_clients(&repo, &auth_user(1, Role::Admin), payload).unwrap();
        assert_eq!(report.assigned, 1);
    }

    #[test]
    fn admin_cannot_be_assignee_without_explicit_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Ok(Some(user(1, Role::Admin))));

        let payload = AssignClientsPayload {
            assignee_id: UserId::new(1).unwrap(),
            assigned_role: None,
            clients: collect_client_rows(vec![row("Gita", "5559999")]),
        };
        assert!(matches!(
            assign_clients(&repo, &auth_user(1, Role::Admin), payload),
            Err(ServiceError::TypeConstraint(_))
        ));
    }
}
