use crate::domain::auth::AuthenticatedUser;
use crate::domain::lead::NewLead;
use crate::domain::types::{Role, UserId};
use crate::dto::leads::LeadView;
use crate::forms::leads::CreateLeadForm;
use crate::pagination::{PageParams, Paginated};
use crate::repository::{ClientReader, LeadListQuery, LeadReader, LeadWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_role, ensure_self_or_admin};

fn list<R>(repo: &R, mut query: LeadListQuery, params: PageParams) -> ServiceResult<Paginated<LeadView>>
where
    R: LeadReader + ?Sized,
{
    let page = params.resolve();
    if let Some(page) = page {
        query = query.paginate(page.page, page.limit);
    }
    let (total, leads) = repo.list_leads(query)?;
    Ok(Paginated::new(leads, total, page).map(LeadView::from))
}

/// Every lead in the system. Admin only.
pub fn list_all_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: PageParams,
) -> ServiceResult<Paginated<LeadView>>
where
    R: LeadReader + ?Sized,
{
    ensure_role(user, Role::Admin)?;
    list(repo, LeadListQuery::new(), params)
}

pub fn list_user_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    params: PageParams,
) -> ServiceResult<Paginated<LeadView>>
where
    R: LeadReader + ?Sized,
{
    let user_id = UserId::new(user_id)?;
    ensure_self_or_admin(user, user_id)?;
    list(repo, LeadListQuery::new().user_id(user_id), params)
}

pub fn create_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateLeadForm,
) -> ServiceResult<LeadView>
where
    R: LeadWriter + ClientReader + UserReader + ?Sized,
{
    let new_lead = NewLead::try_from(form)?;
    ensure_self_or_admin(user, new_lead.user_id)?;

    let client = repo
        .get_client_by_id(new_lead.client_id)?
        .ok_or(ServiceError::NotFound("Client"))?;
    repo.get_user_by_id(new_lead.user_id)?
        .ok_or(ServiceError::NotFound("User"))?;

    let lead = repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to create lead: {err}");
        ServiceError::from(err)
    })?;

    Ok(LeadView::from((lead, client)))
}
