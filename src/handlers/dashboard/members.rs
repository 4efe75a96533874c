use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::member::{
    IdType, SubscriptionStatus, SubscriptionType, ID_TYPES, SUBSCRIPTION_STATUSES,
    SUBSCRIPTION_TYPES,
};
use crate::models::{Member, MemberForm};
use crate::repositories::MemberRepository;

#[derive(Clone)]
pub struct MembersState {
    pub member_repo: MemberRepository,
}

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/members/list.html")]
struct MembersListTemplate {
    user: AuthUser,
    members: Vec<Member>,
    statuses: &'static [SubscriptionStatus],
    q: String,
    status: String,
}

#[derive(Template)]
#[template(path = "dashboard/members/new.html")]
struct NewMemberTemplate {
    user: AuthUser,
    id_types: &'static [IdType],
    statuses: &'static [SubscriptionStatus],
    types: &'static [SubscriptionType],
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/members/edit.html")]
struct EditMemberTemplate {
    user: AuthUser,
    member: Member,
    id_types: &'static [IdType],
    statuses: &'static [SubscriptionStatus],
    types: &'static [SubscriptionType],
    error: Option<String>,
}

fn validate(form: &MemberForm) -> Option<&'static str> {
    if form.full_name.trim().is_empty() {
        return Some("Full name is required");
    }
    if form.email.trim().is_empty() {
        return Some("Email is required");
    }
    if form.id_number.trim().is_empty() {
        return Some("ID number is required");
    }
    if form.amount_to_pay_cents < 0 {
        return Some("Amount cannot be negative");
    }
    None
}

pub async fn list(
    State(state): State<MembersState>,
    auth_user: AuthUser,
    Query(query): Query<MembersQuery>,
) -> Result<Response> {
    let q = query.q.unwrap_or_default();
    let status = query.status.unwrap_or_else(|| "all".to_string());
    let status_filter = match status.as_str() {
        "all" | "" => None,
        s => Some(SubscriptionStatus::parse(s)),
    };

    let members = state.member_repo.search(&q, status_filter).await?;

    let template = MembersListTemplate {
        user: auth_user,
        members,
        statuses: SUBSCRIPTION_STATUSES,
        q,
        status,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn new_page(auth_user: AuthUser) -> Result<Response> {
    let template = NewMemberTemplate {
        user: auth_user,
        id_types: ID_TYPES,
        statuses: SUBSCRIPTION_STATUSES,
        types: SUBSCRIPTION_TYPES,
        error: None,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn create(
    State(state): State<MembersState>,
    auth_user: AuthUser,
    Form(form): Form<MemberForm>,
) -> Result<Response> {
    if let Some(error) = validate(&form) {
        let template = NewMemberTemplate {
            user: auth_user,
            id_types: ID_TYPES,
            statuses: SUBSCRIPTION_STATUSES,
            types: SUBSCRIPTION_TYPES,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    // The member is owned by whoever registered them
    state.member_repo.create(&form, &auth_user.id).await?;

    Ok(Redirect::to("/dashboard/members").into_response())
}

pub async fn edit_page(
    State(state): State<MembersState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let member = state
        .member_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    let template = EditMemberTemplate {
        user: auth_user,
        member,
        id_types: ID_TYPES,
        statuses: SUBSCRIPTION_STATUSES,
        types: SUBSCRIPTION_TYPES,
        error: None,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn update(
    State(state): State<MembersState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<MemberForm>,
) -> Result<Response> {
    let member = state
        .member_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    if let Some(error) = validate(&form) {
        let template = EditMemberTemplate {
            user: auth_user,
            member,
            id_types: ID_TYPES,
            statuses: SUBSCRIPTION_STATUSES,
            types: SUBSCRIPTION_TYPES,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    state.member_repo.update(&id, &form).await?;

    Ok(Redirect::to("/dashboard/members").into_response())
}

pub async fn delete(
    State(state): State<MembersState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.member_repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Member not found".to_string()));
    }

    Ok(Redirect::to("/dashboard/members").into_response())
}
