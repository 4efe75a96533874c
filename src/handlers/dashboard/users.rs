use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::{AppError, Result};
use crate::handlers::auth::validate_new_user;
use crate::middleware::{AdminUser, AuthUser};
use crate::models::{CreateUser, User, UserRole};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

#[derive(Template)]
#[template(path = "dashboard/users/list.html")]
struct UsersListTemplate {
    user: AuthUser,
    users: Vec<User>,
    is_admin: bool,
}

#[derive(Template)]
#[template(path = "dashboard/users/new.html")]
struct NewUserTemplate {
    user: AuthUser,
    error: Option<String>,
}

pub async fn list(State(state): State<UsersState>, auth_user: AuthUser) -> Result<Response> {
    let users = state.user_repo.find_all().await?;
    let is_admin = auth_user.is_admin();

    let template = UsersListTemplate {
        user: auth_user,
        users,
        is_admin,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn new_page(admin_user: AdminUser) -> Result<Response> {
    let template = NewUserTemplate {
        user: admin_user.0,
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
    State(state): State<UsersState>,
    admin_user: AdminUser,
    Form(form): Form<CreateUser>,
) -> Result<Response> {
    if let Some(error) = validate_new_user(&form) {
        let template = NewUserTemplate {
            user: admin_user.0,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    if state
        .user_repo
        .find_by_email(form.email.trim())
        .await?
        .is_some()
    {
        let template = NewUserTemplate {
            user: admin_user.0,
            error: Some("An account with that email already exists".to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    let role = form.role.unwrap_or(UserRole::Reception);
    state
        .user_repo
        .create(form.full_name.trim(), form.email.trim(), &form.password, role)
        .await?;

    Ok(Redirect::to("/dashboard/users").into_response())
}

pub async fn delete(
    State(state): State<UsersState>,
    admin_user: AdminUser,
    Path(user_id): Path<String>,
) -> Result<Response> {
    // Prevent self-delete
    if admin_user.id == user_id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    state.user_repo.delete(&user_id).await?;

    Ok(Redirect::to("/dashboard/users").into_response())
}

pub async fn promote(
    State(state): State<UsersState>,
    _admin_user: AdminUser,
    Path(user_id): Path<String>,
) -> Result<Response> {
    state.user_repo.update_role(&user_id, UserRole::Admin).await?;

    Ok(Redirect::to("/dashboard/users").into_response())
}
