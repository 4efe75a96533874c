use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;

use crate::error::{AppError, Result};
use crate::middleware::auth::OptionalAuthUser;
use crate::models::{CreateUser, LoginCredentials, UserRole};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session;

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

// Templates
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/setup.html")]
struct SetupTemplate {
    error: Option<String>,
}

// Handlers
pub async fn login_page(
    State(state): State<AuthState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
) -> Result<Response> {
    // Already logged in staff go straight to the back office
    if auth_user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    // First run: no staff accounts yet
    let user_count = state.user_repo.count().await?;
    if user_count == 0 {
        return Ok(Redirect::to("/auth/setup").into_response());
    }

    let template = LoginTemplate { error: None };
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn login_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(&credentials.email, &credentials.password)
        .await?;

    match user {
        Some(user) => {
            let token = state.session_repo.create(&user.id).await?;
            let jar = jar.add(session::create_session_cookie(&token));
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        None => {
            let template = LoginTemplate {
                error: Some("Invalid email or password".to_string()),
            };
            Ok(Html(
                template
                    .render()
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            )
            .into_response())
        }
    }
}

pub async fn setup_page(State(state): State<AuthState>) -> Result<Response> {
    // Only allow setup while no staff accounts exist
    let user_count = state.user_repo.count().await?;
    if user_count > 0 {
        return Ok(Redirect::to("/auth/login").into_response());
    }

    let template = SetupTemplate { error: None };
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn setup_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<CreateUser>,
) -> Result<Response> {
    // Only allow setup while no staff accounts exist
    let user_count = state.user_repo.count().await?;
    if user_count > 0 {
        return Ok(Redirect::to("/auth/login").into_response());
    }

    if let Some(error) = validate_new_user(&form) {
        let template = SetupTemplate {
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    // The first account is always the administrator
    let user = state
        .user_repo
        .create(
            form.full_name.trim(),
            form.email.trim(),
            &form.password,
            UserRole::Admin,
        )
        .await?;

    // Auto login
    let token = state.session_repo.create(&user.id).await?;
    let jar = jar.add(session::create_session_cookie(&token));

    Ok((jar, Redirect::to("/dashboard")).into_response())
}

pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> Result<Response> {
    if let Some(token) = session::get_session_token(&jar) {
        state.session_repo.delete(&token).await?;
    }
    let jar = jar.add(session::remove_session_cookie());
    Ok((jar, Redirect::to("/auth/login")).into_response())
}

pub fn validate_new_user(form: &CreateUser) -> Option<&'static str> {
    if form.full_name.trim().is_empty() {
        return Some("Full name is required");
    }
    if form.email.trim().is_empty() || !form.email.contains('@') {
        return Some("A valid email is required");
    }
    if form.password.len() < 6 {
        return Some("Password must be at least 6 characters");
    }
    None
}
