use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::models::UserRole;
use crate::repositories::SessionRepository;
use crate::session;

/// The staff user resolved from the session cookie. Available to any
/// handler as an extractor; requires the router to carry the session
/// repository as an `Extension`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub full_name: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    async fn from_parts(parts: &mut Parts) -> Option<Self> {
        let session_repo = parts.extensions.get::<SessionRepository>()?.clone();
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session::get_session_token(&jar)?;
        let user = session_repo.find_user(&token).await.ok()??;
        Some(Self {
            id: user.id,
            full_name: user.full_name,
            role: user.role,
        })
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_parts(parts).await.ok_or(AuthRedirect)
    }
}

pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/auth/login").into_response()
    }
}

// Optional auth - doesn't redirect, just returns None if not logged in
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(AuthUser::from_parts(parts).await))
    }
}

/// Admin-gated extractor: logged-out users get the login redirect,
/// non-admin staff get 403.
pub struct AdminUser(pub AuthUser);

impl std::ops::Deref for AdminUser {
    type Target = AuthUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_parts(parts)
            .await
            .ok_or_else(|| AuthRedirect.into_response())?;

        if !user.is_admin() {
            return Err(
                AppError::Forbidden("Administrator access required".to_string()).into_response(),
            );
        }

        Ok(AdminUser(user))
    }
}
