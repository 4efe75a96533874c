use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ComposeMessage, Member, Message};
use crate::repositories::{MemberRepository, MessageRepository};

#[derive(Clone)]
pub struct MessagesAdminState {
    pub message_repo: MessageRepository,
    pub member_repo: MemberRepository,
}

#[derive(Template)]
#[template(path = "dashboard/messages/list.html")]
struct MessagesListTemplate {
    user: AuthUser,
    messages: Vec<Message>,
    unread_count: i64,
}

#[derive(Template)]
#[template(path = "dashboard/messages/show.html")]
struct MessageShowTemplate {
    user: AuthUser,
    message: Message,
}

#[derive(Template)]
#[template(path = "dashboard/messages/new.html")]
struct ComposeTemplate {
    user: AuthUser,
    members: Vec<Member>,
    error: Option<String>,
}

pub async fn list(State(state): State<MessagesAdminState>, auth_user: AuthUser) -> Result<Response> {
    let messages = state.message_repo.find_all().await?;
    let unread_count = state.message_repo.count_unread().await?;

    let template = MessagesListTemplate {
        user: auth_user,
        messages,
        unread_count,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

/// Opening a message marks it as read.
pub async fn show(
    State(state): State<MessagesAdminState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut message = state
        .message_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

    if !message.is_read {
        state.message_repo.mark_read(&id).await?;
        message.is_read = true;
    }

    let template = MessageShowTemplate {
        user: auth_user,
        message,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn new_page(
    State(state): State<MessagesAdminState>,
    auth_user: AuthUser,
) -> Result<Response> {
    let members = state.member_repo.find_all().await?;

    let template = ComposeTemplate {
        user: auth_user,
        members,
        error: None,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn send(
    State(state): State<MessagesAdminState>,
    auth_user: AuthUser,
    Form(form): Form<ComposeMessage>,
) -> Result<Response> {
    let recipient = state.member_repo.find_by_id(&form.recipient_id).await?;

    let error = if form.subject.trim().is_empty() {
        Some("Subject is required")
    } else if form.content.trim().is_empty() {
        Some("Message body is required")
    } else if recipient.is_none() {
        Some("Choose a recipient")
    } else {
        None
    };

    let recipient = match (error, recipient) {
        (None, Some(recipient)) => recipient,
        _ => {
            let members = state.member_repo.find_all().await?;
            let template = ComposeTemplate {
                user: auth_user,
                members,
                error: error.map(str::to_string),
            };
            return Ok(Html(
                template
                    .render()
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            )
            .into_response());
        }
    };

    state
        .message_repo
        .create(
            &auth_user.id,
            &auth_user.full_name,
            auth_user.role,
            &recipient.id,
            &recipient.full_name,
            &form.subject,
            &form.content,
        )
        .await?;

    Ok(Redirect::to("/dashboard/messages").into_response())
}

pub async fn delete(
    State(state): State<MessagesAdminState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.message_repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Message not found".to_string()));
    }

    Ok(Redirect::to("/dashboard/messages").into_response())
}
