use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::models::Message;
use crate::repositories::MessageRepository;

#[derive(Clone)]
pub struct InboxState {
    pub message_repo: MessageRepository,
}

#[derive(Template)]
#[template(path = "site/messages_list.html")]
struct InboxTemplate {
    messages: Vec<Message>,
}

#[derive(Template)]
#[template(path = "site/message_show.html")]
struct MessageTemplate {
    message: Message,
}

// Members have no accounts, so the inbox shows every member-facing
// message. Read state is only toggled from the back office.
pub async fn list(State(state): State<InboxState>) -> Result<Response> {
    let messages = state.message_repo.find_all().await?;

    let template = InboxTemplate { messages };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn show(State(state): State<InboxState>, Path(id): Path<String>) -> Result<Response> {
    let message = state
        .message_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

    let template = MessageTemplate { message };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
