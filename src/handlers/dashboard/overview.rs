use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::format;
use crate::middleware::AuthUser;
use crate::models::{Message, SubscriptionStatus};
use crate::repositories::{ClassRepository, MemberRepository, MessageRepository, ProductRepository};

#[derive(Clone)]
pub struct OverviewState {
    pub member_repo: MemberRepository,
    pub class_repo: ClassRepository,
    pub product_repo: ProductRepository,
    pub message_repo: MessageRepository,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct OverviewTemplate {
    user: AuthUser,
    total_members: i64,
    total_classes: i64,
    total_products: i64,
    low_stock: i64,
    revenue_display: String,
    active_members: i64,
    pending_members: i64,
    expired_members: i64,
    unread_messages: i64,
    recent_messages: Vec<Message>,
}

pub async fn index(State(state): State<OverviewState>, auth_user: AuthUser) -> Result<Response> {
    let total_members = state.member_repo.count().await?;
    let total_classes = state.class_repo.count().await?;
    let total_products = state.product_repo.count().await?;
    let low_stock = state.product_repo.count_low_stock().await?;
    let revenue_cents = state.member_repo.active_revenue_cents().await?;

    let active_members = state
        .member_repo
        .count_by_status(SubscriptionStatus::Active)
        .await?;
    let pending_members = state
        .member_repo
        .count_by_status(SubscriptionStatus::Pending)
        .await?;
    let expired_members = state
        .member_repo
        .count_by_status(SubscriptionStatus::Expired)
        .await?;

    let unread_messages = state.message_repo.count_unread().await?;
    let mut recent_messages = state.message_repo.find_all().await?;
    recent_messages.retain(|m| !m.is_read);
    recent_messages.truncate(5);

    let template = OverviewTemplate {
        user: auth_user,
        total_members,
        total_classes,
        total_products,
        low_stock,
        revenue_display: format::price(revenue_cents),
        active_members,
        pending_members,
        expired_members,
        unread_messages,
        recent_messages,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
