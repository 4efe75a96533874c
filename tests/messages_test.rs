mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use ironforge::models::{SubscriptionStatus, UserRole};
use ironforge::repositories::MessageRepository;
use tower::ServiceExt;

async fn staff(pool: &ironforge::db::DbPool) -> (ironforge::models::User, String) {
    let user = common::create_test_user(
        pool,
        "Sara Front",
        "sara@ironforge.gym",
        "secret123",
        UserRole::Admin,
    )
    .await;
    let cookie = common::create_session_cookie(pool, &user).await;
    (user, cookie)
}

#[tokio::test]
async fn test_compose_sends_message_to_member() {
    let pool = common::setup_test_db();
    let (user, cookie) = staff(&pool).await;
    let member = common::create_test_member(
        &pool,
        &user.id,
        "John Doe",
        "john@email.com",
        SubscriptionStatus::Active,
    )
    .await;

    let app = common::create_test_app(pool.clone());
    let body = format!(
        "recipient_id={}&subject=Membership%20renewal&content=Renews%20on%20the%201st",
        member.id
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard/messages")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/dashboard/messages"
    );

    let message_repo = MessageRepository::new(pool);
    let messages = message_repo.find_all().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_name, "Sara Front");
    assert_eq!(messages[0].sender_role, UserRole::Admin);
    assert_eq!(messages[0].recipient_name, "John Doe");
    assert!(!messages[0].is_read);
}

#[tokio::test]
async fn test_compose_unknown_recipient_is_an_error() {
    let pool = common::setup_test_db();
    let (_user, cookie) = staff(&pool).await;

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard/messages")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from(
                    "recipient_id=nonexistent&subject=Hello&content=Anyone%20there",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Form re-renders with an error instead of silently dropping the send
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("Choose a recipient"));

    let message_repo = MessageRepository::new(pool);
    assert_eq!(message_repo.find_all().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_compose_empty_subject_rejected() {
    let pool = common::setup_test_db();
    let (user, cookie) = staff(&pool).await;
    let member = common::create_test_member(
        &pool,
        &user.id,
        "John Doe",
        "john@email.com",
        SubscriptionStatus::Active,
    )
    .await;

    let app = common::create_test_app(pool.clone());
    let body = format!("recipient_id={}&subject=&content=Hi", member.id);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard/messages")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("Subject is required"));
}

#[tokio::test]
async fn test_opening_message_marks_it_read() {
    let pool = common::setup_test_db();
    let (user, cookie) = staff(&pool).await;

    let message_repo = MessageRepository::new(pool.clone());
    let message = message_repo
        .create(
            &user.id,
            "Sara Front",
            UserRole::Admin,
            "member-1",
            "John Doe",
            "Locker assignment",
            "Locker 42, upper row.",
        )
        .await
        .unwrap();
    assert_eq!(message_repo.count_unread().await.unwrap(), 1);

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri(&format!("/dashboard/messages/{}", message.id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(message_repo.count_unread().await.unwrap(), 0);
}

#[tokio::test]
async fn test_messages_list_shows_unread_count() {
    let pool = common::setup_test_db();
    let (user, cookie) = staff(&pool).await;

    let message_repo = MessageRepository::new(pool.clone());
    for subject in ["First", "Second"] {
        message_repo
            .create(
                &user.id,
                "Sara Front",
                UserRole::Admin,
                "member-1",
                "John Doe",
                subject,
                "Hello",
            )
            .await
            .unwrap();
    }

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/messages")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("2 unread messages"));
}

#[tokio::test]
async fn test_delete_message() {
    let pool = common::setup_test_db();
    let (user, cookie) = staff(&pool).await;

    let message_repo = MessageRepository::new(pool.clone());
    let message = message_repo
        .create(
            &user.id,
            "Sara Front",
            UserRole::Admin,
            "member-1",
            "John Doe",
            "Old notice",
            "Outdated.",
        )
        .await
        .unwrap();

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&format!("/dashboard/messages/{}/delete", message.id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(message_repo.find_by_id(&message.id).await.unwrap().is_none());
}

// Public inbox

#[tokio::test]
async fn test_public_inbox_lists_messages_without_login() {
    let pool = common::setup_test_db();
    let (user, _cookie) = staff(&pool).await;

    let message_repo = MessageRepository::new(pool.clone());
    message_repo
        .create(
            &user.id,
            "Sara Front",
            UserRole::Admin,
            "member-1",
            "John Doe",
            "Welcome to Iron Forge",
            "Your first week starts today.",
        )
        .await
        .unwrap();

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/messages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8_lossy(&body);
    assert!(body_str.contains("Welcome to Iron Forge"));
}

#[tokio::test]
async fn test_public_inbox_detail_does_not_mark_read() {
    let pool = common::setup_test_db();
    let (user, _cookie) = staff(&pool).await;

    let message_repo = MessageRepository::new(pool.clone());
    let message = message_repo
        .create(
            &user.id,
            "Sara Front",
            UserRole::Admin,
            "member-1",
            "John Doe",
            "Welcome to Iron Forge",
            "Your first week starts today.",
        )
        .await
        .unwrap();

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .uri(&format!("/messages/{}", message.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Read state is only toggled from the back office
    assert_eq!(message_repo.count_unread().await.unwrap(), 1);
}
