#![allow(dead_code)]

use axum::Router;

use ironforge::db::{create_memory_pool, DbPool};
use ironforge::migrations::run_migrations_for_tests;
use ironforge::models::{
    ClassForm, ClassLevel, IdType, Member, MemberForm, ProductForm, SubscriptionStatus,
    SubscriptionType, User, UserRole,
};
use ironforge::repositories::{
    ClassRepository, MemberRepository, ProductRepository, SessionRepository, UserRepository,
};
use ironforge::routes::{create_router, Repositories};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    create_router(Repositories::new(&pool))
}

pub async fn create_test_user(
    pool: &DbPool,
    full_name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo
        .create(full_name, email, password, role)
        .await
        .unwrap()
}

/// Forge a logged-in session for a user; returns a ready-to-send Cookie
/// header value.
pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    let token = session_repo.create(&user.id).await.unwrap();
    format!("session={}", token)
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

// Test data creation helpers

pub async fn create_test_member(
    pool: &DbPool,
    owner_id: &str,
    full_name: &str,
    email: &str,
    status: SubscriptionStatus,
) -> Member {
    let member_repo = MemberRepository::new(pool.clone());
    let form = MemberForm {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
        postal_code: None,
        id_number: "ID-123456".to_string(),
        id_type: IdType::NationalId,
        subscription_status: status,
        subscription_type: SubscriptionType::Monthly,
        amount_to_pay_cents: 9900,
    };
    member_repo.create(&form, owner_id).await.unwrap()
}

pub async fn create_test_class(
    pool: &DbPool,
    name: &str,
    day: &str,
    max_capacity: i64,
) -> ironforge::models::GymClass {
    let class_repo = ClassRepository::new(pool.clone());
    let form = ClassForm {
        name: name.to_string(),
        description: "High intensity interval training".to_string(),
        coach_id: String::new(),
        day_of_week: day.to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        max_capacity,
        location: "Studio A".to_string(),
        level: ClassLevel::All,
    };
    class_repo.create(&form, "TBA").await.unwrap()
}

pub async fn create_test_product(
    pool: &DbPool,
    name: &str,
    category: ironforge::models::ProductCategory,
    stock: i64,
    active: bool,
) -> ironforge::models::Product {
    let product_repo = ProductRepository::new(pool.clone());
    let form = ProductForm {
        name: name.to_string(),
        description: String::new(),
        price_cents: 4999,
        category,
        stock,
        is_active: active.then(|| "on".to_string()),
    };
    product_repo.create(&form).await.unwrap()
}

pub fn insert_test_coach(pool: &DbPool, id: &str, name: &str, rating: f64) {
    let conn = pool.get().unwrap();
    conn.execute(
        "INSERT INTO coaches (id, full_name, email, bio, specializations, rating,
             years_experience, created_at, updated_at)
         VALUES (?, ?, ?, 'Coaches hard.', '[\"Strength\",\"HIIT\"]', ?, 8,
             datetime('now'), datetime('now'))",
        rusqlite::params![id, name, format!("{}@ironforge.gym", id), rating],
    )
    .unwrap();
}
