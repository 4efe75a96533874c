use axum::{
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};

use crate::db::DbPool;
use crate::handlers::{auth, dashboard, health, site};
use crate::repositories::{
    ClassRepository, CoachRepository, MemberRepository, MessageRepository, ProductRepository,
    SessionRepository, UserRepository,
};

/// One handle per table; handler states borrow what they need.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub members: MemberRepository,
    pub coaches: CoachRepository,
    pub classes: ClassRepository,
    pub products: ProductRepository,
    pub messages: MessageRepository,
}

impl Repositories {
    pub fn new(pool: &DbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            coaches: CoachRepository::new(pool.clone()),
            classes: ClassRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
        }
    }
}

pub fn create_router(repos: Repositories) -> Router {
    let home_state = site::home::HomeState {
        coach_repo: repos.coaches.clone(),
        class_repo: repos.classes.clone(),
    };
    let schedule_state = site::classes::ScheduleState {
        class_repo: repos.classes.clone(),
    };
    let coaches_state = site::coaches::CoachesState {
        coach_repo: repos.coaches.clone(),
    };
    let store_state = site::store::StoreState {
        product_repo: repos.products.clone(),
    };
    let inbox_state = site::messages::InboxState {
        message_repo: repos.messages.clone(),
    };
    let auth_state = auth::AuthState {
        user_repo: repos.users.clone(),
        session_repo: repos.sessions.clone(),
    };
    let overview_state = dashboard::overview::OverviewState {
        member_repo: repos.members.clone(),
        class_repo: repos.classes.clone(),
        product_repo: repos.products.clone(),
        message_repo: repos.messages.clone(),
    };
    let members_state = dashboard::members::MembersState {
        member_repo: repos.members.clone(),
    };
    let classes_admin_state = dashboard::classes::ClassesAdminState {
        class_repo: repos.classes.clone(),
        coach_repo: repos.coaches.clone(),
    };
    let products_state = dashboard::products::ProductsState {
        product_repo: repos.products.clone(),
    };
    let messages_admin_state = dashboard::messages::MessagesAdminState {
        message_repo: repos.messages.clone(),
        member_repo: repos.members.clone(),
    };
    let users_state = dashboard::users::UsersState {
        user_repo: repos.users.clone(),
    };

    Router::new()
        // Public site
        .route("/", get(site::home::index))
        .with_state(home_state)
        .route("/classes", get(site::classes::index))
        .route("/classes/{id}/book", post(site::classes::book))
        .with_state(schedule_state)
        .route("/coaches", get(site::coaches::index))
        .with_state(coaches_state)
        .route("/store", get(site::store::index))
        .with_state(store_state)
        .route("/messages", get(site::messages::list))
        .route("/messages/{id}", get(site::messages::show))
        .with_state(inbox_state)
        // Staff auth
        .route(
            "/auth/login",
            get(auth::login_page).post(auth::login_submit),
        )
        .route(
            "/auth/setup",
            get(auth::setup_page).post(auth::setup_submit),
        )
        .route("/auth/logout", post(auth::logout))
        .with_state(auth_state)
        // Back office
        .route("/dashboard", get(dashboard::overview::index))
        .with_state(overview_state)
        .route("/dashboard/members", get(dashboard::members::list))
        .route("/dashboard/members/new", get(dashboard::members::new_page))
        .route("/dashboard/members", post(dashboard::members::create))
        .route(
            "/dashboard/members/{id}/edit",
            get(dashboard::members::edit_page),
        )
        .route("/dashboard/members/{id}", post(dashboard::members::update))
        .route(
            "/dashboard/members/{id}/delete",
            post(dashboard::members::delete),
        )
        .with_state(members_state)
        .route("/dashboard/classes", get(dashboard::classes::list))
        .route("/dashboard/classes/new", get(dashboard::classes::new_page))
        .route("/dashboard/classes", post(dashboard::classes::create))
        .route(
            "/dashboard/classes/{id}/edit",
            get(dashboard::classes::edit_page),
        )
        .route("/dashboard/classes/{id}", post(dashboard::classes::update))
        .route(
            "/dashboard/classes/{id}/delete",
            post(dashboard::classes::delete),
        )
        .with_state(classes_admin_state)
        .route("/dashboard/products", get(dashboard::products::list))
        .route(
            "/dashboard/products/new",
            get(dashboard::products::new_page),
        )
        .route("/dashboard/products", post(dashboard::products::create))
        .route(
            "/dashboard/products/{id}/edit",
            get(dashboard::products::edit_page),
        )
        .route(
            "/dashboard/products/{id}",
            post(dashboard::products::update),
        )
        .route(
            "/dashboard/products/{id}/delete",
            post(dashboard::products::delete),
        )
        .with_state(products_state)
        .route("/dashboard/messages", get(dashboard::messages::list))
        .route(
            "/dashboard/messages/new",
            get(dashboard::messages::new_page),
        )
        .route("/dashboard/messages", post(dashboard::messages::send))
        .route("/dashboard/messages/{id}", get(dashboard::messages::show))
        .route(
            "/dashboard/messages/{id}/delete",
            post(dashboard::messages::delete),
        )
        .with_state(messages_admin_state)
        .route("/dashboard/users", get(dashboard::users::list))
        .route(
            "/dashboard/users/new",
            get(dashboard::users::new_page).post(dashboard::users::create),
        )
        .route(
            "/dashboard/users/{id}/delete",
            post(dashboard::users::delete),
        )
        .route(
            "/dashboard/users/{id}/promote",
            post(dashboard::users::promote),
        )
        .with_state(users_state)
        // Probes
        .route("/health", get(health::health_check))
        .fallback(not_found)
        // Session repository for the auth extractors
        .layer(Extension(repos.sessions))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page not found")
}
