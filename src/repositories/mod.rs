pub mod class_repo;
pub mod coach_repo;
pub mod member_repo;
pub mod message_repo;
pub mod product_repo;
pub mod session_repo;
pub mod user_repo;

pub use class_repo::ClassRepository;
pub use coach_repo::CoachRepository;
pub use member_repo::MemberRepository;
pub use message_repo::MessageRepository;
pub use product_repo::ProductRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
