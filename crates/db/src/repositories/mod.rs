//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod admin_log_repo;
pub mod event_repo;
pub mod feedback_repo;
pub mod registration_repo;
pub mod user_repo;

pub use admin_log_repo::AdminLogRepo;
pub use event_repo::EventRepo;
pub use feedback_repo::FeedbackRepo;
pub use registration_repo::RegistrationRepo;
pub use user_repo::UserRepo;
