//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Joined "detail" rows where handlers need referenced fields resolved
//! - `Deserialize` / plain create and update DTOs

pub mod admin_log;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod user;
