//! HTTP handlers, one module per resource.

pub mod admin_logs;
pub mod auth;
pub mod events;
pub mod feedback;
pub mod registrations;
