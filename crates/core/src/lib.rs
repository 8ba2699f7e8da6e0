//! Campus event hub domain core.
//!
//! Pure domain logic with no I/O: account roles, the authorization policy,
//! the registration state machine, event and feedback validation, audit
//! message construction, and ticket rendering. Both the repository layer and
//! the HTTP layer depend on this crate.

pub mod audit;
pub mod authz;
pub mod error;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod roles;
pub mod ticket;
pub mod types;
