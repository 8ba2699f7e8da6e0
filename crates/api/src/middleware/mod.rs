//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireEventManager`] -- College admin or super-admin.
//! - [`rbac::RequireSuperAdmin`] -- Super-admin only.

pub mod auth;
pub mod rbac;
