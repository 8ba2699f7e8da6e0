//! Authorization policy.
//!
//! Every permission decision in the system goes through a function in this
//! module. Handlers build an [`Actor`] from the stored user row, load the
//! facts about the target resource, and ask the policy. Ownership is always
//! compared by id.

use crate::error::CoreError;
use crate::registration::RegistrationStatus;
use crate::roles::AccountType;
use crate::types::DbId;

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub account_type: AccountType,
}

impl Actor {
    pub fn new(user_id: DbId, account_type: AccountType) -> Self {
        Self {
            user_id,
            account_type,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.account_type == AccountType::SuperAdmin
    }

    /// Super-admin, or the owner identified by `owner_id`.
    fn owns_or_overrides(&self, owner_id: DbId) -> bool {
        self.is_super_admin() || self.user_id == owner_id
    }
}

/// The facts about a registration that authorization depends on.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationFacts {
    pub registrant_id: DbId,
    pub event_owner_id: DbId,
    pub status: RegistrationStatus,
}

/// Which registrations an actor may list. Translated into a SQL predicate by
/// the repository layer so unauthorized rows are never loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationScope {
    All,
    EventsOwnedBy(DbId),
    RegisteredBy(DbId),
}

/// Knobs for ticket issuance.
#[derive(Debug, Clone, Copy)]
pub struct TicketPolicy {
    /// Let the owning admin and super-admins render tickets for registrations
    /// that are not yet approved.
    pub admin_preview: bool,
}

impl Default for TicketPolicy {
    fn default() -> Self {
        Self {
            admin_preview: true,
        }
    }
}

fn forbidden(msg: &str) -> CoreError {
    CoreError::Forbidden(msg.to_string())
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

pub fn authorize_create_event(actor: &Actor) -> Result<(), CoreError> {
    if actor.account_type.is_admin() {
        Ok(())
    } else {
        Err(forbidden("Only college admins can create events"))
    }
}

/// Update or delete an event.
pub fn authorize_event_mutation(actor: &Actor, owner_id: DbId) -> Result<(), CoreError> {
    if actor.owns_or_overrides(owner_id) {
        Ok(())
    } else {
        Err(forbidden("Not authorized to modify this event"))
    }
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

/// Register the actor themselves for an event.
pub fn authorize_register(actor: &Actor) -> Result<(), CoreError> {
    match actor.account_type {
        AccountType::Student | AccountType::SuperAdmin => Ok(()),
        AccountType::CollegeAdmin => Err(forbidden("College admins cannot register for events")),
    }
}

/// Cancel (hard-delete) a registration: the registrant, the event owner, or
/// a super-admin.
pub fn authorize_cancel(actor: &Actor, facts: &RegistrationFacts) -> Result<(), CoreError> {
    if actor.user_id == facts.registrant_id || actor.owns_or_overrides(facts.event_owner_id) {
        Ok(())
    } else {
        Err(forbidden("You are not authorized to cancel this registration"))
    }
}

/// Approve or reject a registration: the event owner or a super-admin.
pub fn authorize_decide(actor: &Actor, event_owner_id: DbId) -> Result<(), CoreError> {
    if actor.account_type.is_admin() && actor.owns_or_overrides(event_owner_id) {
        Ok(())
    } else {
        Err(forbidden("You can only manage registrations for your own events"))
    }
}

/// Read all registrations of one event.
pub fn authorize_event_registrations_read(
    actor: &Actor,
    event_owner_id: DbId,
) -> Result<(), CoreError> {
    authorize_decide(actor, event_owner_id)
}

pub fn registration_scope(actor: &Actor) -> RegistrationScope {
    match actor.account_type {
        AccountType::SuperAdmin => RegistrationScope::All,
        AccountType::CollegeAdmin => RegistrationScope::EventsOwnedBy(actor.user_id),
        AccountType::Student => RegistrationScope::RegisteredBy(actor.user_id),
    }
}

/// Render a ticket. Registrants need an approved registration; the owning
/// admin and super-admins may preview undecided ones when the policy allows.
pub fn authorize_ticket(
    actor: &Actor,
    facts: &RegistrationFacts,
    policy: TicketPolicy,
) -> Result<(), CoreError> {
    let approved = facts.status == RegistrationStatus::Approved;

    if actor.account_type.is_admin() && actor.owns_or_overrides(facts.event_owner_id) {
        if approved || policy.admin_preview {
            return Ok(());
        }
        return Err(forbidden("Ticket available only for approved registrations"));
    }

    if actor.user_id == facts.registrant_id {
        if approved {
            return Ok(());
        }
        return Err(forbidden("Ticket available only for approved registrations"));
    }

    Err(forbidden("Not authorized to download this ticket"))
}

// ---------------------------------------------------------------------------
// Audit log, feedback, users
// ---------------------------------------------------------------------------

/// Any admin reads the whole log; it is the shared trail for every event.
pub fn authorize_audit_read(actor: &Actor) -> Result<(), CoreError> {
    if actor.account_type.is_admin() {
        Ok(())
    } else {
        Err(forbidden("Admin role required to read audit logs"))
    }
}

pub fn authorize_audit_write(actor: &Actor) -> Result<(), CoreError> {
    if actor.account_type.is_admin() {
        Ok(())
    } else {
        Err(forbidden("Admin role required to write audit logs"))
    }
}

/// Edit or delete a feedback entry.
pub fn authorize_feedback_mutation(actor: &Actor, author_id: DbId) -> Result<(), CoreError> {
    if actor.owns_or_overrides(author_id) {
        Ok(())
    } else {
        Err(forbidden("You can only modify your own feedback"))
    }
}

pub fn authorize_user_listing(actor: &Actor) -> Result<(), CoreError> {
    if actor.is_super_admin() {
        Ok(())
    } else {
        Err(forbidden("Super admin role required"))
    }
}
