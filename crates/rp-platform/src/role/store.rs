//! Role Store
//!
//! In-memory, concurrency-safe map of role id to role record. Roles are never
//! removed; expiration is applied as a read-time filter.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::role::entity::{ExpirationPeriod, Role, RoleFields};
use crate::shared::clock::{Clock, SystemClock};

/// Result of an approve call. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveOutcome {
    /// Flipped from unapproved to approved
    Approved,
    /// Was approved before this call
    AlreadyApproved,
    /// Unknown id; nothing changed
    NotFound,
}

pub struct RoleStore {
    roles: DashMap<Uuid, Role>,
    expiration: ExpirationPeriod,
    clock: Arc<dyn Clock>,
}

impl RoleStore {
    pub fn new(expiration: ExpirationPeriod) -> Self {
        Self::with_clock(expiration, Arc::new(SystemClock))
    }

    pub fn with_clock(expiration: ExpirationPeriod, clock: Arc<dyn Clock>) -> Self {
        Self {
            roles: DashMap::new(),
            expiration,
            clock,
        }
    }

    pub fn expiration(&self) -> ExpirationPeriod {
        self.expiration
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub fn is_expired(&self, role: &Role) -> bool {
        role.is_expired_at(self.clock.now())
    }

    pub fn count(&self) -> usize {
        self.roles.len()
    }

    /// Store a new role and return the stored record.
    ///
    /// A colliding id is never overwritten; a fresh one is drawn instead.
    pub fn create(&self, fields: RoleFields, require_approval: bool) -> Role {
        let created_at = self.clock.now();
        let expires_at = self.expiration.expires_at(created_at);
        let mut role = Role::new(Uuid::new_v4(), fields, created_at, expires_at, !require_approval);

        loop {
            match self.roles.entry(role.id) {
                Entry::Vacant(slot) => {
                    slot.insert(role.clone());
                    break;
                }
                Entry::Occupied(_) => {
                    warn!(role_id = %role.id, "Role id collision, drawing a new id");
                    role.id = Uuid::new_v4();
                }
            }
        }

        info!(
            role_id = %role.id,
            title = %role.title,
            expires_at = %role.expires_at,
            is_approved = role.is_approved,
            "Role created"
        );
        role
    }

    pub fn get(&self, id: &Uuid) -> Option<Role> {
        self.roles.get(id).map(|entry| entry.value().clone())
    }

    /// All roles, minus expired and unapproved ones unless asked for.
    /// Order is unspecified.
    pub fn list(&self, include_expired: bool, include_unapproved: bool) -> Vec<Role> {
        let now = self.clock.now();
        self.roles
            .iter()
            .filter(|entry| include_expired || !entry.is_expired_at(now))
            .filter(|entry| include_unapproved || entry.is_approved)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Mark a role approved. Unknown ids are a silent no-op.
    pub fn approve(&self, id: &Uuid) -> ApproveOutcome {
        match self.roles.get_mut(id) {
            Some(role) if role.is_approved => {
                debug!(role_id = %id, "Role already approved");
                ApproveOutcome::AlreadyApproved
            }
            Some(mut role) => {
                role.is_approved = true;
                info!(role_id = %id, title = %role.title, "Role approved");
                ApproveOutcome::Approved
            }
            None => {
                debug!(role_id = %id, "Approve requested for unknown role");
                ApproveOutcome::NotFound
            }
        }
    }
}

impl Default for RoleStore {
    fn default() -> Self {
        Self::new(ExpirationPeriod::default())
    }
}
