//! Role Aggregate
//!
//! Job role postings: lifecycle, validation, storage, and REST endpoints.

pub mod entity;
pub mod validation;
pub mod store;
pub mod api;

// Re-export main types
pub use entity::{ExpirationPeriod, Role, RoleFields};
pub use validation::{validate_create_request, RoleValidationError, ValidationResult};
pub use store::{ApproveOutcome, RoleStore};
pub use api::{RolesState, roles_router};
