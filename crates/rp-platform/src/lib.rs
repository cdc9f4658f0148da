//! Roleboard Platform
//!
//! Job role postings service:
//! - Role lifecycle: creation, time-based expiration, optional approval
//! - Request validation for new roles
//! - Feature flags gating posting, approval and listing behavior
//! - REST APIs with OpenAPI docs, health probes and rate limiting
//!
//! ## Module Organization
//!
//! - `role` - entity, validation, in-memory store, REST endpoints
//! - `feature` - feature flag lookup
//! - `shared` - errors, clock, middleware, status and health endpoints
//! - `app` - router assembly

pub mod role;
pub mod feature;
pub mod shared;
pub mod app;

// Re-export common types from shared
pub use shared::error::{PlatformError, Result};
pub use shared::clock::{Clock, ManualClock, SystemClock};

pub use role::{
    ApproveOutcome, ExpirationPeriod, Role, RoleFields, RoleStore, RoleValidationError,
    ValidationResult, validate_create_request,
};
pub use feature::{FeatureFlags, InMemoryFeatureFlags};
pub use shared::health_api::HealthState;
pub use app::{build_app, AppServices};
