//! Shared infrastructure: errors, clock, middleware, and service endpoints

pub mod clock;
pub mod error;
pub mod health_api;
pub mod rate_limit;
pub mod status_api;
