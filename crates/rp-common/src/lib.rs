//! Roleboard Common
//!
//! Infrastructure shared by every Roleboard binary.

pub mod logging;
