//! Feature Flags
//!
//! Named boolean toggles. Handlers resolve flags here and hand plain
//! booleans to the role store.

use dashmap::DashMap;
use rp_config::FeaturesConfig;

/// Well-known flag names
pub mod names {
    pub const HIRED_STATUS_MESSAGE: &str = "HiredStatusMessage";
    pub const ENABLE_ROLE_POSTING: &str = "EnableRolePosting";
    pub const REQUIRE_ROLE_APPROVAL: &str = "RequireRoleApproval";
    pub const SHOW_EXPIRED_ROLES: &str = "ShowExpiredRoles";

    pub const ALL: &[&str] = &[
        HIRED_STATUS_MESSAGE,
        ENABLE_ROLE_POSTING,
        REQUIRE_ROLE_APPROVAL,
        SHOW_EXPIRED_ROLES,
    ];
}

pub trait FeatureFlags: Send + Sync {
    /// Unknown flags are disabled
    fn is_enabled(&self, name: &str) -> bool;
}

/// In-memory flag table, seeded from configuration and adjustable at runtime
#[derive(Debug, Default)]
pub struct InMemoryFeatureFlags {
    flags: DashMap<String, bool>,
}

impl InMemoryFeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FeaturesConfig) -> Self {
        Self::new()
            .with(names::HIRED_STATUS_MESSAGE, config.hired_status_message)
            .with(names::ENABLE_ROLE_POSTING, config.enable_role_posting)
            .with(names::REQUIRE_ROLE_APPROVAL, config.require_role_approval)
            .with(names::SHOW_EXPIRED_ROLES, config.show_expired_roles)
    }

    pub fn with(self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    pub fn set(&self, name: impl Into<String>, enabled: bool) {
        let name = name.into();
        tracing::debug!(flag = %name, enabled, "Feature flag set");
        self.flags.insert(name, enabled);
    }
}

impl FeatureFlags for InMemoryFeatureFlags {
    fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).map(|v| *v).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let flags = InMemoryFeatureFlags::from_config(&FeaturesConfig::default());
        assert!(flags.is_enabled(names::ENABLE_ROLE_POSTING));
        assert!(!flags.is_enabled(names::REQUIRE_ROLE_APPROVAL));
        assert!(!flags.is_enabled(names::SHOW_EXPIRED_ROLES));
        assert!(!flags.is_enabled(names::HIRED_STATUS_MESSAGE));
    }

    #[test]
    fn test_unknown_flag_is_disabled() {
        let flags = InMemoryFeatureFlags::new();
        assert!(!flags.is_enabled("NoSuchFlag"));
    }

    #[test]
    fn test_runtime_toggle() {
        let flags = InMemoryFeatureFlags::new().with(names::SHOW_EXPIRED_ROLES, true);
        assert!(flags.is_enabled(names::SHOW_EXPIRED_ROLES));

        flags.set(names::SHOW_EXPIRED_ROLES, false);
        assert!(!flags.is_enabled(names::SHOW_EXPIRED_ROLES));
    }
}
