//! Role Entity
//!
//! A job posting with a fixed lifetime and an optional approval gate.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use uuid::Uuid;

/// Free-text fields supplied by whoever posts the role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFields {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
}

impl RoleFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            department: String::new(),
            location: String::new(),
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// Stored role record.
///
/// Everything except `is_approved` is fixed at creation. Expiration is not
/// stored; ask [`Role::is_expired_at`] with the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl Role {
    pub(crate) fn new(
        id: Uuid,
        fields: RoleFields,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        is_approved: bool,
    ) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            department: fields.department,
            location: fields.location,
            created_at,
            expires_at,
            is_approved,
        }
    }

    /// A role is expired once `now` is strictly past `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// How long a role stays open, in calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPeriod(NonZeroU32);

impl ExpirationPeriod {
    pub const DEFAULT_MONTHS: u32 = 3;

    /// Returns `None` for a zero-month period
    pub fn from_months(months: u32) -> Option<Self> {
        NonZeroU32::new(months).map(Self)
    }

    pub fn months(&self) -> u32 {
        self.0.get()
    }

    /// Expiration instant for a role created at `created_at`.
    ///
    /// Month arithmetic clamps to the last day of shorter months
    /// (Nov 30 + 3 months = Feb 28/29).
    pub fn expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at
            .checked_add_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for ExpirationPeriod {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(Self::DEFAULT_MONTHS - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_role(created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Role {
        Role::new(
            Uuid::new_v4(),
            RoleFields::new("Engineer", "Build things"),
            created_at,
            expires_at,
            true,
        )
    }

    #[test]
    fn test_default_period_is_three_months() {
        assert_eq!(ExpirationPeriod::default().months(), 3);
    }

    #[test]
    fn test_zero_months_rejected() {
        assert!(ExpirationPeriod::from_months(0).is_none());
        assert_eq!(ExpirationPeriod::from_months(6).map(|p| p.months()), Some(6));
    }

    #[test]
    fn test_expires_at_adds_calendar_months() {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let period = ExpirationPeriod::default();
        assert_eq!(period.expires_at(created), Utc.with_ymd_and_hms(2024, 4, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_expires_at_clamps_to_month_end() {
        let created = Utc.with_ymd_and_hms(2023, 11, 30, 0, 0, 0).unwrap();
        let period = ExpirationPeriod::default();
        assert_eq!(period.expires_at(created), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_expires_after_creation() {
        let created = Utc::now();
        let expires = ExpirationPeriod::from_months(1).unwrap().expires_at(created);
        assert!(expires > created);
    }

    #[test]
    fn test_expired_strictly_after_expiration() {
        let created = Utc::now();
        let expires = created + Duration::days(90);
        let role = sample_role(created, expires);

        assert!(!role.is_expired_at(created));
        assert!(!role.is_expired_at(expires));
        assert!(role.is_expired_at(expires + Duration::seconds(1)));
    }

    #[test]
    fn test_fields_builder() {
        let fields = RoleFields::new("Engineer", "Build things")
            .with_department("Eng")
            .with_location("Remote");
        assert_eq!(fields.department, "Eng");
        assert_eq!(fields.location, "Remote");
    }
}
