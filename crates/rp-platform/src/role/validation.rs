//! Role creation request validation
//!
//! Pure checks, no storage access. The first failing rule wins.

use thiserror::Error;

use crate::role::entity::RoleFields;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_DEPARTMENT_LENGTH: usize = 100;
pub const MAX_LOCATION_LENGTH: usize = 200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title cannot exceed 200 characters")]
    TitleTooLong,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("Description cannot exceed 5000 characters")]
    DescriptionTooLong,

    #[error("Department cannot exceed 100 characters")]
    DepartmentTooLong,

    #[error("Location cannot exceed 200 characters")]
    LocationTooLong,
}

/// Outcome in flag-and-message form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl From<Result<(), RoleValidationError>> for ValidationResult {
    fn from(result: Result<(), RoleValidationError>) -> Self {
        match result {
            Ok(()) => Self { is_valid: true, error_message: None },
            Err(e) => Self { is_valid: false, error_message: Some(e.to_string()) },
        }
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_create_request(fields: &RoleFields) -> Result<(), RoleValidationError> {
    if fields.title.trim().is_empty() {
        return Err(RoleValidationError::TitleRequired);
    }
    if char_len(&fields.title) > MAX_TITLE_LENGTH {
        return Err(RoleValidationError::TitleTooLong);
    }

    if fields.description.trim().is_empty() {
        return Err(RoleValidationError::DescriptionRequired);
    }
    if char_len(&fields.description) > MAX_DESCRIPTION_LENGTH {
        return Err(RoleValidationError::DescriptionTooLong);
    }

    // Department and location are optional; only their length is bounded.
    if !fields.department.is_empty() && char_len(&fields.department) > MAX_DEPARTMENT_LENGTH {
        return Err(RoleValidationError::DepartmentTooLong);
    }
    if !fields.location.is_empty() && char_len(&fields.location) > MAX_LOCATION_LENGTH {
        return Err(RoleValidationError::LocationTooLong);
    }

    Ok(())
}
