//! Input validation utilities
//!
//! Validates user inputs before any remote call is made, so a bad group
//! name never reaches the Fleet Management API.

use crate::error::{AsgctlError, Result};

/// Validate an autoscaling group name.
///
/// Group names must be non-empty, at most 255 characters, and free of
/// control characters. Both scale commands run this before touching the
/// API; an empty value is rejected here instead of producing a confusing
/// remote error.
pub fn validate_group_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AsgctlError::Validation {
            field: "group_name".to_string(),
            reason: "Group name cannot be empty".to_string(),
        });
    }

    if name.len() > 255 {
        return Err(AsgctlError::Validation {
            field: "group_name".to_string(),
            reason: format!(
                "Group name must be <= 255 characters, got: {} (len: {})",
                name,
                name.len()
            ),
        });
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(AsgctlError::Validation {
            field: "group_name".to_string(),
            reason: "Group name cannot contain control characters".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_group_name() {
        assert!(validate_group_name("web-1").is_ok());
        assert!(validate_group_name("api-prod").is_ok());
        assert!(validate_group_name("my_group.v2").is_ok());

        assert!(validate_group_name("").is_err()); // Empty
        assert!(validate_group_name("   ").is_err()); // Whitespace only
        assert!(validate_group_name(&"a".repeat(256)).is_err()); // Too long
        assert!(validate_group_name("web\n1").is_err()); // Control char
    }

    #[test]
    fn test_validate_group_name_boundary_length() {
        assert!(validate_group_name(&"a".repeat(255)).is_ok());
        assert!(validate_group_name(&"a".repeat(256)).is_err());
    }
}
