//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits mirror the storage schema: names are capped at 512 and
//! external identifiers at 256 characters.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: printer, credential
pub const MAX_NAME_LEN: usize = 512;

/// Caller-supplied external identifiers
pub const MAX_EXTERNAL_ID_LEN: usize = 256;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_limits() {
        assert!(validate_required_text("Front desk", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(513), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text_limits() {
        assert!(validate_optional_text(&None, "externalId", MAX_EXTERNAL_ID_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("ok".into()), "externalId", MAX_EXTERNAL_ID_LEN).is_ok()
        );
        assert!(
            validate_optional_text(
                &Some("x".repeat(257)),
                "externalId",
                MAX_EXTERNAL_ID_LEN
            )
            .is_err()
        );
    }
}
