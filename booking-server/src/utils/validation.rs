//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names (customer username, manager name)
pub const MAX_NAME_LEN: usize = 200;

/// Reservation comments, dietary notes, feedback text
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Largest party a single booking may request
pub const MAX_PARTY_SIZE: u32 = 50;

// ── Validation helpers ──────────────────────────────────────────────

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
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

/// Take a present, non-blank field, trimmed
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Loose email shape check: one `@` with text on both sides and a dot in the domain
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Party size must be a positive integer no larger than [`MAX_PARTY_SIZE`]
pub fn party_size_from(value: i64) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .filter(|n| (1..=MAX_PARTY_SIZE).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_long() {
        assert!(validate_required_text("Ana", "username", 10).is_ok());
        assert!(validate_required_text("   ", "username", 10).is_err());
        assert!(validate_required_text("abcdefghijk", "username", 10).is_err());
    }

    #[test]
    fn optional_text_only_checks_length() {
        assert!(validate_optional_text(&None, "comment", 3).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "comment", 3).is_ok());
        assert!(validate_optional_text(&Some("abcd".into()), "comment", 3).is_err());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(&Some("  x ".into())), Some("x"));
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("guest@eden.org"));
        assert!(!is_plausible_email("guest.eden.org"));
        assert!(!is_plausible_email("@eden.org"));
        assert!(!is_plausible_email("guest@eden"));
        assert!(!is_plausible_email("a@b@c.org"));
    }

    #[test]
    fn party_size_bounds() {
        assert_eq!(party_size_from(4), Some(4));
        assert_eq!(party_size_from(0), None);
        assert_eq!(party_size_from(-2), None);
        assert_eq!(party_size_from(i64::from(MAX_PARTY_SIZE) + 1), None);
    }
}
