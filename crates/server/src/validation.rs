//! # Field Validation
//!
//! Independent pure validators. Each returns a human-readable message on
//! failure; handlers decide whether to aggregate them per field (register)
//! or surface the first failure (everything else).

use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Display names: 2 to 100 characters.
pub fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if len < 2 || len > 100 {
        return Err("Name must be between 2 and 100 characters".to_string());
    }
    Ok(())
}

/// RFC-like email shape check: one `@`, a dotted domain, no whitespace,
/// at most 255 characters.
pub fn validate_email(email: &str) -> Result<(), String> {
    let err = || "Invalid email address".to_string();

    if email.is_empty() || email.chars().count() > 255 {
        return Err(err());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(err());
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(err());
    }
    // The domain needs an interior dot
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(err());
    }

    Ok(())
}

/// Passwords: 8 to 128 characters.
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < 8 || len > 128 {
        return Err("Password must be between 8 and 128 characters".to_string());
    }
    Ok(())
}

/// Titles: 1 to 255 characters, not blank.
pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.trim().chars().count();
    if len < 1 || len > 255 {
        return Err("Title must be between 1 and 255 characters".to_string());
    }
    Ok(())
}

/// Parses a status string against the entity's enum, naming the accepted
/// values on failure.
pub fn parse_status<S: FromStr>(raw: &str, allowed: &[&str]) -> Result<S, String> {
    S::from_str(raw).map_err(|_| format!("Status must be one of: {}", allowed.join(", ")))
}

/// Parses an RFC 3339 due date (trailing `Z` accepted).
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| "Due date must be a valid ISO 8601 datetime".to_string())
}

#[cfg(test)]
mod tests {
    use entity::{TaskStatus, TodoStatus};

    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name(&"a".repeat(100)).is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_email_accepts_plausible_addresses() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co").is_ok());
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("alice@.com").is_err());
        assert!(validate_email("alice@example.com.").is_err());
        assert!(validate_email("ali ce@example.com").is_err());
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"p".repeat(128)).is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("x").is_ok());
        assert!(validate_title(&"t".repeat(255)).is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"t".repeat(256)).is_err());
    }

    #[test]
    fn test_parse_status_names_accepted_values() {
        let ok: TaskStatus = parse_status("BLOCKED", TaskStatus::VALUES).unwrap();
        assert_eq!(ok, TaskStatus::Blocked);

        let err = parse_status::<TodoStatus>("BLOCKED", TodoStatus::VALUES).unwrap_err();
        assert_eq!(err, "Status must be one of: TODO, IN_PROGRESS, DONE");
    }

    #[test]
    fn test_parse_due_date() {
        assert!(parse_due_date("2026-09-01T12:00:00Z").is_ok());
        assert!(parse_due_date("2026-09-01T12:00:00+02:00").is_ok());
        assert!(parse_due_date("2026-09-01").is_err());
        assert!(parse_due_date("next tuesday").is_err());
    }
}
