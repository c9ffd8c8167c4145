//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate maximum length in bytes.
pub fn validate_max_bytes(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.len() > max {
        Err(format!("{} must be at most {} bytes", field_name, max))
    } else {
        Ok(())
    }
}

/// Parse a form field as an integer.
pub fn parse_int(value: &str, field_name: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{} must be a number", field_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" 555 ", "telp"), Ok(555));
        assert_eq!(parse_int("", "telp"), Err("telp must be a number".to_string()));
        assert!(parse_int("12ab", "telp").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("A", "name").is_ok());
        assert_eq!(
            validate_not_empty("  ", "name"),
            Err("name cannot be empty".to_string())
        );
    }
}
