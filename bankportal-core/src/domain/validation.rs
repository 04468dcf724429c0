//! Client-side form validators
//!
//! These run before any request is made. The backend repeats its own checks;
//! these only give the user early feedback.

use std::sync::OnceLock;

use regex::Regex;

/// Characters accepted as the "special character" of a password
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>_-/";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 32;

fn uppercase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[A-Z]").expect("static regex"))
}

fn phone_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static regex"))
}

/// Check password complexity, returning the first rule it breaks
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err("Password must be between 8 and 32 characters.");
    }
    if !uppercase_re().is_match(password) {
        return Err("Password must contain at least one uppercase letter.");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err("Password must contain at least one special character.");
    }
    Ok(())
}

/// Check an international phone number: `+` followed by one or more digits
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let Some(rest) = phone.strip_prefix('+') else {
        return Err("Phone number must start with '+'.");
    };
    if !phone_digits_re().is_match(rest) {
        return Err("Phone number can only contain digits after '+'.");
    }
    Ok(())
}

/// Check an email address has the shape `local@domain.tld`
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err("Please enter a valid email address."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("Ab!defg").is_err());
        assert!(validate_password("Ab!defgh").is_ok());
        assert!(validate_password(&format!("A!{}", "x".repeat(30))).is_ok());
        assert!(validate_password(&format!("A!{}", "x".repeat(31))).is_err());
    }

    #[test]
    fn test_password_requires_uppercase() {
        assert_eq!(
            validate_password("abcdefg!1"),
            Err("Password must contain at least one uppercase letter.")
        );
    }

    #[test]
    fn test_password_requires_special() {
        assert_eq!(
            validate_password("Abcdefgh1"),
            Err("Password must contain at least one special character.")
        );
        for special in ["_", "-", "/", "\"", "|"] {
            assert!(validate_password(&format!("Abcdefgh{}", special)).is_ok(), "{}", special);
        }
    }

    #[test]
    fn test_phone_validation() {
        assert_eq!(validate_phone("96170123456"), Err("Phone number must start with '+'."));
        assert_eq!(
            validate_phone("+961 70 123"),
            Err("Phone number can only contain digits after '+'.")
        );
        assert!(validate_phone("+").is_err());
        assert!(validate_phone("+1").is_ok());
        assert!(validate_phone("+96170123456").is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane.example.com").is_err());
    }
}
