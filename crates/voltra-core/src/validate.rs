// ── Form validation ──
//
// Client-side checks that run before any network call. Failures are
// resolved locally (inline messages) and never reach the API layer.

use crate::error::CoreError;

/// The minimal email shape check: `something@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::validation("email", "is required"));
    }
    let mut parts = email.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    let well_formed = parts.next().is_none()
        && !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    if well_formed {
        Ok(())
    } else {
        Err(CoreError::validation("email", "is not a valid address"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

fn score(password: &str) -> u8 {
    let mut score = 0;
    if password.len() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    }
    score
}

/// Strength meter shown while the user types a new password.
pub fn password_strength(password: &str) -> PasswordStrength {
    match score(password) {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Policy for a new password: at least 8 characters with upper- and
/// lowercase letters, a digit, and a special character.
pub fn validate_new_password(password: &str) -> Result<(), CoreError> {
    if score(password) == 5 {
        Ok(())
    } else {
        Err(CoreError::validation(
            "password",
            "must have at least 8 characters including uppercase, lowercase, \
             a digit, and a special character",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  ana.souza@empresa.com.br ").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "semarroba.com", "a@b", "a b@c.com", "a@@b.com", "a@.com"] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn strength_follows_the_criteria_count() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh1"), PasswordStrength::Medium);
        assert_eq!(password_strength("Abcdef1!"), PasswordStrength::Strong);
    }

    #[test]
    fn new_password_needs_every_criterion() {
        assert!(validate_new_password("Abcdef1!").is_ok());
        for bad in ["abcdef1!", "ABCDEF1!", "Abcdefg!", "Abcdef12", "Ab1!"] {
            assert!(validate_new_password(bad).is_err(), "{bad:?} should fail");
        }
    }
}
