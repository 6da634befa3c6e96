// ── Session model ──
//
// The authenticated user, as persisted by voltra-config. The token is the
// raw string the server issued (some older clients stored it with the
// "Bearer " prefix already attached; the API layer normalizes either way).

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Fallback avatar shown when the account has no photo.
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/32/3B82F6/FFFFFF?text=U";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// The credential, wrapped for in-memory handling.
    pub fn credential(&self) -> SecretString {
        SecretString::from(self.token.clone())
    }

    /// "First Last", trimmed when either half is empty.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn avatar_or_placeholder(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or(PLACEHOLDER_AVATAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_trims_missing_halves() {
        let session = Session {
            token: "t".into(),
            first_name: "Ana".into(),
            last_name: String::new(),
            avatar_url: None,
            created_at: Utc::now(),
        };
        assert_eq!(session.display_name(), "Ana");
        assert_eq!(session.avatar_or_placeholder(), PLACEHOLDER_AVATAR);
    }
}
