//! Wire types shared with the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer credential issued by `POST users/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    /// RFC 3339 on the wire
    pub expiration: DateTime<Utc>,
    pub admin: bool,
}

impl Token {
    /// Whether the token's expiration lies at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Privilege tier a request requires
///
/// Ordered from least to most privileged, so `AuthLevel::Admin > AuthLevel::User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    /// Public endpoint, never sends a token
    None,
    /// Any logged in user
    #[default]
    User,
    /// Token must carry the admin flag
    Admin,
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::User => "user",
            Self::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// Login and registration payload
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialModel {
    pub email: String,
    pub password: String,
}

impl CredentialModel {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CredentialModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialModel")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST sessions`. Each phase boundary is RFC 3339 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionModel {
    pub name: String,
    pub phase1: DateTime<Utc>,
    pub phase2: DateTime<Utc>,
    pub phase3: DateTime<Utc>,
}

/// Body of `POST sessions/images`, attaching an image to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionImageModel {
    pub image: i32,
    pub session: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_auth_level_ordering() {
        assert!(AuthLevel::None < AuthLevel::User);
        assert!(AuthLevel::User < AuthLevel::Admin);
        assert_eq!(AuthLevel::default(), AuthLevel::User);
    }

    #[test]
    fn test_token_wire_format() {
        let json = r#"{"token":"9b2f5c1e-0000-4000-8000-000000000001","expiration":"2031-05-04T10:00:00Z","admin":true}"#;
        let token: Token = serde_json::from_str(json).unwrap();

        assert_eq!(token.token, "9b2f5c1e-0000-4000-8000-000000000001");
        assert_eq!(
            token.expiration,
            Utc.with_ymd_and_hms(2031, 5, 4, 10, 0, 0).unwrap()
        );
        assert!(token.admin);
    }

    #[test]
    fn test_token_accepts_offset_timestamps() {
        let json = r#"{"token":"t","expiration":"2031-05-04T12:00:00+02:00","admin":false}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(
            token.expiration,
            Utc.with_ymd_and_hms(2031, 5, 4, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        let token = Token {
            token: "t".into(),
            expiration: now + Duration::minutes(5),
            admin: false,
        };
        assert!(!token.is_expired_at(now));
        assert!(token.is_expired_at(now + Duration::minutes(5)));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = CredentialModel::new("ada@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("ada@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_session_phases_serialize_as_rfc3339() {
        let session = SessionModel {
            name: "Spring".into(),
            phase1: Utc.with_ymd_and_hms(2031, 3, 1, 0, 0, 0).unwrap(),
            phase2: Utc.with_ymd_and_hms(2031, 3, 15, 0, 0, 0).unwrap(),
            phase3: Utc.with_ymd_and_hms(2031, 4, 1, 12, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["phase1"], "2031-03-01T00:00:00Z");
        assert_eq!(value["phase3"], "2031-04-01T12:30:00Z");
    }
}
