//! Data models for the TinyApp URL shortener
//!
//! This module defines the records kept in the stores and the form payloads
//! accepted by the request handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL as stored in the URL store
///
/// Serialized field names follow the `/urls.json` dump format:
///
/// ```json
/// {
///   "shortURL": "b2xVn2",
///   "longURL": "http://www.lighthouselabs.ca",
///   "userId": null,
///   "createdAt": "2026-01-17T13:40:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Six character public identifier (e.g., "b2xVn2")
    #[serde(rename = "shortURL")]
    pub short_code: String,

    /// Destination the short code redirects to; never validated
    #[serde(rename = "longURL")]
    pub long_url: String,

    /// Account that created the record
    ///
    /// Absent for seeded records and for links submitted without a session.
    /// Only the owner may edit or delete the record.
    #[serde(rename = "userId")]
    pub owner_account_id: Option<String>,

    /// Timestamp when this record was created, used to order listings
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn new(short_code: String, long_url: String, owner_account_id: Option<String>) -> Self {
        Self {
            short_code,
            long_url,
            owner_account_id,
            created_at: Utc::now(),
        }
    }

    /// Whether `account_id` is allowed to edit or delete this record.
    pub fn is_owned_by(&self, account_id: &str) -> bool {
        self.owner_account_id.as_deref() == Some(account_id)
    }
}

/// A registered account as stored in the account store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub email: String,

    /// Argon2 PHC string; the plaintext password is never stored
    #[serde(rename = "password")]
    pub password_hash: String,
}

/// Form payload for both `/login` and `/register`
///
/// Missing fields deserialize as empty strings so the handlers can answer
/// with a plain 400 instead of a form rejection.
#[derive(Deserialize, Debug, Default)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Form payload for creating or editing a short URL
#[derive(Deserialize, Debug, Default)]
pub struct LongUrlForm {
    #[serde(rename = "longURL", default)]
    pub long_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_record_json_field_names() {
        let record = UrlRecord::new("b2xVn2".into(), "http://www.lighthouselabs.ca".into(), None);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["shortURL"], "b2xVn2");
        assert_eq!(value["longURL"], "http://www.lighthouselabs.ca");
        assert!(value["userId"].is_null());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_ownership() {
        let owned = UrlRecord::new("abc123".into(), "https://example.com".into(), Some("u1".into()));
        assert!(owned.is_owned_by("u1"));
        assert!(!owned.is_owned_by("u2"));

        let seeded = UrlRecord::new("9sm5xK".into(), "http://www.google.com".into(), None);
        assert!(!seeded.is_owned_by("u1"));
    }

    #[test]
    fn test_account_hash_is_serialized_as_password() {
        let account = Account {
            id: "u1".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$...".into(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["password"], "$argon2id$...");
    }
}
