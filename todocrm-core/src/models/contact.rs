//! Contact schema

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{
    max_chars, non_blank, null_as_empty, optional_trimmed, ValidationError, ValidationErrors,
};
use super::{Entity, EntityKind};
use crate::store::{DocumentId, DocumentPatch};

/// Maximum length for contact names
const MAX_NAME_LEN: usize = 100;

/// Maximum length for contact notes
const MAX_NOTES_LEN: usize = 1000;

const NAME_FIELD: &str = "Contact name";
const EMAIL_FIELD: &str = "Contact email";
const NOTES_FIELD: &str = "Contact notes";

/// `local@domain.tld`: ASCII word runs joined by single `.` or `-`, ending
/// in one or more 2-3 character segments.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("invalid email regex")
});

/// Validated contact name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// Non-empty after trimming, max 100 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = non_blank(s, NAME_FIELD)?;
        max_chars(trimmed, NAME_FIELD, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated, normalized email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Create a new email, trimmed and lowercased.
    ///
    /// # Example
    /// ```
    /// use todocrm_core::models::Email;
    ///
    /// assert_eq!(Email::new("  A@B.COM ").unwrap().as_str(), "a@b.com");
    /// assert!(Email::new("").is_err());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = non_blank(s, EMAIL_FIELD)?.to_lowercase();

        if !EMAIL_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field: EMAIL_FIELD,
                reason: "must be a valid email address",
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trimmed notes; blank means absent.
fn notes(s: &str) -> Result<Option<String>, ValidationError> {
    optional_trimmed(Some(s))
        .map(|n| max_chars(n, NOTES_FIELD, MAX_NOTES_LEN))
        .transpose()
}

/// Stored contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;
}

/// Create input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Validate and build the stored fields (without timestamps).
    ///
    /// Blank required fields report "is required"; blank optional fields
    /// are left out.
    pub fn validate(&self) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.check(ContactName::new(&self.name).map_err(ValidationError::into_required));
        let email = errors.check(Email::new(&self.email).map_err(ValidationError::into_required));
        let notes = self
            .notes
            .as_deref()
            .and_then(|n| errors.check(notes(n)))
            .flatten();

        let (name, email) = match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => (name, email),
            _ => return Err(errors),
        };

        let mut fields = Map::new();
        fields.insert("name".to_owned(), Value::String(name.into_string()));
        fields.insert("email".to_owned(), Value::String(email.into_string()));
        let optional = [
            ("phone", optional_trimmed(self.phone.as_deref())),
            ("company", optional_trimmed(self.company.as_deref())),
            ("notes", notes),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_owned(), Value::String(value));
            }
        }
        Ok(fields)
    }
}

/// Partial update input; `None` leaves the field untouched, a blank
/// optional field is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactChanges {
    /// Validate touched fields and build the patch (without `updatedAt`).
    pub fn validate(&self) -> Result<DocumentPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self
            .name
            .as_deref()
            .and_then(|n| errors.check(ContactName::new(n)));
        let email = self
            .email
            .as_deref()
            .and_then(|e| errors.check(Email::new(e)));
        let notes = self
            .notes
            .as_deref()
            .and_then(|n| errors.check(notes(n)));

        errors.into_result(|| {
            let mut patch = DocumentPatch::new();
            if let Some(name) = name {
                patch.set("name", name.into_string());
            }
            if let Some(email) = email {
                patch.set("email", email.into_string());
            }
            let optional = [
                ("phone", self.phone.as_deref().map(|p| optional_trimmed(Some(p)))),
                ("company", self.company.as_deref().map(|c| optional_trimmed(Some(c)))),
                ("notes", notes),
            ];
            for (key, change) in optional {
                match change {
                    Some(Some(value)) => {
                        patch.set(key, value);
                    }
                    Some(None) => {
                        patch.unset(key);
                    }
                    None => {}
                }
            }
            patch
        })
    }
}
