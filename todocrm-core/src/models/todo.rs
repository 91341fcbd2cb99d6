//! Todo schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{max_chars, non_blank, null_as_empty, ValidationError, ValidationErrors};
use super::{Entity, EntityKind};
use crate::store::{DocumentId, DocumentPatch};

/// Maximum length for todo titles
const MAX_TITLE_LEN: usize = 500;

const TITLE_FIELD: &str = "Todo title";

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 500 characters
    ///
    /// # Example
    /// ```
    /// use todocrm_core::models::TodoTitle;
    ///
    /// assert_eq!(TodoTitle::new("  Buy milk ").unwrap().as_str(), "Buy milk");
    /// assert!(TodoTitle::new("").is_err());
    /// assert!(TodoTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = non_blank(s, TITLE_FIELD)?;
        max_chars(trimmed, TITLE_FIELD, MAX_TITLE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stored todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Older documents predate this field; they are shown.
    #[serde(default = "shown")]
    pub show_on_front: bool,
    pub created_at: DateTime<Utc>,
}

fn shown() -> bool {
    true
}

impl Entity for Todo {
    const KIND: EntityKind = EntityKind::Todo;
}

/// Create input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Validate and build the stored fields, applying creation defaults.
    pub fn validate(&self) -> Result<Map<String, Value>, ValidationErrors> {
        let title = TodoTitle::new(&self.title)?;

        let mut fields = Map::new();
        fields.insert("title".to_owned(), Value::String(title.into_string()));
        fields.insert("completed".to_owned(), Value::Bool(false));
        fields.insert("showOnFront".to_owned(), Value::Bool(true));
        Ok(fields)
    }
}

/// Partial update input; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on_front: Option<bool>,
}

impl TodoChanges {
    /// Validate touched fields and build the patch.
    pub fn validate(&self) -> Result<DocumentPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = self
            .title
            .as_deref()
            .and_then(|t| errors.check(TodoTitle::new(t)));

        errors.into_result(|| {
            let mut patch = DocumentPatch::new();
            if let Some(title) = title {
                patch.set("title", title.into_string());
            }
            if let Some(completed) = self.completed {
                patch.set("completed", completed);
            }
            if let Some(show_on_front) = self.show_on_front {
                patch.set("showOnFront", show_on_front);
            }
            patch
        })
    }
}
