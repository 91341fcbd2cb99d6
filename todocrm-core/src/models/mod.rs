//! Entity schemas with validation at write time
//!
//! All user input is validated before it reaches the store. Invalid input
//! returns [`ValidationErrors`], not panic.

pub mod contact;
pub mod todo;
pub mod validation;

use std::fmt;

use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Document, StoreError};

pub use contact::{Contact, ContactChanges, ContactName, Email, NewContact};
pub use todo::{NewTodo, Todo, TodoChanges, TodoTitle};
pub use validation::{ValidationError, ValidationErrors};

/// The two kinds of record this application stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Todo,
    Contact,
}

impl EntityKind {
    /// Store collection holding this kind.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Todo => "todos",
            Self::Contact => "contacts",
        }
    }

    /// Name used in user-facing messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record type backed by one store collection.
///
/// `id` and `createdAt` live on the [`Document`] itself; every other field
/// lives in the document's field map under its wire name.
pub trait Entity: Serialize + DeserializeOwned + Send + 'static {
    const KIND: EntityKind;

    fn from_document(doc: Document) -> Result<Self, StoreError> {
        let Document {
            id,
            created_at,
            mut fields,
        } = doc;
        fields.insert("id".to_owned(), Value::String(id.to_string()));
        fields.insert("createdAt".to_owned(), Value::String(timestamp(created_at)));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| StoreError::malformed(Self::KIND.collection(), id, e))
    }
}

/// Wire/storage form of a timestamp.
pub(crate) fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(EntityKind::Todo.collection(), "todos");
        assert_eq!(EntityKind::Contact.collection(), "contacts");
        assert_eq!(EntityKind::Contact.to_string(), "Contact");
        assert_eq!(serde_json::to_value(EntityKind::Todo).unwrap(), "todo");
    }
}
