//! Contact operations

use chrono::{SubsecRound, Utc};
use serde_json::Value;

use super::{settle, Action};
use crate::connection::Database;
use crate::envelope::Envelope;
use crate::error::DataError;
use crate::models::{timestamp, Contact, ContactChanges, NewContact};
use crate::store::Document;

/// Contact repository
pub struct ContactRepo<'a> {
    db: &'a Database,
}

impl<'a> ContactRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: &NewContact) -> Envelope<Contact> {
        settle::<Contact, _>(Action::Create, self.try_create(input).await)
    }

    /// All contacts, newest first.
    pub async fn list(&self) -> Envelope<Vec<Contact>> {
        settle::<Contact, _>(Action::List, super::find_all::<Contact>(self.db).await)
    }

    /// Apply the given fields only and refresh `updatedAt`.
    pub async fn update(&self, id: &str, changes: &ContactChanges) -> Envelope<Contact> {
        settle::<Contact, _>(Action::Update, self.try_update(id, changes).await)
    }

    pub async fn delete(&self, id: &str) -> Envelope<Contact> {
        let result = super::delete::<Contact>(self.db, id).await;
        if let Ok(contact) = &result {
            tracing::info!(id = %contact.id, "contact deleted");
        }
        settle::<Contact, _>(Action::Delete, result)
    }

    async fn try_create(&self, input: &NewContact) -> Result<Contact, DataError> {
        let fields = input.validate()?;
        let mut doc = Document::new(fields);
        doc.fields.insert(
            "updatedAt".to_owned(),
            Value::String(timestamp(doc.created_at)),
        );
        let contact: Contact = super::insert(self.db, doc).await?;
        tracing::info!(id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn try_update(&self, id: &str, changes: &ContactChanges) -> Result<Contact, DataError> {
        let mut patch = changes.validate()?;
        patch.set("updatedAt", timestamp(Utc::now().trunc_subsecs(6)));
        let contact: Contact = super::update(self.db, id, &patch).await?;
        tracing::info!(id = %contact.id, "contact updated");
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{DocumentStore, MemoryStore};

    fn db() -> (Database, MemoryStore) {
        let store = MemoryStore::new();
        (Database::from_store(store.clone().into_store()), store)
    }

    #[tokio::test]
    async fn missing_email_is_required() {
        let (db, store) = db();
        let env = ContactRepo::new(&db)
            .create(&NewContact::new("Jo", ""))
            .await;

        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("Contact email is required"));
        assert_eq!(store.count("contacts").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn created_contact_is_normalized() {
        let (db, _) = db();
        let input = NewContact {
            phone: Some("".into()),
            notes: Some("  met at conf  ".into()),
            ..NewContact::new("  Jo  ", "  A@B.COM ")
        };
        let contact = ContactRepo::new(&db).create(&input).await.data.unwrap();

        assert_eq!(contact.name, "Jo");
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.notes.as_deref(), Some("met at conf"));
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_and_clears_blank_optional() {
        let (db, _) = db();
        let repo = ContactRepo::new(&db);
        let input = NewContact {
            company: Some("Acme".into()),
            ..NewContact::new("Jo", "jo@example.com")
        };
        let contact = repo.create(&input).await.data.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let updated = repo
            .update(
                &contact.id.to_string(),
                &ContactChanges {
                    company: Some("   ".into()),
                    email: Some(" JO@NEW.COM".into()),
                    ..Default::default()
                },
            )
            .await
            .data
            .unwrap();

        assert_eq!(updated.company, None);
        assert_eq!(updated.email, "jo@new.com");
        assert_eq!(updated.name, "Jo");
        assert_eq!(updated.created_at, contact.created_at);
        assert!(updated.updated_at > contact.updated_at);
    }

    #[tokio::test]
    async fn update_missing_contact() {
        let (db, _) = db();
        let env = ContactRepo::new(&db)
            .update(
                &crate::store::DocumentId::new().to_string(),
                &ContactChanges {
                    name: Some("Nobody".into()),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(env.error.as_deref(), Some("Contact not found"));
        assert_eq!(env.error_kind(), Some(ErrorKind::NotFound));
    }
}
