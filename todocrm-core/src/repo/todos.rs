//! Todo operations

use super::{settle, Action};
use crate::connection::Database;
use crate::envelope::Envelope;
use crate::error::DataError;
use crate::models::{NewTodo, Todo, TodoChanges};
use crate::store::Document;

/// Todo repository
pub struct TodoRepo<'a> {
    db: &'a Database,
}

impl<'a> TodoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a todo. `completed` starts false and `showOnFront` true.
    pub async fn create(&self, input: &NewTodo) -> Envelope<Todo> {
        settle::<Todo, _>(Action::Create, self.try_create(input).await)
    }

    /// All todos, newest first.
    pub async fn list(&self) -> Envelope<Vec<Todo>> {
        settle::<Todo, _>(Action::List, super::find_all::<Todo>(self.db).await)
    }

    /// Apply the given fields only.
    pub async fn update(&self, id: &str, changes: &TodoChanges) -> Envelope<Todo> {
        settle::<Todo, _>(Action::Update, self.try_update(id, changes).await)
    }

    /// Remove a todo, returning its last state.
    pub async fn delete(&self, id: &str) -> Envelope<Todo> {
        let result = super::delete::<Todo>(self.db, id).await;
        if let Ok(todo) = &result {
            tracing::info!(id = %todo.id, "todo deleted");
        }
        settle::<Todo, _>(Action::Delete, result)
    }

    async fn try_create(&self, input: &NewTodo) -> Result<Todo, DataError> {
        let fields = input.validate()?;
        let todo: Todo = super::insert(self.db, Document::new(fields)).await?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn try_update(&self, id: &str, changes: &TodoChanges) -> Result<Todo, DataError> {
        let patch = changes.validate()?;
        let todo: Todo = super::update(self.db, id, &patch).await?;
        tracing::info!(id = %todo.id, "todo updated");
        Ok(todo)
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
    async fn buy_milk_lifecycle() {
        let (db, _) = db();
        let repo = TodoRepo::new(&db);

        let created = repo.create(&NewTodo::new("Buy milk")).await;
        assert!(created.success);
        let todo = created.data.unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert!(todo.show_on_front);

        let id = todo.id.to_string();
        let updated = repo
            .update(
                &id,
                &TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .data
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.created_at, todo.created_at);

        let deleted = repo.delete(&id).await.data.unwrap();
        assert_eq!(deleted, updated);

        let listed = repo.list().await.data.unwrap();
        assert!(listed.iter().all(|t| t.id != todo.id));
    }

    #[tokio::test]
    async fn blank_title_writes_nothing() {
        let (db, store) = db();
        let env = TodoRepo::new(&db).create(&NewTodo::new("   ")).await;

        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("Todo title cannot be empty"));
        assert_eq!(env.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(store.count("todos").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_rejects_blanking_title() {
        let (db, _) = db();
        let repo = TodoRepo::new(&db);
        let todo = repo.create(&NewTodo::new("Keep me")).await.data.unwrap();

        let env = repo
            .update(
                &todo.id.to_string(),
                &TodoChanges {
                    title: Some(" ".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(!env.success);
        assert_eq!(repo.list().await.data.unwrap()[0].title, "Keep me");
    }

    #[tokio::test]
    async fn unparseable_id_is_not_found() {
        let (db, _) = db();
        let env = TodoRepo::new(&db).delete("not-a-uuid").await;
        assert_eq!(env.error.as_deref(), Some("Todo not found"));
        assert_eq!(env.error_kind(), Some(ErrorKind::NotFound));
    }
}
