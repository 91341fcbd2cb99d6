//! todocrm-core: data-access layer for todos and contacts
//!
//! Entity schemas, the process-wide store connection, and the CRUD
//! operations every front end (HTTP, CLI) goes through.

pub mod config;
pub mod connection;
pub mod envelope;
pub mod error;
pub mod models;
pub mod repo;
pub mod store;

pub use config::{ExecutionContext, StartupConfigError, StoreConfig};
pub use connection::{ConnectionManager, Database};
pub use envelope::Envelope;
pub use error::{DataError, ErrorKind};
pub use models::{
    Contact, ContactChanges, EntityKind, NewContact, NewTodo, Todo, TodoChanges,
    ValidationError, ValidationErrors,
};
pub use repo::{ContactRepo, TodoRepo};
pub use store::{Connector, Document, DocumentId, DocumentPatch, DocumentStore, Store, StoreError};
