//! PostgreSQL backend - schema and document store
//!
//! # Design Principles
//!
//! - One JSONB row per document, keyed by (collection, id)
//! - Every store call is a single statement, so single-document writes
//!   are atomic without explicit transactions
//! - Partial updates merge into the stored body in SQL; no read-modify-write

pub mod migrations;
pub mod store;

pub use store::PgStore;
