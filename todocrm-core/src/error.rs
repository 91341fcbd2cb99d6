//! Error taxonomy for data-access operations.
//!
//! Operations use these internally and convert them into an
//! [`Envelope`](crate::envelope::Envelope) at their boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EntityKind, ValidationErrors};
use crate::store::StoreError;

/// Why an operation failed.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Input rejected before any store access
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// No entity with the given id
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, id: String },

    /// The store call (or connecting to the store) failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl DataError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Failure class carried alongside an envelope, for choosing status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}
