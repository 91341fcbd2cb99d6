//! Application state shared across handlers

use std::sync::Arc;

use todocrm_core::Database;

use crate::revalidate::Revalidator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    revalidator: Revalidator,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self::with_revalidator(db, Revalidator::new())
    }

    pub fn with_revalidator(db: Database, revalidator: Revalidator) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, revalidator }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn revalidator(&self) -> &Revalidator {
        &self.inner.revalidator
    }
}
