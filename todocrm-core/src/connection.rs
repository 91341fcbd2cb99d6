//! Process-wide store connection
//!
//! [`ConnectionManager`] establishes the store handle lazily, at most once
//! per process. Callers that arrive while the first attempt is in flight
//! await that same attempt. A failed attempt is dropped so the next caller
//! starts over; a successful handle is kept for the rest of the process.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::config::StoreConfig;
use crate::store::{Connector, Store, StoreError};

type Attempt = Shared<BoxFuture<'static, Result<Store, StoreError>>>;

enum Slot {
    Idle,
    Connecting(Attempt),
    Ready(Store),
}

/// Lazily connected, memoized store handle.
pub struct ConnectionManager {
    uri: String,
    connector: Arc<dyn Connector>,
    slot: Mutex<Slot>,
}

impl ConnectionManager {
    pub fn new(uri: impl Into<String>, connector: Arc<dyn Connector>) -> Self {
        Self {
            uri: uri.into(),
            connector,
            slot: Mutex::new(Slot::Idle),
        }
    }

    /// Manager around an already established handle.
    pub fn ready(store: Store) -> Self {
        Self {
            uri: String::new(),
            connector: Arc::new(Unreachable),
            slot: Mutex::new(Slot::Ready(store)),
        }
    }

    /// Get the shared handle, connecting on first use.
    pub async fn connect(&self) -> Result<Store, StoreError> {
        let attempt = {
            let mut slot = self.lock();
            match &*slot {
                Slot::Ready(store) => return Ok(Arc::clone(store)),
                Slot::Connecting(attempt) => attempt.clone(),
                Slot::Idle => {
                    tracing::debug!("establishing document store connection");
                    let connector = Arc::clone(&self.connector);
                    let uri = self.uri.clone();
                    let attempt = async move { connector.connect(&uri).await }
                        .boxed()
                        .shared();
                    *slot = Slot::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        let mut slot = self.lock();
        // Only the attempt still on record may settle the slot.
        if let Slot::Connecting(current) = &*slot {
            if current.ptr_eq(&attempt) {
                *slot = match &result {
                    Ok(store) => {
                        tracing::info!("document store connected");
                        Slot::Ready(Arc::clone(store))
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "document store connection failed");
                        Slot::Idle
                    }
                };
            }
        }

        result
    }

    pub fn is_connected(&self) -> bool {
        matches!(&*self.lock(), Slot::Ready(_))
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // The slot is always left in a valid state, so a poisoned lock is usable.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

struct Unreachable;

#[async_trait::async_trait]
impl Connector for Unreachable {
    async fn connect(&self, uri: &str) -> Result<Store, StoreError> {
        Err(StoreError::UnsupportedScheme(uri.to_owned()))
    }
}

/// Database context handed to every data-access operation.
///
/// Cheap to clone; all clones share one [`ConnectionManager`].
#[derive(Clone, Debug)]
pub struct Database {
    manager: Arc<ConnectionManager>,
}

impl Database {
    pub fn new(config: &StoreConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            manager: Arc::new(ConnectionManager::new(config.database_url(), connector)),
        }
    }

    /// Context around an existing handle, e.g. an in-memory store in tests.
    pub fn from_store(store: Store) -> Self {
        Self {
            manager: Arc::new(ConnectionManager::ready(store)),
        }
    }

    pub async fn connect(&self) -> Result<Store, StoreError> {
        self.manager.connect().await
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }
}
