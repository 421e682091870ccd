//! Document store adapters
//!
//! The store is opened at the start of a batch pass and closed when it
//! ends; no connection outlives the request that needed it.

mod json_file;
mod postgres;

pub use json_file::JsonFileDocumentStore;
pub use postgres::PgDocumentStore;

use textlens::{DocumentStore, DomainError};

use crate::config::{StoreConfig, StoreLocation};

/// A store opened for one batch pass
pub enum OpenedStore {
    Postgres(PgDocumentStore),
    File(JsonFileDocumentStore),
}

impl OpenedStore {
    pub fn as_store(&self) -> &dyn DocumentStore {
        match self {
            OpenedStore::Postgres(store) => store,
            OpenedStore::File(store) => store,
        }
    }

    /// Release the underlying connection or file handle
    pub async fn close(self) {
        match self {
            OpenedStore::Postgres(store) => store.close().await,
            OpenedStore::File(_) => {}
        }
    }
}

/// Open the configured store
pub async fn open_store(config: &StoreConfig) -> Result<OpenedStore, DomainError> {
    match &config.location {
        StoreLocation::Postgres(uri) => {
            let store = PgDocumentStore::connect(uri, &config.collection).await?;
            Ok(OpenedStore::Postgres(store))
        }
        StoreLocation::File(path) => {
            let store = JsonFileDocumentStore::open(path, &config.collection).await?;
            Ok(OpenedStore::File(store))
        }
    }
}
