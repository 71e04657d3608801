#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod theme;
pub mod validate;

pub use api::{ApiClient, ApiClientBuilder, ApiRequest};
pub use config::{Config, MissingTokenPolicy};
pub use error::{ClientError, StorageError};
pub use session::{Session, SessionEvent, SessionState};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use theme::ThemeStore;

use std::sync::Arc;

/// Storage, session, theme and API client wired from one config.
pub struct Client {
    pub api: ApiClient,
    pub theme: ThemeStore,
}

impl Client {
    /// Uses `FileStorage` at `session.storage_path` when set, otherwise
    /// process-local storage.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let storage: Arc<dyn Storage> = match &config.session.storage_path {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => Arc::new(MemoryStorage::new()),
        };
        let session = Session::new(storage.clone());
        let api = ApiClientBuilder::from_config(config, session).build()?;
        Ok(Self {
            api,
            theme: ThemeStore::new(storage),
        })
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }
}
