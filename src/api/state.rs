//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::Settings;
use crate::storage::DailyStore;

/// Shared application state.
///
/// Contains the loaded settings, the daily record store and the lock that
/// serializes every write to the store's files.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    store: DailyStore,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state from loaded settings.
    pub fn new(settings: Settings) -> Self {
        let store = DailyStore::new(settings.storage.data_file.clone());
        Self {
            settings: Arc::new(settings),
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the daily record store.
    pub fn store(&self) -> &DailyStore {
        &self.store
    }

    /// Waits for exclusive write access to the store.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}
