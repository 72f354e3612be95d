// In memory implementation of the RecordStore port.
//
// Purpose
// - Support application tests and local development without a data
//   directory.
//
// Responsibilities
// - Hold the three lists as raw JSON strings under their fixed keys,
//   so malformed-data paths stay reachable from tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::core::employee::{Employee, StoredEmployee};
use crate::core::ports::{RecordStore, StoreError};
use crate::core::project::{Project, StoredProject};
use crate::core::time_entry::TimeEntry;

pub const EMPLOYEES_KEY: &str = "employees";
pub const PROJECTS_KEY: &str = "projects";
pub const TIME_ENTRIES_KEY: &str = "time_entries";

#[derive(Default)]
pub struct InMemoryRecordStore {
    values: RwLock<HashMap<&'static str, String>>,
    offline: bool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every save fail, for write-error tests.
    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    /// Plant raw (possibly malformed) JSON under a key.
    pub async fn inject_raw(&self, key: &'static str, raw: impl Into<String>) {
        self.values.write().await.insert(key, raw.into());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn load<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let guard = self.values.read().await;
        let Some(raw) = guard.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                key,
                reason: e.to_string(),
            })
    }

    async fn save<T: Serialize>(&self, key: &'static str, values: &[T]) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("record store offline".into()));
        }
        let raw = serde_json::to_string(values).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.values.write().await.insert(key, raw);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load_employees(&self) -> Result<Option<Vec<StoredEmployee>>, StoreError> {
        self.load(EMPLOYEES_KEY).await
    }

    async fn load_projects(&self) -> Result<Option<Vec<StoredProject>>, StoreError> {
        self.load(PROJECTS_KEY).await
    }

    async fn load_time_entries(&self) -> Result<Option<Vec<TimeEntry>>, StoreError> {
        self.load(TIME_ENTRIES_KEY).await
    }

    async fn save_employees(&self, employees: &[Employee]) -> Result<(), StoreError> {
        let stored: Vec<StoredEmployee> = employees.iter().map(StoredEmployee::from).collect();
        self.save(EMPLOYEES_KEY, &stored).await
    }

    async fn save_projects(&self, projects: &[Project]) -> Result<(), StoreError> {
        let stored: Vec<StoredProject> = projects.iter().map(StoredProject::from).collect();
        self.save(PROJECTS_KEY, &stored).await
    }

    async fn save_time_entries(&self, entries: &[TimeEntry]) -> Result<(), StoreError> {
        self.save(TIME_ENTRIES_KEY, entries).await
    }
}
