// File-backed implementation of the RecordStore port: one JSON document
// per record list in a data directory, full-replace writes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::employee::{Employee, StoredEmployee};
use crate::core::ports::{RecordStore, StoreError};
use crate::core::project::{Project, StoredProject};
use crate::core::time_entry::TimeEntry;

const EMPLOYEES_FILE: &str = "employees.json";
const PROJECTS_FILE: &str = "projects.json";
const TIME_ENTRIES_FILE: &str = "time_entries.json";

pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    /// Creates the data directory when it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { dir })
    }

    fn load_file<T: DeserializeOwned>(
        &self,
        file: &str,
        key: &'static str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let raw = match std::fs::read_to_string(self.dir.join(file)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                key,
                reason: e.to_string(),
            })
    }

    fn save_file<T: Serialize>(&self, file: &str, values: &[T]) -> Result<(), StoreError> {
        let raw =
            serde_json::to_vec_pretty(values).map_err(|e| StoreError::Backend(e.to_string()))?;
        std::fs::write(self.dir.join(file), raw).map_err(|e| StoreError::Backend(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn load_employees(&self) -> Result<Option<Vec<StoredEmployee>>, StoreError> {
        self.load_file(EMPLOYEES_FILE, "employees")
    }

    async fn load_projects(&self) -> Result<Option<Vec<StoredProject>>, StoreError> {
        self.load_file(PROJECTS_FILE, "projects")
    }

    async fn load_time_entries(&self) -> Result<Option<Vec<TimeEntry>>, StoreError> {
        self.load_file(TIME_ENTRIES_FILE, "time_entries")
    }

    async fn save_employees(&self, employees: &[Employee]) -> Result<(), StoreError> {
        let stored: Vec<StoredEmployee> = employees.iter().map(StoredEmployee::from).collect();
        self.save_file(EMPLOYEES_FILE, &stored)
    }

    async fn save_projects(&self, projects: &[Project]) -> Result<(), StoreError> {
        let stored: Vec<StoredProject> = projects.iter().map(StoredProject::from).collect();
        self.save_file(PROJECTS_FILE, &stored)
    }

    async fn save_time_entries(&self, entries: &[TimeEntry]) -> Result<(), StoreError> {
        self.save_file(TIME_ENTRIES_FILE, entries)
    }
}
