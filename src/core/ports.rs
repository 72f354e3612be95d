// Ports define what the application needs from the outside world,
// without implementing it.
//
// Responsibilities
// - RecordStore: the persistent key-value store holding the three record
//   lists, full-replace writes only.
// - SummarySink / SummaryFeed: the remote weekly-summary mirror and its
//   change feed.
// - SyncObserver: where upsert outcomes are reported, so failures are
//   inspectable without reading logs.
//
// Boundaries
// - No concrete storage or transport here. Adapters implement these
//   traits in the adapters layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::core::employee::{Employee, StoredEmployee};
use crate::core::project::{Project, StoredProject};
use crate::core::time_entry::TimeEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed {key} data: {reason}")]
    Malformed { key: &'static str, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}

/// The three record lists live under fixed keys. Loads return the stored
/// shapes so the caller can apply the load-time upgrade rules; `None`
/// means the key has never been written.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_employees(&self) -> Result<Option<Vec<StoredEmployee>>, StoreError>;
    async fn load_projects(&self) -> Result<Option<Vec<StoredProject>>, StoreError>;
    async fn load_time_entries(&self) -> Result<Option<Vec<TimeEntry>>, StoreError>;

    async fn save_employees(&self, employees: &[Employee]) -> Result<(), StoreError>;
    async fn save_projects(&self, projects: &[Project]) -> Result<(), StoreError>;
    async fn save_time_entries(&self, entries: &[TimeEntry]) -> Result<(), StoreError>;
}

/// One row of the remote weekly-summary table, keyed by remote id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub id: Uuid,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_hours: f64,
    pub total_cost: f64,
    pub entries: u32,
}

/// Insert-or-update payload for the remote table, keyed by
/// (employee, week start). The cost is a plain number: a missing cost is
/// substituted with zero before it gets here, never sent as null.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryUpsert {
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_hours: f64,
    pub total_cost: f64,
    pub entries: u32,
}

#[derive(Debug, Error)]
pub enum SummarySinkError {
    #[error("remote rejected upsert: {0}")]
    Rejected(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Insert or update the row for (employee, week start) and return the
    /// row as the remote now holds it, remote id included.
    async fn upsert(&self, row: SummaryUpsert) -> Result<SummaryRow, SummarySinkError>;
}

/// A change-feed notification carrying the affected row's state.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryChange {
    Inserted(SummaryRow),
    Updated(SummaryRow),
    /// Carries the row's last known (old) state.
    Deleted(SummaryRow),
}

#[async_trait]
pub trait SummaryFeed: Send + Sync {
    /// Register for changes to the remote table, filtered to one
    /// employee. Dropping the receiver releases the subscription.
    async fn subscribe(&self, employee_id: &str) -> mpsc::Receiver<SummaryChange>;
}

/// Outcome reporting for fire-and-forget upserts. The local view stays
/// authoritative either way; this exists so the host can observe
/// failures instead of scraping logs.
pub trait SyncObserver: Send + Sync {
    fn upsert_completed(&self, row: &SummaryRow);
    fn upsert_failed(&self, employee_id: &str, week_start: NaiveDate, error: &SummarySinkError);
}
