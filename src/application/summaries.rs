// Summary synchronization: compute locally, upsert remotely, merge the
// change feed back in.
//
// Responsibilities
// - refresh: recompute an employee's weekly summaries, replace the
//   displayed list, then fire one non-blocking upsert per week. The
//   refreshed list is observable before any upsert lands; outcomes go to
//   the SyncObserver.
// - apply_change: fold a feed notification into the displayed list,
//   merging by remote id so an echo of our own write never duplicates a
//   row.
// - watch_employee: keep exactly one feed subscription alive, for the
//   employee currently being viewed.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::employee::Employee;
use crate::core::ports::{
    SummaryChange, SummaryFeed, SummaryRow, SummarySink, SummarySinkError, SummaryUpsert,
    SyncObserver,
};
use crate::core::project::Project;
use crate::core::summary::employee_weekly_summaries;
use crate::core::time_entry::TimeEntry;

/// Logs upsert outcomes; the default observer when the host installs
/// nothing else.
pub struct LoggingObserver;

impl SyncObserver for LoggingObserver {
    fn upsert_completed(&self, row: &SummaryRow) {
        debug!(employee_id = %row.employee_id, week_start = %row.week_start, "summary upsert completed");
    }

    fn upsert_failed(&self, employee_id: &str, week_start: NaiveDate, error: &SummarySinkError) {
        warn!(%employee_id, %week_start, %error, "summary upsert failed");
    }
}

pub struct SummaryService {
    sink: Arc<dyn SummarySink>,
    feed: Arc<dyn SummaryFeed>,
    observer: Arc<dyn SyncObserver>,
    board: RwLock<HashMap<String, Vec<SummaryRow>>>,
    watch: Mutex<Option<(String, JoinHandle<()>)>>,
}

impl SummaryService {
    pub fn new(
        sink: Arc<dyn SummarySink>,
        feed: Arc<dyn SummaryFeed>,
        observer: Arc<dyn SyncObserver>,
    ) -> Self {
        Self {
            sink,
            feed,
            observer,
            board: RwLock::new(HashMap::new()),
            watch: Mutex::new(None),
        }
    }

    /// The displayed summary list for an employee, most recent week
    /// first.
    pub async fn summaries(&self, employee_id: &str) -> Vec<SummaryRow> {
        self.board
            .read()
            .await
            .get(employee_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Recompute, replace the displayed list, and push each week to the
    /// remote without waiting for it. Returns the locally computed rows.
    pub async fn refresh(
        self: &Arc<Self>,
        employee: &Employee,
        entries: &[TimeEntry],
        projects: &[Project],
    ) -> Vec<SummaryRow> {
        let summaries = employee_weekly_summaries(employee, entries, projects);

        let mut board = self.board.write().await;
        let previous = board.remove(&employee.id).unwrap_or_default();
        let rows: Vec<SummaryRow> = summaries
            .into_iter()
            .map(|summary| {
                // Keep the remote id stable for a week we already display.
                let id = previous
                    .iter()
                    .find(|row| row.week_start == summary.week_start)
                    .map(|row| row.id)
                    .unwrap_or_else(Uuid::now_v7);
                SummaryRow {
                    id,
                    employee_id: employee.id.clone(),
                    week_start: summary.week_start,
                    week_end: summary.week_end,
                    total_hours: summary.total_hours,
                    total_cost: summary.total_cost,
                    entries: summary.entries,
                }
            })
            .collect();
        board.insert(employee.id.clone(), rows.clone());
        drop(board);

        for row in &rows {
            let upsert = SummaryUpsert {
                employee_id: row.employee_id.clone(),
                week_start: row.week_start,
                week_end: row.week_end,
                total_hours: row.total_hours,
                total_cost: row.total_cost,
                entries: row.entries,
            };
            let service = Arc::clone(self);
            tokio::spawn(async move {
                let employee_id = upsert.employee_id.clone();
                let week_start = upsert.week_start;
                match service.sink.upsert(upsert).await {
                    Ok(row) => {
                        service.observer.upsert_completed(&row);
                        service.merge(row, false).await;
                    }
                    Err(error) => {
                        service
                            .observer
                            .upsert_failed(&employee_id, week_start, &error);
                    }
                }
            });
        }

        rows
    }

    /// Fold one change-feed notification into the displayed list.
    pub async fn apply_change(&self, change: SummaryChange) {
        match change {
            SummaryChange::Inserted(row) | SummaryChange::Updated(row) => {
                self.merge(row, false).await;
            }
            SummaryChange::Deleted(row) => {
                self.merge(row, true).await;
            }
        }
    }

    /// Subscribe to the feed for one employee, replacing any previous
    /// subscription. The old worker is aborted, which drops its receiver
    /// and with it the old subscription.
    pub async fn watch_employee(self: &Arc<Self>, employee_id: &str) {
        let mut watch = self.watch.lock().await;
        if let Some((current, _)) = watch.as_ref() {
            if current == employee_id {
                return;
            }
        }
        if let Some((_, handle)) = watch.take() {
            handle.abort();
        }

        let mut receiver = self.feed.subscribe(employee_id).await;
        let service = Arc::clone(self);
        let handle = tokio::spawn(async move {
            while let Some(change) = receiver.recv().await {
                service.apply_change(change).await;
            }
        });
        *watch = Some((employee_id.to_string(), handle));
    }

    /// Merge by remote id; a row for the same (employee, week) under a
    /// different id is treated as the same logical row rather than
    /// appended, so re-keyed echoes cannot duplicate weeks.
    async fn merge(&self, row: SummaryRow, remove: bool) {
        let mut board = self.board.write().await;
        let rows = board.entry(row.employee_id.clone()).or_default();
        let position = rows
            .iter()
            .position(|existing| existing.id == row.id)
            .or_else(|| {
                rows.iter()
                    .position(|existing| existing.week_start == row.week_start)
            });
        match (position, remove) {
            (Some(index), true) => {
                rows.remove(index);
            }
            (Some(index), false) => rows[index] = row,
            (None, true) => {}
            (None, false) => {
                rows.push(row);
                rows.sort_by(|a, b| b.week_start.cmp(&a.week_start));
            }
        }
    }
}
