// In memory implementation of the SummarySink and SummaryFeed ports.
//
// Purpose
// - Stand in for the remote weekly-summary table in tests and local
//   development.
//
// Responsibilities
// - Upsert rows keyed by (employee, week start), keeping the remote id
//   of an existing row stable.
// - Echo every change to subscribers filtered by employee id, the way
//   the remote change feed would.

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::core::ports::{
    SummaryChange, SummaryFeed, SummaryRow, SummarySink, SummarySinkError, SummaryUpsert,
};

#[derive(Default)]
pub struct InMemorySummarySink {
    rows: RwLock<Vec<SummaryRow>>,
    subscribers: RwLock<Vec<(String, mpsc::Sender<SummaryChange>)>>,
    offline: bool,
}

impl InMemorySummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upsert fail, for remote-failure tests.
    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub async fn rows(&self) -> Vec<SummaryRow> {
        self.rows.read().await.clone()
    }

    /// Delete a row and notify subscribers, simulating a remote-side
    /// deletion.
    pub async fn remove(&self, id: Uuid) {
        let mut rows = self.rows.write().await;
        if let Some(index) = rows.iter().position(|row| row.id == id) {
            let row = rows.remove(index);
            drop(rows);
            self.publish(SummaryChange::Deleted(row)).await;
        }
    }

    async fn publish(&self, change: SummaryChange) {
        let employee_id = match &change {
            SummaryChange::Inserted(row)
            | SummaryChange::Updated(row)
            | SummaryChange::Deleted(row) => row.employee_id.clone(),
        };
        let mut subscribers = self.subscribers.write().await;
        // Drop subscribers whose receiver has gone away.
        let mut kept = Vec::with_capacity(subscribers.len());
        for (id, sender) in subscribers.drain(..) {
            if id != employee_id {
                kept.push((id, sender));
                continue;
            }
            if sender.send(change.clone()).await.is_ok() {
                kept.push((id, sender));
            }
        }
        *subscribers = kept;
    }
}

#[async_trait]
impl SummarySink for InMemorySummarySink {
    async fn upsert(&self, upsert: SummaryUpsert) -> Result<SummaryRow, SummarySinkError> {
        if self.offline {
            return Err(SummarySinkError::Backend("summary sink offline".into()));
        }

        let mut rows = self.rows.write().await;
        let existing = rows
            .iter_mut()
            .find(|row| row.employee_id == upsert.employee_id && row.week_start == upsert.week_start);
        let (row, change) = match existing {
            Some(row) => {
                row.week_end = upsert.week_end;
                row.total_hours = upsert.total_hours;
                row.total_cost = upsert.total_cost;
                row.entries = upsert.entries;
                let row = row.clone();
                (row.clone(), SummaryChange::Updated(row))
            }
            None => {
                let row = SummaryRow {
                    id: Uuid::now_v7(),
                    employee_id: upsert.employee_id,
                    week_start: upsert.week_start,
                    week_end: upsert.week_end,
                    total_hours: upsert.total_hours,
                    total_cost: upsert.total_cost,
                    entries: upsert.entries,
                };
                rows.push(row.clone());
                (row.clone(), SummaryChange::Inserted(row))
            }
        };
        drop(rows);

        self.publish(change).await;
        Ok(row)
    }
}

#[async_trait]
impl SummaryFeed for InMemorySummarySink {
    async fn subscribe(&self, employee_id: &str) -> mpsc::Receiver<SummaryChange> {
        let (sender, receiver) = mpsc::channel(32);
        self.subscribers
            .write()
            .await
            .push((employee_id.to_string(), sender));
        receiver
    }
}
