// Summary synchronizer tests: non-blocking upserts with observable
// outcomes, merge-by-id on the change feed, and subscription handover
// when the viewed employee changes.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use labour_costs::adapters::in_memory::in_memory_summary_sink::InMemorySummarySink;
use labour_costs::application::summaries::SummaryService;
use labour_costs::core::employee::Employee;
use labour_costs::core::ports::{SummarySinkError, SummaryRow, SyncObserver};
use labour_costs::core::project::{Project, ProjectStatus, RateKind};
use labour_costs::core::time_entry::TimeEntry;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn worker() -> Employee {
    Employee {
        id: "e1".into(),
        name: "John Smith".into(),
        role: "Carpenter".into(),
        local_rate: 45.0,
        dublin_rate: 55.0,
    }
}

fn projects() -> Vec<Project> {
    vec![Project {
        id: "p1".into(),
        name: "Bathroom Remodel".into(),
        client: "Johnson Home".into(),
        status: ProjectStatus::Active,
        rate_kind: RateKind::Dublin,
    }]
}

fn entries() -> Vec<TimeEntry> {
    vec![
        TimeEntry {
            id: "1".into(),
            employee_id: "e1".into(),
            project_id: "p1".into(),
            date: date(2025, 10, 28),
            hours: 8.0,
        },
        TimeEntry {
            id: "2".into(),
            employee_id: "e1".into(),
            project_id: "p1".into(),
            date: date(2025, 10, 29),
            hours: 4.0,
        },
    ]
}

// Observer callbacks are synchronous and may run on any worker, so a
// std mutex guards the recordings.
#[derive(Default)]
struct RecordingObserver {
    completed: std::sync::Mutex<Vec<SummaryRow>>,
    failed: std::sync::Mutex<Vec<(String, NaiveDate, String)>>,
}

impl RecordingObserver {
    fn completed_count(&self) -> usize {
        self.completed.lock().unwrap().len()
    }

    fn failed_entries(&self) -> Vec<(String, NaiveDate, String)> {
        self.failed.lock().unwrap().clone()
    }
}

impl SyncObserver for RecordingObserver {
    fn upsert_completed(&self, row: &SummaryRow) {
        self.completed.lock().unwrap().push(row.clone());
    }

    fn upsert_failed(&self, employee_id: &str, week_start: NaiveDate, error: &SummarySinkError) {
        self.failed
            .lock()
            .unwrap()
            .push((employee_id.to_string(), week_start, error.to_string()));
    }
}

struct Harness {
    sink: Arc<InMemorySummarySink>,
    observer: Arc<RecordingObserver>,
    service: Arc<SummaryService>,
}

fn harness_with_sink(sink: InMemorySummarySink) -> Harness {
    let sink = Arc::new(sink);
    let observer = Arc::new(RecordingObserver::default());
    let service = Arc::new(SummaryService::new(
        sink.clone(),
        sink.clone(),
        observer.clone(),
    ));
    Harness {
        sink,
        observer,
        service,
    }
}

#[fixture]
fn harness() -> Harness {
    harness_with_sink(InMemorySummarySink::new())
}

/// Poll until `check` passes or the deadline expires; spawned upserts
/// and feed echoes land asynchronously.
async fn eventually<F>(mut check: F)
where
    F: FnMut() -> std::pin::Pin<Box<dyn Future<Output = bool> + Send>>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_return_local_rows_before_any_upsert_lands(harness: Harness) {
    let rows = harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].week_start, date(2025, 10, 26));
    assert_eq!(rows[0].total_hours, 12.0);
    assert_eq!(rows[0].total_cost, 660.0);
    assert_eq!(rows[0].entries, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_upsert_each_week_and_report_completion(harness: Harness) {
    harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;

    let sink = harness.sink.clone();
    eventually(move || {
        let sink = sink.clone();
        Box::pin(async move { sink.rows().await.len() == 1 })
    })
    .await;

    let remote = harness.sink.rows().await;
    assert_eq!(remote[0].employee_id, "e1");
    assert_eq!(remote[0].week_start, date(2025, 10, 26));
    assert_eq!(remote[0].total_cost, 660.0);

    let observer = harness.observer.clone();
    eventually(move || {
        let observer = observer.clone();
        Box::pin(async move { observer.completed_count() == 1 })
    })
    .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_not_duplicate_a_row_when_its_own_write_echoes_back(harness: Harness) {
    harness.service.watch_employee("e1").await;
    harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;

    let sink = harness.sink.clone();
    eventually(move || {
        let sink = sink.clone();
        Box::pin(async move { sink.rows().await.len() == 1 })
    })
    .await;
    // Give the echoed insert time to be applied as well.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let displayed = harness.service.summaries("e1").await;
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].week_start, date(2025, 10, 26));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_keep_the_local_view_when_the_remote_is_down() {
    let mut sink = InMemorySummarySink::new();
    sink.toggle_offline();
    let harness = harness_with_sink(sink);

    let rows = harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;
    assert_eq!(rows.len(), 1);

    let observer = harness.observer.clone();
    eventually(move || {
        let observer = observer.clone();
        Box::pin(async move { observer.failed_entries().len() == 1 })
    })
    .await;

    let (employee_id, week_start, error) = harness.observer.failed_entries()[0].clone();
    assert_eq!(employee_id, "e1");
    assert_eq!(week_start, date(2025, 10, 26));
    assert!(error.contains("offline"));

    // Locally computed aggregates stay authoritative for display.
    assert_eq!(harness.service.summaries("e1").await.len(), 1);
    assert!(harness.sink.rows().await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_apply_remote_deletes_from_the_feed(harness: Harness) {
    harness.service.watch_employee("e1").await;
    harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;

    let sink = harness.sink.clone();
    eventually(move || {
        let sink = sink.clone();
        Box::pin(async move { sink.rows().await.len() == 1 })
    })
    .await;

    let remote_id = harness.sink.rows().await[0].id;
    harness.sink.remove(remote_id).await;

    let service = harness.service.clone();
    eventually(move || {
        let service = service.clone();
        Box::pin(async move { service.summaries("e1").await.is_empty() })
    })
    .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn it_should_release_the_old_subscription_when_the_viewed_employee_changes(
    harness: Harness,
) {
    harness.service.watch_employee("e1").await;
    harness
        .service
        .refresh(&worker(), &entries(), &projects())
        .await;

    let sink = harness.sink.clone();
    eventually(move || {
        let sink = sink.clone();
        Box::pin(async move { sink.rows().await.len() == 1 })
    })
    .await;

    // Viewing another employee replaces the subscription.
    harness.service.watch_employee("e2").await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let remote_id = harness.sink.rows().await[0].id;
    harness.sink.remove(remote_id).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The delete for e1 is no longer observed.
    assert_eq!(harness.service.summaries("e1").await.len(), 1);
}
