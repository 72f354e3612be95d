use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use labour_costs::adapters::export::Branding;
use labour_costs::adapters::in_memory::in_memory_record_store::InMemoryRecordStore;
use labour_costs::adapters::in_memory::in_memory_summary_sink::InMemorySummarySink;
use labour_costs::adapters::json_store::JsonRecordStore;
use labour_costs::application::summaries::{LoggingObserver, SummaryService};
use labour_costs::application::tracker::Tracker;
use labour_costs::core::ports::RecordStore;
use labour_costs::shell::config::Config;
use labour_costs::shell::http::router;
use labour_costs::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env();

    let store: Arc<dyn RecordStore> = match &config.data_dir {
        Some(dir) => Arc::new(JsonRecordStore::new(dir)?),
        None => Arc::new(InMemoryRecordStore::new()),
    };
    let tracker = Arc::new(Tracker::load(store).await);

    // The remote summary table is in-memory for now; it stands behind
    // the sink and feed ports either way.
    let sink = Arc::new(InMemorySummarySink::new());
    let summaries = Arc::new(SummaryService::new(
        sink.clone(),
        sink,
        Arc::new(LoggingObserver),
    ));

    let branding = Branding::load(config.logo_path.as_deref());

    let state = AppState {
        tracker,
        summaries,
        branding,
    };
    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
