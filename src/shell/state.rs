use std::sync::Arc;

use crate::adapters::export::Branding;
use crate::application::summaries::SummaryService;
use crate::application::tracker::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
    pub summaries: Arc<SummaryService>,
    pub branding: Branding,
}
