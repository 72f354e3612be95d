// Export renderers: pure functions from a weekly timesheet (plus the
// employee) to document artifacts. The artifacts are structured values;
// how a host turns them into files is its own concern.

pub mod document;
pub mod spreadsheet;

use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

pub const BRAND: &str = "BRACKVALE";

/// Branding for exported documents. The logo is optional: when the
/// asset cannot be read the exports render without it instead of
/// failing.
#[derive(Debug, Clone, Default)]
pub struct Branding {
    pub logo: Option<Vec<u8>>,
}

impl Branding {
    pub fn load(logo_path: Option<&Path>) -> Self {
        let logo = logo_path.and_then(|path| match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                warn!(%error, path = %path.display(), "branding asset unavailable, exporting without it");
                None
            }
        });
        Self { logo }
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }
}

/// Display format used across exports, e.g. "Tuesday, 28 Oct 2025".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%A, %-d %b %Y").to_string()
}

pub fn format_money(amount: f64) -> String {
    format!("€{amount:.2}")
}

pub fn format_rate(rate: f64) -> String {
    format!("€{rate}")
}
