use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One block of hours logged by an employee against a project on a
/// calendar date. Entries are created, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub date: NaiveDate,
    pub hours: f64,
}
