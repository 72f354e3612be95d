use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Pending,
}

/// Which of the employee's two rates applies to work logged against a
/// project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    Local,
    Dublin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub rate_kind: RateKind,
}

/// Persisted shape of a project. The rate kind may be absent on records
/// written before projects carried one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProject {
    pub id: String,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    #[serde(rename = "rateType", default, skip_serializing_if = "Option::is_none")]
    pub rate_kind: Option<RateKind>,
}

impl From<StoredProject> for Project {
    /// Upgrade rule `rate-kind-v1`: a record without a rate kind uses the
    /// local rate. Applied once, at load time.
    fn from(stored: StoredProject) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            client: stored.client,
            status: stored.status,
            rate_kind: stored.rate_kind.unwrap_or(RateKind::Local),
        }
    }
}

impl From<&Project> for StoredProject {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            client: project.client.clone(),
            status: project.status,
            rate_kind: Some(project.rate_kind),
        }
    }
}
