use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub local_rate: f64,
    pub dublin_rate: f64,
}

/// Persisted shape of an employee. Field names match the stored
/// records, and the Dublin rate may be absent on records written
/// before it existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEmployee {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "hourlyRate")]
    pub local_rate: f64,
    #[serde(rename = "dublinRate", default, skip_serializing_if = "Option::is_none")]
    pub dublin_rate: Option<f64>,
}

impl From<StoredEmployee> for Employee {
    /// Upgrade rule `dublin-rate-v1`: a record without a Dublin rate gets
    /// 1.2x its local rate. Applied once, at load time.
    fn from(stored: StoredEmployee) -> Self {
        let dublin_rate = stored.dublin_rate.unwrap_or(stored.local_rate * 1.2);
        Self {
            id: stored.id,
            name: stored.name,
            role: stored.role,
            local_rate: stored.local_rate,
            dublin_rate,
        }
    }
}

impl From<&Employee> for StoredEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            role: employee.role.clone(),
            local_rate: employee.local_rate,
            dublin_rate: Some(employee.dublin_rate),
        }
    }
}
