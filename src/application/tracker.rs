// The tracker owns the three record lists and their persistence.
//
// Responsibilities
// - Load the lists from the record store once at startup; fall back to
//   the seed records when a list is absent or unreadable.
// - Apply the load-time upgrade rules (dublin-rate-v1, rate-kind-v1)
//   exactly once, as part of that load.
// - Serve reads and apply mutations, persisting the affected list
//   wholesale after every change.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::application::errors::TrackerError;
use crate::core::employee::Employee;
use crate::core::ports::RecordStore;
use crate::core::project::{Project, ProjectStatus, RateKind};
use crate::core::time_entry::TimeEntry;

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub local_rate: f64,
    pub dublin_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub local_rate: Option<f64>,
    pub dublin_rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub rate_kind: RateKind,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client: Option<String>,
    pub status: Option<ProjectStatus>,
    pub rate_kind: Option<RateKind>,
}

/// One employee/hours pair of a time-entry registration. Rows with a
/// blank employee or non-positive hours are skipped, not rejected.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub employee_id: String,
    pub hours: f64,
}

#[derive(Debug, Default)]
struct Records {
    employees: Vec<Employee>,
    projects: Vec<Project>,
    time_entries: Vec<TimeEntry>,
}

pub struct Tracker {
    store: Arc<dyn RecordStore>,
    records: RwLock<Records>,
}

impl Tracker {
    /// Load all three lists, seeding any list that is absent or fails to
    /// read. Seeded lists are persisted immediately so the next load
    /// finds them.
    pub async fn load(store: Arc<dyn RecordStore>) -> Self {
        let employees = match store.load_employees().await {
            Ok(Some(stored)) => stored.into_iter().map(Employee::from).collect(),
            Ok(None) => Self::persist_seed(&*store, seed_employees()).await,
            Err(error) => {
                warn!(%error, "falling back to seed employees");
                seed_employees()
            }
        };
        let projects = match store.load_projects().await {
            Ok(Some(stored)) => stored.into_iter().map(Project::from).collect(),
            Ok(None) => Self::persist_seed_projects(&*store, seed_projects()).await,
            Err(error) => {
                warn!(%error, "falling back to seed projects");
                seed_projects()
            }
        };
        let time_entries = match store.load_time_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => Self::persist_seed_entries(&*store, seed_time_entries()).await,
            Err(error) => {
                warn!(%error, "falling back to seed time entries");
                seed_time_entries()
            }
        };

        Self {
            store,
            records: RwLock::new(Records {
                employees,
                projects,
                time_entries,
            }),
        }
    }

    async fn persist_seed(store: &dyn RecordStore, seed: Vec<Employee>) -> Vec<Employee> {
        if let Err(error) = store.save_employees(&seed).await {
            warn!(%error, "could not persist seed employees");
        }
        seed
    }

    async fn persist_seed_projects(store: &dyn RecordStore, seed: Vec<Project>) -> Vec<Project> {
        if let Err(error) = store.save_projects(&seed).await {
            warn!(%error, "could not persist seed projects");
        }
        seed
    }

    async fn persist_seed_entries(store: &dyn RecordStore, seed: Vec<TimeEntry>) -> Vec<TimeEntry> {
        if let Err(error) = store.save_time_entries(&seed).await {
            warn!(%error, "could not persist seed time entries");
        }
        seed
    }

    pub async fn employees(&self) -> Vec<Employee> {
        self.records.read().await.employees.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.records.read().await.projects.clone()
    }

    pub async fn time_entries(&self) -> Vec<TimeEntry> {
        self.records.read().await.time_entries.clone()
    }

    pub async fn employee(&self, id: &str) -> Option<Employee> {
        self.records
            .read()
            .await
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub async fn project(&self, id: &str) -> Option<Project> {
        self.records
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn add_employee(&self, new: NewEmployee) -> Result<Employee, TrackerError> {
        validate_rates(new.local_rate, new.dublin_rate)?;
        let employee = Employee {
            id: Uuid::now_v7().to_string(),
            name: new.name,
            role: new.role,
            local_rate: new.local_rate,
            dublin_rate: new.dublin_rate,
        };
        let mut records = self.records.write().await;
        records.employees.push(employee.clone());
        self.store.save_employees(&records.employees).await?;
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        id: &str,
        update: EmployeeUpdate,
    ) -> Result<Employee, TrackerError> {
        let mut records = self.records.write().await;
        let employee = records
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| TrackerError::UnknownEmployee(id.to_string()))?;
        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(role) = update.role {
            employee.role = role;
        }
        if let Some(local_rate) = update.local_rate {
            employee.local_rate = local_rate;
        }
        if let Some(dublin_rate) = update.dublin_rate {
            employee.dublin_rate = dublin_rate;
        }
        validate_rates(employee.local_rate, employee.dublin_rate)?;
        let updated = employee.clone();
        self.store.save_employees(&records.employees).await?;
        Ok(updated)
    }

    pub async fn delete_employee(&self, id: &str) -> Result<(), TrackerError> {
        let mut records = self.records.write().await;
        let before = records.employees.len();
        records.employees.retain(|e| e.id != id);
        if records.employees.len() == before {
            return Err(TrackerError::UnknownEmployee(id.to_string()));
        }
        self.store.save_employees(&records.employees).await?;
        Ok(())
    }

    pub async fn add_project(&self, new: NewProject) -> Result<Project, TrackerError> {
        let project = Project {
            id: Uuid::now_v7().to_string(),
            name: new.name,
            client: new.client,
            status: new.status,
            rate_kind: new.rate_kind,
        };
        let mut records = self.records.write().await;
        records.projects.push(project.clone());
        self.store.save_projects(&records.projects).await?;
        Ok(project)
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, TrackerError> {
        let mut records = self.records.write().await;
        let project = records
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| TrackerError::UnknownProject(id.to_string()))?;
        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(client) = update.client {
            project.client = client;
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(rate_kind) = update.rate_kind {
            project.rate_kind = rate_kind;
        }
        let updated = project.clone();
        self.store.save_projects(&records.projects).await?;
        Ok(updated)
    }

    /// Register a day's worth of assignments against a project. Blank or
    /// zero-hour rows are dropped; the rest become one time entry each.
    pub async fn register_time_entries(
        &self,
        project_id: &str,
        date: NaiveDate,
        assignments: &[Assignment],
    ) -> Result<Vec<TimeEntry>, TrackerError> {
        let mut records = self.records.write().await;
        if !records.projects.iter().any(|p| p.id == project_id) {
            return Err(TrackerError::UnknownProject(project_id.to_string()));
        }
        let new_entries: Vec<TimeEntry> = assignments
            .iter()
            .filter(|a| !a.employee_id.is_empty() && a.hours > 0.0)
            .map(|a| TimeEntry {
                id: Uuid::now_v7().to_string(),
                employee_id: a.employee_id.clone(),
                project_id: project_id.to_string(),
                date,
                hours: a.hours,
            })
            .collect();
        records.time_entries.extend(new_entries.iter().cloned());
        self.store.save_time_entries(&records.time_entries).await?;
        Ok(new_entries)
    }
}

fn validate_rates(local_rate: f64, dublin_rate: f64) -> Result<(), TrackerError> {
    if local_rate < 0.0 || dublin_rate < 0.0 {
        return Err(TrackerError::Domain("rates must be non-negative".into()));
    }
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid")
}

pub fn seed_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "1".into(),
            name: "John Smith".into(),
            role: "Carpenter".into(),
            local_rate: 45.0,
            dublin_rate: 55.0,
        },
        Employee {
            id: "2".into(),
            name: "Sarah Johnson".into(),
            role: "Electrician".into(),
            local_rate: 55.0,
            dublin_rate: 65.0,
        },
        Employee {
            id: "3".into(),
            name: "Mike Davis".into(),
            role: "Laborer".into(),
            local_rate: 40.0,
            dublin_rate: 50.0,
        },
    ]
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            name: "Kitchen Renovation".into(),
            client: "Smith Residence".into(),
            status: ProjectStatus::Active,
            rate_kind: RateKind::Local,
        },
        Project {
            id: "2".into(),
            name: "Bathroom Remodel".into(),
            client: "Johnson Home".into(),
            status: ProjectStatus::Active,
            rate_kind: RateKind::Dublin,
        },
    ]
}

pub fn seed_time_entries() -> Vec<TimeEntry> {
    vec![
        TimeEntry {
            id: "1".into(),
            employee_id: "1".into(),
            project_id: "1".into(),
            date: date(2025, 10, 28),
            hours: 8.0,
        },
        TimeEntry {
            id: "2".into(),
            employee_id: "2".into(),
            project_id: "1".into(),
            date: date(2025, 10, 28),
            hours: 6.0,
        },
        TimeEntry {
            id: "3".into(),
            employee_id: "1".into(),
            project_id: "2".into(),
            date: date(2025, 10, 29),
            hours: 4.0,
        },
    ]
}
