// HTTP surface over the tracker and summary service. Thin handlers:
// decode, call the application layer, map errors to status codes.
//
// Status mapping
// - malformed JSON body -> 422
// - unknown employee/project -> 404
// - domain rejection -> 409
// - store failure -> 500

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::export::document::{payslip, timesheet_document};
use crate::adapters::export::spreadsheet::{timesheet_spreadsheet, to_csv};
use crate::application::errors::TrackerError;
use crate::application::tracker::{
    Assignment, EmployeeUpdate, NewEmployee, NewProject, ProjectUpdate,
};
use crate::core::project::{ProjectStatus, RateKind};
use crate::core::summary::{
    WeeklyTimesheet, employee_weekly_timesheets, project_totals, project_weekly_summaries,
};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            put(update_employee).delete(delete_employee),
        )
        .route("/employees/{id}/summaries", get(employee_summaries))
        .route("/employees/{id}/timesheets", get(employee_timesheets))
        .route(
            "/employees/{id}/timesheets/{week_start}/spreadsheet",
            get(timesheet_spreadsheet_export),
        )
        .route(
            "/employees/{id}/timesheets/{week_start}/document",
            get(timesheet_document_export),
        )
        .route(
            "/employees/{id}/timesheets/{week_start}/payslip",
            get(timesheet_payslip_export),
        )
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", put(update_project))
        .route("/projects/{id}/summary", get(project_summary))
        .route("/time-entries", get(list_time_entries).post(register_time_entries))
        .with_state(state)
}

fn error_response(error: TrackerError) -> axum::response::Response {
    match error {
        TrackerError::UnknownEmployee(_) | TrackerError::UnknownProject(_) => {
            StatusCode::NOT_FOUND.into_response()
        }
        TrackerError::Domain(reason) => (StatusCode::CONFLICT, reason).into_response(),
        TrackerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[derive(Deserialize)]
pub struct CreateEmployeeBody {
    pub name: String,
    pub role: String,
    pub local_rate: f64,
    pub dublin_rate: f64,
}

#[derive(Deserialize)]
pub struct UpdateEmployeeBody {
    pub name: Option<String>,
    pub role: Option<String>,
    pub local_rate: Option<f64>,
    pub dublin_rate: Option<f64>,
}

#[derive(Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub rate_kind: Option<RateKind>,
}

#[derive(Deserialize)]
pub struct UpdateProjectBody {
    pub name: Option<String>,
    pub client: Option<String>,
    pub status: Option<ProjectStatus>,
    pub rate_kind: Option<RateKind>,
}

#[derive(Deserialize)]
pub struct AssignmentBody {
    pub employee_id: String,
    pub hours: f64,
}

#[derive(Deserialize)]
pub struct RegisterTimeEntriesBody {
    pub project_id: String,
    pub date: NaiveDate,
    pub assignments: Vec<AssignmentBody>,
}

#[derive(Serialize)]
pub struct RegisterTimeEntriesResponse {
    pub created: usize,
}

async fn list_employees(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tracker.employees().await)
}

async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<CreateEmployeeBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let new = NewEmployee {
        name: body.name,
        role: body.role,
        local_rate: body.local_rate,
        dublin_rate: body.dublin_rate,
    };
    match state.tracker.add_employee(new).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEmployeeBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let update = EmployeeUpdate {
        name: body.name,
        role: body.role,
        local_rate: body.local_rate,
        dublin_rate: body.dublin_rate,
    };
    match state.tracker.update_employee(&id, update).await {
        Ok(employee) => Json(employee).into_response(),
        Err(error) => error_response(error),
    }
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.tracker.delete_employee(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tracker.projects().await)
}

async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let new = NewProject {
        name: body.name,
        client: body.client,
        status: body.status,
        rate_kind: body.rate_kind.unwrap_or(RateKind::Local),
    };
    match state.tracker.add_project(new).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProjectBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let update = ProjectUpdate {
        name: body.name,
        client: body.client,
        status: body.status,
        rate_kind: body.rate_kind,
    };
    match state.tracker.update_project(&id, update).await {
        Ok(project) => Json(project).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_time_entries(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tracker.time_entries().await)
}

async fn register_time_entries(
    State(state): State<AppState>,
    body: Result<Json<RegisterTimeEntriesBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let assignments: Vec<Assignment> = body
        .assignments
        .into_iter()
        .map(|a| Assignment {
            employee_id: a.employee_id,
            hours: a.hours,
        })
        .collect();
    match state
        .tracker
        .register_time_entries(&body.project_id, body.date, &assignments)
        .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(RegisterTimeEntriesResponse {
                created: created.len(),
            }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

/// Viewing an employee's summaries recomputes them, pushes the upserts
/// without waiting, and (re)subscribes the change feed to that
/// employee.
async fn employee_summaries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(employee) = state.tracker.employee(&id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let entries = state.tracker.time_entries().await;
    let projects = state.tracker.projects().await;
    state.summaries.watch_employee(&employee.id).await;
    let rows = state.summaries.refresh(&employee, &entries, &projects).await;
    Json(rows).into_response()
}

async fn employee_timesheets(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(employee) = state.tracker.employee(&id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let entries = state.tracker.time_entries().await;
    let projects = state.tracker.projects().await;
    Json(employee_weekly_timesheets(&employee, &entries, &projects)).into_response()
}

#[derive(Serialize)]
struct ProjectSummaryResponse {
    total_hours: f64,
    total_cost: f64,
    entries: u32,
    weeks: Vec<crate::core::summary::WeeklySummary>,
}

async fn project_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(project) = state.tracker.project(&id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let entries = state.tracker.time_entries().await;
    let employees = state.tracker.employees().await;
    let totals = project_totals(&project, &entries, &employees);
    let weeks = project_weekly_summaries(&project, &entries, &employees);
    Json(ProjectSummaryResponse {
        total_hours: totals.total_hours,
        total_cost: totals.total_cost,
        entries: totals.entries,
        weeks,
    })
    .into_response()
}

async fn find_timesheet(
    state: &AppState,
    employee_id: &str,
    week_start: NaiveDate,
) -> Option<(crate::core::employee::Employee, WeeklyTimesheet)> {
    let employee = state.tracker.employee(employee_id).await?;
    let entries = state.tracker.time_entries().await;
    let projects = state.tracker.projects().await;
    let timesheet = employee_weekly_timesheets(&employee, &entries, &projects)
        .into_iter()
        .find(|t| t.week_start == week_start)?;
    Some((employee, timesheet))
}

async fn timesheet_spreadsheet_export(
    State(state): State<AppState>,
    Path((id, week_start)): Path<(String, NaiveDate)>,
) -> impl IntoResponse {
    let Some((employee, timesheet)) = find_timesheet(&state, &id, week_start).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let doc = timesheet_spreadsheet(&employee, &timesheet);
    ([(header::CONTENT_TYPE, "text/csv")], to_csv(&doc)).into_response()
}

async fn timesheet_document_export(
    State(state): State<AppState>,
    Path((id, week_start)): Path<(String, NaiveDate)>,
) -> impl IntoResponse {
    let Some((employee, timesheet)) = find_timesheet(&state, &id, week_start).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Json(timesheet_document(&employee, &timesheet, &state.branding)).into_response()
}

async fn timesheet_payslip_export(
    State(state): State<AppState>,
    Path((id, week_start)): Path<(String, NaiveDate)>,
) -> impl IntoResponse {
    let Some((employee, timesheet)) = find_timesheet(&state, &id, week_start).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let slip = payslip(
        &employee,
        &timesheet,
        employee.local_rate,
        Utc::now().date_naive(),
        &state.branding,
    );
    Json(slip).into_response()
}
