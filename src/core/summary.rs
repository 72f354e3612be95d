// Weekly aggregation over time entries. Pure functions of their
// arguments: nothing here touches storage or mutates its inputs, so a
// recomputation from the same records always yields the same values.
//
// Missing-reference policy
// - Employee view: an entry whose project is unknown still counts its
//   hours, at zero cost, under the project name "Unknown Project".
// - Project view: an entry whose employee is unknown is excluded from
//   both hours and cost.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::employee::Employee;
use crate::core::project::Project;
use crate::core::rates::resolve_rate;
use crate::core::time_entry::TimeEntry;
use crate::core::week::week_bounds;

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Derived totals for one subject (an employee or a project) over one
/// Sunday-to-Saturday week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_hours: f64,
    pub total_cost: f64,
    pub entries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetLine {
    pub date: NaiveDate,
    pub project_name: String,
    pub hours: f64,
    pub cost: f64,
}

/// One week of an employee's work as date-ordered line items, the shape
/// the exporters consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTimesheet {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub lines: Vec<TimesheetLine>,
    pub total_hours: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotals {
    pub total_hours: f64,
    pub total_cost: f64,
    pub entries: u32,
}

fn index_projects(projects: &[Project]) -> HashMap<&str, &Project> {
    projects.iter().map(|p| (p.id.as_str(), p)).collect()
}

fn index_employees(employees: &[Employee]) -> HashMap<&str, &Employee> {
    employees.iter().map(|e| (e.id.as_str(), e)).collect()
}

/// Weekly totals for one employee across all projects, most recent week
/// first.
pub fn employee_weekly_summaries(
    employee: &Employee,
    entries: &[TimeEntry],
    projects: &[Project],
) -> Vec<WeeklySummary> {
    let projects = index_projects(projects);
    let mut weeks: BTreeMap<NaiveDate, WeeklySummary> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.employee_id == employee.id) {
        let bounds = week_bounds(entry.date);
        let summary = weeks.entry(bounds.start).or_insert_with(|| WeeklySummary {
            week_start: bounds.start,
            week_end: bounds.end,
            total_hours: 0.0,
            total_cost: 0.0,
            entries: 0,
        });
        let rate = projects
            .get(entry.project_id.as_str())
            .map(|project| resolve_rate(employee, project))
            .unwrap_or(0.0);
        summary.total_hours += entry.hours;
        summary.total_cost += entry.hours * rate;
        summary.entries += 1;
    }

    weeks.into_values().rev().collect()
}

/// One timesheet per week for one employee, weeks descending, line items
/// ascending by date.
pub fn employee_weekly_timesheets(
    employee: &Employee,
    entries: &[TimeEntry],
    projects: &[Project],
) -> Vec<WeeklyTimesheet> {
    let projects = index_projects(projects);
    let mut weeks: BTreeMap<NaiveDate, WeeklyTimesheet> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.employee_id == employee.id) {
        let bounds = week_bounds(entry.date);
        let timesheet = weeks.entry(bounds.start).or_insert_with(|| WeeklyTimesheet {
            week_start: bounds.start,
            week_end: bounds.end,
            lines: Vec::new(),
            total_hours: 0.0,
            total_cost: 0.0,
        });
        let (project_name, rate) = match projects.get(entry.project_id.as_str()) {
            Some(project) => (project.name.clone(), resolve_rate(employee, project)),
            None => (UNKNOWN_PROJECT.to_string(), 0.0),
        };
        let cost = entry.hours * rate;
        timesheet.lines.push(TimesheetLine {
            date: entry.date,
            project_name,
            hours: entry.hours,
            cost,
        });
        timesheet.total_hours += entry.hours;
        timesheet.total_cost += cost;
    }

    let mut sheets: Vec<WeeklyTimesheet> = weeks.into_values().rev().collect();
    for sheet in &mut sheets {
        sheet.lines.sort_by_key(|line| line.date);
    }
    sheets
}

/// Weekly totals for one project across all employees, most recent week
/// first.
pub fn project_weekly_summaries(
    project: &Project,
    entries: &[TimeEntry],
    employees: &[Employee],
) -> Vec<WeeklySummary> {
    let employees = index_employees(employees);
    let mut weeks: BTreeMap<NaiveDate, WeeklySummary> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.project_id == project.id) {
        let Some(employee) = employees.get(entry.employee_id.as_str()) else {
            continue;
        };
        let bounds = week_bounds(entry.date);
        let summary = weeks.entry(bounds.start).or_insert_with(|| WeeklySummary {
            week_start: bounds.start,
            week_end: bounds.end,
            total_hours: 0.0,
            total_cost: 0.0,
            entries: 0,
        });
        summary.total_hours += entry.hours;
        summary.total_cost += entry.hours * resolve_rate(employee, project);
        summary.entries += 1;
    }

    weeks.into_values().rev().collect()
}

/// Whole-of-project totals, same exclusion rule as the weekly series.
pub fn project_totals(
    project: &Project,
    entries: &[TimeEntry],
    employees: &[Employee],
) -> ProjectTotals {
    let employees = index_employees(employees);
    let mut totals = ProjectTotals {
        total_hours: 0.0,
        total_cost: 0.0,
        entries: 0,
    };

    for entry in entries.iter().filter(|e| e.project_id == project.id) {
        let Some(employee) = employees.get(entry.employee_id.as_str()) else {
            continue;
        };
        totals.total_hours += entry.hours;
        totals.total_cost += entry.hours * resolve_rate(employee, project);
        totals.entries += 1;
    }

    totals
}
