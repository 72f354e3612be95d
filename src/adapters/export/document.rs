// Paginated document artifacts: the branded weekly timesheet and the
// payslip. Fixed layouts, structured values only.

use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::export::{Branding, format_display_date, format_money, format_rate};
use crate::core::employee::Employee;
use crate::core::summary::WeeklyTimesheet;

/// Body rows per page of the timesheet table.
const ROWS_PER_PAGE: usize = 28;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTable {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub foot: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetDocument {
    pub title: String,
    pub branded: bool,
    pub meta: Vec<String>,
    pub head: Vec<String>,
    /// Body rows split into pages; the totals row closes the last page.
    pub pages: Vec<Vec<Vec<String>>>,
    pub foot: Vec<String>,
}

pub fn timesheet_document(
    employee: &Employee,
    timesheet: &WeeklyTimesheet,
    branding: &Branding,
) -> TimesheetDocument {
    let body: Vec<Vec<String>> = timesheet
        .lines
        .iter()
        .map(|line| {
            vec![
                format_display_date(line.date),
                line.project_name.clone(),
                format!("{:.1}", line.hours),
                format_money(line.cost),
            ]
        })
        .collect();

    let mut pages: Vec<Vec<Vec<String>>> = body
        .chunks(ROWS_PER_PAGE)
        .map(|chunk| chunk.to_vec())
        .collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }

    TimesheetDocument {
        title: "Employee Timesheet".to_string(),
        branded: branding.has_logo(),
        meta: vec![
            format!("Employee: {}", employee.name),
            format!("Role: {}", employee.role),
            format!(
                "Local Rate: {} | Dublin Rate: {}",
                format_rate(employee.local_rate),
                format_rate(employee.dublin_rate)
            ),
            format!(
                "Week: {} - {}",
                format_display_date(timesheet.week_start),
                format_display_date(timesheet.week_end)
            ),
        ],
        head: vec![
            "Date".to_string(),
            "Project".to_string(),
            "Hours".to_string(),
            "Cost".to_string(),
        ],
        pages,
        foot: vec![
            "Total".to_string(),
            String::new(),
            format!("{:.1}", timesheet.total_hours),
            format_money(timesheet.total_cost),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payslip {
    pub title: String,
    pub branded: bool,
    pub employee_info: Vec<String>,
    pub pay_period: String,
    pub earnings: DocTable,
    pub total_payment: String,
    pub generated_on: NaiveDate,
}

/// The payslip reports the single rate the host chooses to print; the
/// total payment comes from the timesheet, which already applied the
/// per-project rates.
pub fn payslip(
    employee: &Employee,
    timesheet: &WeeklyTimesheet,
    rate: f64,
    generated_on: NaiveDate,
    branding: &Branding,
) -> Payslip {
    Payslip {
        title: "PAYSLIP".to_string(),
        branded: branding.has_logo(),
        employee_info: vec![
            format!("Name: {}", employee.name),
            format!("Role: {}", employee.role),
            format!(
                "Local Rate: {}/hr | Dublin Rate: {}/hr",
                format_rate(employee.local_rate),
                format_rate(employee.dublin_rate)
            ),
        ],
        pay_period: format!(
            "{} - {}",
            format_display_date(timesheet.week_start),
            format_display_date(timesheet.week_end)
        ),
        earnings: DocTable {
            head: vec![
                "Description".to_string(),
                "Hours".to_string(),
                "Rate".to_string(),
                "Amount".to_string(),
            ],
            body: vec![vec![
                "Regular Hours".to_string(),
                format!("{:.1}", timesheet.total_hours),
                format_rate(rate),
                format_money(timesheet.total_cost),
            ]],
            foot: vec![],
        },
        total_payment: format_money(timesheet.total_cost),
        generated_on,
    }
}
