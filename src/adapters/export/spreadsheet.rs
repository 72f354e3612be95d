// Spreadsheet artifact for one weekly timesheet: a fixed header block,
// one row per line item, a totals row. Also renders the artifact as CSV
// text for hosts that want a plain file.

use serde::Serialize;

use crate::adapters::export::{BRAND, format_display_date, format_money, format_rate};
use crate::core::employee::Employee;
use crate::core::summary::WeeklyTimesheet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadsheetDoc {
    pub sheet_name: String,
    pub column_widths: Vec<u16>,
    pub rows: Vec<Vec<String>>,
}

pub fn timesheet_spreadsheet(employee: &Employee, timesheet: &WeeklyTimesheet) -> SpreadsheetDoc {
    let mut rows: Vec<Vec<String>> = vec![
        vec![BRAND.to_string()],
        vec!["Employee Timesheet".to_string()],
        vec![],
        vec!["Employee:".to_string(), employee.name.clone()],
        vec!["Role:".to_string(), employee.role.clone()],
        vec!["Local Rate:".to_string(), format_rate(employee.local_rate)],
        vec!["Dublin Rate:".to_string(), format_rate(employee.dublin_rate)],
        vec![
            "Week:".to_string(),
            format!(
                "{} - {}",
                format_display_date(timesheet.week_start),
                format_display_date(timesheet.week_end)
            ),
        ],
        vec![],
        vec![
            "Date".to_string(),
            "Project".to_string(),
            "Hours".to_string(),
            "Cost".to_string(),
        ],
    ];

    for line in &timesheet.lines {
        rows.push(vec![
            format_display_date(line.date),
            line.project_name.clone(),
            line.hours.to_string(),
            format_money(line.cost),
        ]);
    }

    rows.push(vec![]);
    rows.push(vec![
        "Total".to_string(),
        String::new(),
        timesheet.total_hours.to_string(),
        format_money(timesheet.total_cost),
    ]);

    SpreadsheetDoc {
        sheet_name: "Timesheet".to_string(),
        column_widths: vec![20, 30, 10, 12],
        rows,
    }
}

pub fn to_csv(doc: &SpreadsheetDoc) -> String {
    let mut out = String::new();
    for row in &doc.rows {
        let line: Vec<String> = row.iter().map(|field| escape_field(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

// Wrap a field in quotes and double inner quotes when it contains a
// comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
