// Aggregation engine tests: week bucketing of real entries, rate
// selection, ordering, and the missing-reference policy for both views.

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use labour_costs::core::employee::Employee;
use labour_costs::core::project::{Project, ProjectStatus, RateKind};
use labour_costs::core::summary::{
    UNKNOWN_PROJECT, employee_weekly_summaries, employee_weekly_timesheets, project_totals,
    project_weekly_summaries,
};
use labour_costs::core::time_entry::TimeEntry;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn employee(id: &str, local_rate: f64, dublin_rate: f64) -> Employee {
    Employee {
        id: id.into(),
        name: format!("Employee {id}"),
        role: "Carpenter".into(),
        local_rate,
        dublin_rate,
    }
}

fn project(id: &str, name: &str, rate_kind: RateKind) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        client: "Client".into(),
        status: ProjectStatus::Active,
        rate_kind,
    }
}

fn entry(id: &str, employee_id: &str, project_id: &str, d: NaiveDate, hours: f64) -> TimeEntry {
    TimeEntry {
        id: id.into(),
        employee_id: employee_id.into(),
        project_id: project_id.into(),
        date: d,
        hours,
    }
}

#[fixture]
fn dublin_project() -> Project {
    project("p1", "Bathroom Remodel", RateKind::Dublin)
}

#[rstest]
fn it_should_produce_the_worked_example_week(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 28), 8.0),
        entry("2", "e1", "p1", date(2025, 10, 29), 4.0),
    ];

    let summaries = employee_weekly_summaries(&worker, &entries, &[dublin_project]);

    assert_eq!(summaries.len(), 1);
    let week = &summaries[0];
    assert_eq!(week.week_start, date(2025, 10, 26));
    assert_eq!(week.week_end, date(2025, 11, 1));
    assert_eq!(week.total_hours, 12.0);
    assert_eq!(week.total_cost, 12.0 * 55.0);
    assert_eq!(week.entries, 2);
}

#[rstest]
fn it_should_apply_the_local_rate_when_the_project_selects_it() {
    let worker = employee("e1", 45.0, 55.0);
    let local = project("p1", "Kitchen Renovation", RateKind::Local);
    let entries = vec![entry("1", "e1", "p1", date(2025, 10, 28), 8.0)];

    let summaries = employee_weekly_summaries(&worker, &entries, &[local]);

    assert_eq!(summaries[0].total_cost, 8.0 * 45.0);
}

#[rstest]
fn it_should_conserve_hours_across_weeks(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 6), 8.0),
        entry("2", "e1", "p1", date(2025, 10, 14), 6.5),
        entry("3", "e1", "p1", date(2025, 10, 28), 4.0),
        // Unknown project: hours still count, at zero cost.
        entry("4", "e1", "ghost", date(2025, 10, 29), 3.0),
        // Another employee's entry is not part of this view at all.
        entry("5", "e2", "p1", date(2025, 10, 28), 40.0),
    ];

    let summaries = employee_weekly_summaries(&worker, &entries, &[dublin_project]);

    let summed: f64 = summaries.iter().map(|w| w.total_hours).sum();
    assert_eq!(summed, 8.0 + 6.5 + 4.0 + 3.0);
}

#[rstest]
fn it_should_order_weeks_most_recent_first(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 6), 8.0),
        entry("2", "e1", "p1", date(2025, 10, 28), 4.0),
        entry("3", "e1", "p1", date(2025, 10, 14), 6.0),
    ];

    let summaries = employee_weekly_summaries(&worker, &entries, &[dublin_project]);

    let starts: Vec<NaiveDate> = summaries.iter().map(|w| w.week_start).collect();
    assert_eq!(
        starts,
        vec![date(2025, 10, 26), date(2025, 10, 12), date(2025, 10, 5)]
    );
}

#[rstest]
fn it_should_be_idempotent_across_recomputations(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 28), 8.0),
        entry("2", "e1", "p1", date(2025, 10, 29), 4.0),
    ];
    let projects = vec![dublin_project];

    let first = employee_weekly_summaries(&worker, &entries, &projects);
    let second = employee_weekly_summaries(&worker, &entries, &projects);

    assert_eq!(first, second);
}

#[rstest]
fn it_should_include_unknown_project_entries_at_zero_cost(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 28), 8.0),
        entry("2", "e1", "ghost", date(2025, 10, 29), 4.0),
    ];

    let summaries = employee_weekly_summaries(&worker, &entries, &[dublin_project]);

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_hours, 12.0);
    assert_eq!(summaries[0].total_cost, 8.0 * 55.0);
    assert_eq!(summaries[0].entries, 2);
}

#[rstest]
fn it_should_label_unknown_projects_on_timesheet_lines(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![entry("1", "e1", "ghost", date(2025, 10, 28), 4.0)];

    let sheets = employee_weekly_timesheets(&worker, &entries, &[dublin_project]);

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].lines[0].project_name, UNKNOWN_PROJECT);
    assert_eq!(sheets[0].lines[0].cost, 0.0);
    assert_eq!(sheets[0].total_hours, 4.0);
}

#[rstest]
fn it_should_order_timesheet_lines_by_date_within_descending_weeks(dublin_project: Project) {
    let worker = employee("e1", 45.0, 55.0);
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 29), 4.0),
        entry("2", "e1", "p1", date(2025, 10, 27), 8.0),
        entry("3", "e1", "p1", date(2025, 10, 20), 6.0),
    ];

    let sheets = employee_weekly_timesheets(&worker, &entries, &[dublin_project]);

    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].week_start, date(2025, 10, 26));
    let dates: Vec<NaiveDate> = sheets[0].lines.iter().map(|l| l.date).collect();
    assert_eq!(dates, vec![date(2025, 10, 27), date(2025, 10, 29)]);
    assert_eq!(sheets[1].week_start, date(2025, 10, 19));
}

#[rstest]
fn it_should_exclude_unknown_employees_from_the_project_view(dublin_project: Project) {
    let workers = vec![employee("e1", 45.0, 55.0)];
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 28), 8.0),
        // A deleted employee: excluded from hours and cost alike.
        entry("2", "ghost", "p1", date(2025, 10, 28), 6.0),
    ];

    let weeks = project_weekly_summaries(&dublin_project, &entries, &workers);
    let totals = project_totals(&dublin_project, &entries, &workers);

    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].total_hours, 8.0);
    assert_eq!(weeks[0].total_cost, 8.0 * 55.0);
    assert_eq!(weeks[0].entries, 1);
    assert_eq!(totals.total_hours, 8.0);
    assert_eq!(totals.total_cost, 8.0 * 55.0);
    assert_eq!(totals.entries, 1);
}

#[rstest]
fn it_should_cost_project_weeks_with_each_employees_selected_rate(dublin_project: Project) {
    let workers = vec![employee("e1", 45.0, 55.0), employee("e2", 40.0, 50.0)];
    let entries = vec![
        entry("1", "e1", "p1", date(2025, 10, 28), 8.0),
        entry("2", "e2", "p1", date(2025, 10, 29), 6.0),
    ];

    let weeks = project_weekly_summaries(&dublin_project, &entries, &workers);

    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].total_cost, 8.0 * 55.0 + 6.0 * 50.0);
    assert_eq!(weeks[0].total_hours, 14.0);
}

#[rstest]
fn it_should_not_crash_on_an_entry_for_a_deleted_employee(dublin_project: Project) {
    let entries = vec![entry("1", "ghost", "p1", date(2025, 10, 28), 8.0)];

    let totals = project_totals(&dublin_project, &entries, &[]);

    assert_eq!(totals.entries, 0);
    assert_eq!(totals.total_hours, 0.0);
    assert_eq!(totals.total_cost, 0.0);
}
