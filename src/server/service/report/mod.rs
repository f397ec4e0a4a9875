//! Report generation and the reporting dashboard.
//!
//! Each report is built as a [`ReportDocument`] from repository rows and then rendered by
//! either the [`pdf`] or the [`xlsx`] renderer.

pub mod document;
pub mod pdf;
pub mod xlsx;

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use entity::sea_orm_active_enums::{EmployeeStatus, ReviewStatus};
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::{
        performance::ReportPeriod,
        report::{
            GenerateReportDto, ReportAnalyticsDto, ReportFormat, ReportKind, ReportParameterDto,
            ReportTemplateDto,
        },
    },
    server::{
        data::{
            department::DepartmentRepository,
            employee::{EmployeeFilter, EmployeeRepository},
            leave::balance::LeaveBalanceRepository,
            performance::review::{PerformanceReviewRepository, ReviewFilter},
            role::RoleRepository,
            work_log::{WorkLogFilter, WorkLogRepository},
        },
        error::Error,
        model::{auth::AuthUser, permission},
        service::analytics,
        util::time::{months_before, period_start, start_of_day, today},
    },
};

use self::document::{Cell, Column, ReportDocument};

/// A rendered report ready to be sent as an attachment.
#[derive(Debug)]
pub struct GeneratedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

fn period_label(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::CurrentMonth => "current-month",
        ReportPeriod::CurrentQuarter => "current-quarter",
        ReportPeriod::CurrentYear => "current-year",
    }
}

fn full_name(employee: &entity::employee::Model) -> String {
    format!("{} {}", employee.first_name, employee.last_name)
}

/// Employees and department names a report is assembled from.
struct Staff {
    employees: HashMap<i32, entity::employee::Model>,
    departments: HashMap<i32, String>,
}

impl Staff {
    fn new(employees: Vec<entity::employee::Model>, departments: HashMap<i32, String>) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
            departments,
        }
    }

    fn ids(&self) -> Vec<i32> {
        self.employees.keys().copied().collect()
    }

    fn department_of(&self, employee: &entity::employee::Model) -> String {
        self.departments
            .get(&employee.department_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Sort key placing rows by department, then employee name.
    fn sort_key(&self, employee_id: i32) -> (String, String, String) {
        match self.employees.get(&employee_id) {
            Some(e) => (self.department_of(e), e.first_name.clone(), e.last_name.clone()),
            None => Default::default(),
        }
    }
}

fn parameter(name: &str, kind: &str) -> ReportParameterDto {
    ReportParameterDto {
        name: name.to_string(),
        kind: kind.to_string(),
        required: false,
    }
}

/// The catalog of reports that can be generated.
pub fn templates() -> Vec<ReportTemplateDto> {
    ReportKind::ALL
        .into_iter()
        .map(|kind| {
            let (name, description, category, parameters) = match kind {
                ReportKind::EmployeePerformance => (
                    "Employee Performance Report",
                    "Comprehensive performance analysis with ratings and feedback",
                    "Performance",
                    vec![
                        parameter("departmentId", "number"),
                        parameter("period", "string"),
                        parameter("employeeId", "number"),
                    ],
                ),
                ReportKind::LeaveUsage => (
                    "Leave Usage Summary",
                    "Leave balances and usage patterns by department",
                    "Leave",
                    vec![
                        parameter("departmentId", "number"),
                        parameter("year", "number"),
                        parameter("leaveTypeId", "number"),
                    ],
                ),
                ReportKind::WorkHours => (
                    "Work Hours Analysis",
                    "Time tracking and productivity metrics",
                    "Hours",
                    vec![
                        parameter("departmentId", "number"),
                        parameter("startDate", "date"),
                        parameter("endDate", "date"),
                        parameter("projectId", "number"),
                    ],
                ),
                ReportKind::EmployeeDirectory => (
                    "Employee Directory",
                    "Complete employee contact and role information",
                    "Directory",
                    vec![
                        parameter("departmentId", "number"),
                        parameter("status", "string"),
                    ],
                ),
            };

            ReportTemplateDto {
                id: kind.slug().to_string(),
                name: name.to_string(),
                description: description.to_string(),
                kind: category.to_string(),
                formats: vec!["PDF".to_string(), "Excel".to_string()],
                parameters,
            }
        })
        .collect()
}

/// Published reviews with reviewer names, ordered by department and employee name.
fn performance_document(
    staff: &Staff,
    mut reviews: Vec<entity::performance_review::Model>,
    reviewers: &HashMap<i32, String>,
    today: NaiveDate,
    period: ReportPeriod,
    department_filtered: bool,
) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Employee Performance Report",
        vec![
            Column::new("Employee ID", 15.0),
            Column::new("Employee Name", 25.0),
            Column::new("Department", 20.0),
            Column::new("Review Period", 15.0),
            Column::new("Overall Rating", 15.0),
            Column::new("Goals", 40.0),
            Column::new("Achievements", 40.0),
            Column::new("Feedback", 40.0),
            Column::new("Reviewer", 25.0),
            Column::new("Review Date", 15.0),
        ],
    )
    .summary_line(format!("Generated: {}", today))
    .summary_line(format!("Period: {}", period_label(period)));
    if department_filtered {
        document = document.summary_line("Department Filter: Applied");
    }

    reviews.sort_by_key(|r| staff.sort_key(r.employee_id));

    for review in reviews {
        let Some(employee) = staff.employees.get(&review.employee_id) else {
            continue;
        };

        document.push_row(vec![
            employee.employee_code.as_str().into(),
            full_name(employee).into(),
            staff.department_of(employee).into(),
            review.review_period.into(),
            review.overall_rating.map_or(Cell::Empty, Cell::Number),
            Cell::optional(review.goals),
            Cell::optional(review.achievements),
            Cell::optional(review.feedback),
            Cell::optional(reviewers.get(&review.reviewer_id).cloned()),
            review.review_date.date().to_string().into(),
        ]);
    }

    document
}

/// Usage percentage of a balance, rounded to a whole number. 0 when nothing was allocated.
pub fn usage_percentage(used_days: i32, total_days: i32) -> f64 {
    if total_days > 0 {
        (f64::from(used_days) / f64::from(total_days) * 100.0).round()
    } else {
        0.0
    }
}

fn leave_usage_document(
    staff: &Staff,
    mut balances: Vec<(entity::leave_balance::Model, Option<entity::leave_type::Model>)>,
    today: NaiveDate,
    year: i32,
) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Leave Usage Report",
        vec![
            Column::new("Employee ID", 15.0),
            Column::new("Employee Name", 25.0),
            Column::new("Department", 20.0),
            Column::new("Leave Type", 20.0),
            Column::new("Total Days", 12.0),
            Column::new("Used Days", 12.0),
            Column::new("Remaining Days", 15.0),
            Column::new("Carry Forward", 15.0),
            Column::new("Usage %", 12.0),
        ],
    )
    .summary_line(format!("Generated: {}", today))
    .summary_line(format!("Year: {}", year));

    balances.sort_by_key(|(balance, leave_type)| {
        let (department, first, last) = staff.sort_key(balance.employee_id);
        let leave_type = leave_type.as_ref().map(|t| t.name.clone()).unwrap_or_default();
        (department, first, last, leave_type)
    });

    for (balance, leave_type) in balances {
        let Some(employee) = staff.employees.get(&balance.employee_id) else {
            continue;
        };

        document.push_row(vec![
            employee.employee_code.as_str().into(),
            full_name(employee).into(),
            staff.department_of(employee).into(),
            Cell::optional(leave_type.map(|t| t.name)),
            balance.total_days.into(),
            balance.used_days.into(),
            balance.remaining_days.into(),
            balance.carry_forward_days.into(),
            usage_percentage(balance.used_days, balance.total_days).into(),
        ]);
    }

    document
}

fn work_hours_document(
    staff: &Staff,
    mut logs: Vec<(entity::work_log::Model, Option<entity::project::Model>)>,
    today: NaiveDate,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Work Hours Report",
        vec![
            Column::new("Date", 12.0),
            Column::new("Employee ID", 15.0),
            Column::new("Employee Name", 25.0),
            Column::new("Department", 20.0),
            Column::new("Project", 25.0),
            Column::new("Hours Worked", 15.0),
            Column::new("Task Description", 40.0),
            Column::new("Status", 15.0),
        ],
    )
    .summary_line(format!("Generated: {}", today));
    if let Some(start_date) = start_date {
        document = document.summary_line(format!("From: {}", start_date));
    }
    if let Some(end_date) = end_date {
        document = document.summary_line(format!("To: {}", end_date));
    }

    logs.sort_by(|(a, _), (b, _)| {
        let (_, a_first, a_last) = staff.sort_key(a.employee_id);
        let (_, b_first, b_last) = staff.sort_key(b.employee_id);
        b.log_date
            .cmp(&a.log_date)
            .then_with(|| (a_first, a_last).cmp(&(b_first, b_last)))
    });

    for (log, project) in logs {
        let Some(employee) = staff.employees.get(&log.employee_id) else {
            continue;
        };

        document.push_row(vec![
            log.log_date.to_string().into(),
            employee.employee_code.as_str().into(),
            full_name(employee).into(),
            staff.department_of(employee).into(),
            project.map_or_else(|| "No Project".to_string(), |p| p.name).into(),
            log.hours_worked.into(),
            Cell::optional(log.task_description),
            log.status.to_value().into(),
        ]);
    }

    document
}

fn directory_document(
    staff: &Staff,
    roles: &HashMap<i32, String>,
    today: NaiveDate,
    status: Option<EmployeeStatus>,
) -> ReportDocument {
    let mut document = ReportDocument::new(
        "Employee Directory",
        vec![
            Column::new("Employee ID", 15.0),
            Column::new("Employee Name", 25.0),
            Column::new("Department", 20.0),
            Column::new("Role", 20.0),
            Column::new("Email", 30.0),
            Column::new("Phone", 15.0),
            Column::new("Hire Date", 12.0),
            Column::new("Status", 12.0),
        ],
    )
    .summary_line(format!("Generated: {}", today));
    if let Some(status) = status {
        document = document.summary_line(format!("Status: {}", status.to_value()));
    }

    let mut employees: Vec<&entity::employee::Model> = staff.employees.values().collect();
    employees.sort_by_key(|e| staff.sort_key(e.id));

    for employee in employees {
        document.push_row(vec![
            employee.employee_code.as_str().into(),
            full_name(employee).into(),
            staff.department_of(employee).into(),
            Cell::optional(roles.get(&employee.role_id).cloned()),
            employee.email.as_str().into(),
            Cell::optional(employee.phone.clone()),
            employee.hire_date.to_string().into(),
            employee.status.to_value().into(),
        ]);
    }

    document
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    /// Creates a new instance of [`ReportService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds and renders the report named by `slug`. Requires `view_all_reports`.
    ///
    /// # Returns
    /// - `Ok(GeneratedReport)` - The rendered file with its attachment name and content type
    /// - `Err(Error::NotFound)` - No report has that slug
    pub async fn generate(
        &self,
        user: &AuthUser,
        slug: &str,
        request: &GenerateReportDto,
    ) -> Result<GeneratedReport, Error> {
        user.require_any(&[permission::VIEW_ALL_REPORTS])?;

        let kind = ReportKind::from_slug(slug)
            .ok_or_else(|| Error::NotFound("Report type not found".to_string()))?;

        let document = self.build(kind, request).await?;
        let bytes = match request.format {
            ReportFormat::Pdf => pdf::render(&document),
            ReportFormat::Excel => xlsx::render(&document)?,
        };

        tracing::info!(
            report = kind.slug(),
            format = ?request.format,
            rows = document.rows.len(),
            "report generated"
        );

        Ok(GeneratedReport {
            filename: format!("{}.{}", kind.file_stem(), request.format.extension()),
            content_type: request.format.content_type(),
            bytes,
        })
    }

    async fn staff(&self, filter: EmployeeFilter) -> Result<Staff, Error> {
        let employees = EmployeeRepository::new(self.db).list_all(&filter).await?;
        let department_ids: Vec<i32> = employees.iter().map(|e| e.department_id).collect();
        let departments = DepartmentRepository::new(self.db)
            .names_by_ids(&department_ids)
            .await?;

        Ok(Staff::new(employees, departments))
    }

    async fn build(&self, kind: ReportKind, request: &GenerateReportDto) -> Result<ReportDocument, Error> {
        let today = today();
        let by_department = EmployeeFilter {
            department_id: request.department_id,
            ..Default::default()
        };

        match kind {
            ReportKind::EmployeePerformance => {
                let period = request.period.unwrap_or_default();
                let mut staff = self.staff(by_department).await?;
                if let Some(employee_id) = request.employee_id {
                    staff.employees.retain(|id, _| *id == employee_id);
                }

                let reviews = PerformanceReviewRepository::new(self.db)
                    .list_all(&ReviewFilter {
                        employee_ids: Some(staff.ids()),
                        status: Some(ReviewStatus::Published),
                        reviewed_since: Some(start_of_day(period_start(period, today)?)),
                        ..Default::default()
                    })
                    .await?;
                let reviewer_ids: Vec<i32> = reviews.iter().map(|r| r.reviewer_id).collect();
                let reviewers = EmployeeRepository::new(self.db)
                    .names_by_ids(&reviewer_ids)
                    .await?;

                Ok(performance_document(
                    &staff,
                    reviews,
                    &reviewers,
                    today,
                    period,
                    request.department_id.is_some(),
                ))
            }
            ReportKind::LeaveUsage => {
                let year = request.year.unwrap_or_else(|| today.year());
                let staff = self.staff(by_department).await?;
                let employee_ids = staff.ids();

                let balances = LeaveBalanceRepository::new(self.db)
                    .list_for_year(year, Some(&employee_ids), request.leave_type_id)
                    .await?;

                Ok(leave_usage_document(&staff, balances, today, year))
            }
            ReportKind::WorkHours => {
                let staff = self.staff(by_department).await?;

                let logs = WorkLogRepository::new(self.db)
                    .list_all(&WorkLogFilter {
                        employee_ids: Some(staff.ids()),
                        start_date: request.start_date,
                        end_date: request.end_date,
                        project_id: request.project_id,
                        ..Default::default()
                    })
                    .await?;

                Ok(work_hours_document(
                    &staff,
                    logs,
                    today,
                    request.start_date,
                    request.end_date,
                ))
            }
            ReportKind::EmployeeDirectory => {
                let staff = self
                    .staff(EmployeeFilter {
                        department_id: request.department_id,
                        status: request.status,
                        ..Default::default()
                    })
                    .await?;
                let role_ids: Vec<i32> = staff.employees.values().map(|e| e.role_id).collect();
                let roles = RoleRepository::new(self.db).names_by_ids(&role_ids).await?;

                Ok(directory_document(&staff, &roles, today, request.status))
            }
        }
    }

    /// Department summary, leave utilization and the work hours trend.
    ///
    /// Ratings cover Published reviews from the last three months, department hours the last
    /// month and utilization the current year's balances.
    pub async fn analytics(&self, user: &AuthUser) -> Result<ReportAnalyticsDto, Error> {
        user.require_any(&[permission::VIEW_ALL_REPORTS])?;

        let today = today();

        let departments = DepartmentRepository::new(self.db).list().await?;
        let active = EmployeeRepository::new(self.db).list_active().await?;
        let active_ids: Vec<i32> = active.iter().map(|e| e.id).collect();

        let reviews = PerformanceReviewRepository::new(self.db)
            .list_all(&ReviewFilter {
                employee_ids: Some(active_ids.clone()),
                status: Some(ReviewStatus::Published),
                reviewed_since: Some(start_of_day(months_before(today, 3)?)),
                ..Default::default()
            })
            .await?;

        let trend_start = months_before(today, analytics::TREND_MONTHS)?;
        let logs: Vec<entity::work_log::Model> = WorkLogRepository::new(self.db)
            .list_all(&WorkLogFilter {
                start_date: Some(trend_start),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|(log, _)| log)
            .collect();
        let last_month = months_before(today, 1)?;
        let recent_logs: Vec<entity::work_log::Model> = logs
            .iter()
            .filter(|l| l.log_date >= last_month)
            .cloned()
            .collect();

        let balances = LeaveBalanceRepository::new(self.db)
            .list_for_year(today.year(), None, None)
            .await?;

        Ok(ReportAnalyticsDto {
            department_summary: analytics::department_summary(
                &departments,
                &active,
                &reviews,
                &recent_logs,
            ),
            leave_utilization: analytics::leave_utilization(&balances),
            work_hours_trend: analytics::monthly_hours(&logs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use entity::sea_orm_active_enums::ProjectStatus;
    use hrdesk_test_utils::prelude::*;

    use super::{
        document::Cell, leave_usage_document, templates, usage_percentage, work_hours_document,
        Staff,
    };

    fn staff() -> Staff {
        let mut bob = factory::mock_employee(2, "EMP002");
        bob.first_name = "Bob".to_string();
        let mut alice = factory::mock_employee(1, "EMP001");
        alice.first_name = "Alice".to_string();

        Staff::new(
            vec![bob, alice],
            HashMap::from([(1, "Engineering".to_string())]),
        )
    }

    /// Expect rounded whole percentages and zero when no days were allocated
    #[test]
    fn usage_percentage_rounds() {
        assert_eq!(usage_percentage(5, 25), 20.0);
        assert_eq!(usage_percentage(1, 3), 33.0);
        assert_eq!(usage_percentage(2, 0), 0.0);
    }

    /// Expect one template per generatable report
    #[test]
    fn templates_cover_every_report() {
        let ids: Vec<String> = templates().into_iter().map(|t| t.id).collect();

        assert_eq!(
            ids,
            ["employee-performance", "leave-usage", "work-hours", "employee-directory"]
        );
    }

    /// Expect rows ordered by employee name with the usage percentage column
    #[test]
    fn leave_usage_rows() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let balances = vec![
            (factory::mock_leave_balance(2, 25, 5), None),
            (factory::mock_leave_balance(1, 10, 0), None),
        ];

        let document = leave_usage_document(&staff(), balances, day, 2024);

        assert_eq!(document.rows.len(), 2);
        assert_eq!(document.rows[0][1], Cell::from("Alice EMP001"));
        assert_eq!(document.rows[1][8], Cell::Number(20.0));
        assert!(document.summary.contains(&"Year: 2024".to_string()));
    }

    /// Expect logs without a project to render as No Project, newest first
    #[test]
    fn work_hours_rows() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let project = entity::project::Model {
            id: 1,
            name: "Payroll".to_string(),
            description: None,
            start_date: today,
            end_date: None,
            status: ProjectStatus::Active,
            manager_id: None,
            department_id: None,
        };
        let logs = vec![
            (
                factory::mock_work_log(1, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), 8.0),
                Some(project),
            ),
            (
                factory::mock_work_log(2, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(), 6.0),
                None,
            ),
        ];

        let document = work_hours_document(&staff(), logs, today, None, None);

        assert_eq!(document.rows[0][0], Cell::from("2025-03-04"));
        assert_eq!(document.rows[0][4], Cell::from("No Project"));
        assert_eq!(document.rows[1][4], Cell::from("Payroll"));
        assert_eq!(document.rows[1][7], Cell::from("Completed"));
    }
}
