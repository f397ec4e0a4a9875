//! Factory functions for generating in-memory database models.
//!
//! These build model instances with standard test values without touching the database,
//! for unit tests of pure functions such as report builders.

use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{EmployeeStatus, ReviewStatus, WorkLogStatus};

/// Create an Active employee model with the given id and code.
pub fn mock_employee(id: i32, employee_code: &str) -> entity::employee::Model {
    let now = Utc::now().naive_utc();

    entity::employee::Model {
        id,
        employee_code: employee_code.to_string(),
        first_name: "Test".to_string(),
        last_name: employee_code.to_string(),
        email: format!("{}@example.com", employee_code.to_lowercase()),
        phone: None,
        date_of_birth: None,
        hire_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap_or_default(),
        department_id: 1,
        role_id: 1,
        manager_id: None,
        salary: None,
        address: None,
        emergency_contact: None,
        status: EmployeeStatus::Active,
        password_hash: String::new(),
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create a leave balance model for year 2024.
pub fn mock_leave_balance(
    employee_id: i32,
    total_days: i32,
    used_days: i32,
) -> entity::leave_balance::Model {
    entity::leave_balance::Model {
        id: 1,
        employee_id,
        leave_type_id: 1,
        year: 2024,
        total_days,
        used_days,
        carry_forward_days: 0,
        remaining_days: total_days - used_days,
        updated_at: Utc::now().naive_utc(),
    }
}

/// Create a completed work log model without a project.
pub fn mock_work_log(employee_id: i32, log_date: NaiveDate, hours_worked: f64) -> entity::work_log::Model {
    let now = Utc::now().naive_utc();

    entity::work_log::Model {
        id: 1,
        employee_id,
        project_id: None,
        log_date,
        hours_worked,
        task_description: None,
        status: WorkLogStatus::Completed,
        created_at: now,
        updated_at: now,
    }
}

/// Create a Published review model rated `overall_rating`.
pub fn mock_review(
    id: i32,
    employee_id: i32,
    overall_rating: Option<f64>,
) -> entity::performance_review::Model {
    let now = Utc::now().naive_utc();

    entity::performance_review::Model {
        id,
        employee_id,
        reviewer_id: 1,
        review_period: "2024-Q4".to_string(),
        overall_rating,
        goals: None,
        achievements: None,
        areas_for_improvement: None,
        feedback: None,
        employee_comments: None,
        status: ReviewStatus::Published,
        review_date: now,
        created_at: now,
        updated_at: now,
    }
}
