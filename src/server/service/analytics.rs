//! Aggregations shared by performance analytics and the reporting dashboard.
//!
//! All functions are pure: callers load the rows and these fold them into DTOs.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::{
    model::{
        performance::{DepartmentPerformanceDto, MonthlyHoursDto, TopPerformerDto},
        report::{DepartmentSummaryDto, LeaveUtilizationDto},
    },
    server::util::decimal::{to_decimal, to_f64},
};

/// Number of employees listed as top performers.
pub const TOP_PERFORMER_LIMIT: usize = 10;
/// Months covered by the work hours trend.
pub const TREND_MONTHS: u32 = 6;

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Default)]
struct RatingAccumulator {
    sum: f64,
    count: u64,
    employees: HashSet<i32>,
}

impl RatingAccumulator {
    fn add(&mut self, employee_id: i32, rating: f64) {
        self.sum += rating;
        self.count += 1;
        self.employees.insert(employee_id);
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round_to(self.sum / self.count as f64, 2)
        }
    }
}

fn by_rating_desc(a: f64, b: f64) -> std::cmp::Ordering {
    b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
}

/// Average rating per department over rated reviews, best first.
///
/// `employee_count` counts the distinct reviewed employees. Reviews of employees missing
/// from `employees` are ignored.
pub fn department_performance(
    reviews: &[entity::performance_review::Model],
    employees: &HashMap<i32, entity::employee::Model>,
    departments: &HashMap<i32, String>,
) -> Vec<DepartmentPerformanceDto> {
    let mut per_department: HashMap<i32, RatingAccumulator> = HashMap::new();

    for review in reviews {
        let (Some(rating), Some(employee)) =
            (review.overall_rating, employees.get(&review.employee_id))
        else {
            continue;
        };
        per_department
            .entry(employee.department_id)
            .or_default()
            .add(employee.id, rating);
    }

    let mut result: Vec<DepartmentPerformanceDto> = per_department
        .into_iter()
        .map(|(department_id, acc)| DepartmentPerformanceDto {
            department_id,
            department_name: departments
                .get(&department_id)
                .cloned()
                .unwrap_or_default(),
            average_rating: acc.average(),
            review_count: acc.count,
            employee_count: acc.employees.len() as u64,
        })
        .collect();

    result.sort_by(|a, b| {
        by_rating_desc(a.average_rating, b.average_rating)
            .then_with(|| a.department_name.cmp(&b.department_name))
    });
    result
}

/// The [`TOP_PERFORMER_LIMIT`] employees with the best average rating.
pub fn top_performers(
    reviews: &[entity::performance_review::Model],
    employees: &HashMap<i32, entity::employee::Model>,
    departments: &HashMap<i32, String>,
) -> Vec<TopPerformerDto> {
    let mut per_employee: HashMap<i32, RatingAccumulator> = HashMap::new();

    for review in reviews {
        if let Some(rating) = review.overall_rating {
            per_employee
                .entry(review.employee_id)
                .or_default()
                .add(review.employee_id, rating);
        }
    }

    let mut result: Vec<TopPerformerDto> = per_employee
        .into_iter()
        .filter_map(|(employee_id, acc)| {
            let employee = employees.get(&employee_id)?;

            Some(TopPerformerDto {
                employee_id,
                employee_code: employee.employee_code.clone(),
                employee_name: format!("{} {}", employee.first_name, employee.last_name),
                department_name: departments.get(&employee.department_id).cloned(),
                average_rating: acc.average(),
                review_count: acc.count,
            })
        })
        .collect();

    result.sort_by(|a, b| {
        by_rating_desc(a.average_rating, b.average_rating)
            .then_with(|| b.review_count.cmp(&a.review_count))
            .then_with(|| a.employee_name.cmp(&b.employee_name))
    });
    result.truncate(TOP_PERFORMER_LIMIT);
    result
}

/// Work hours bucketed by calendar month, newest month first.
///
/// `average_hours` is the mean hours per work log entry in that month.
pub fn monthly_hours(logs: &[entity::work_log::Model]) -> Vec<MonthlyHoursDto> {
    #[derive(Default)]
    struct Month {
        total: Decimal,
        entries: u64,
        employees: HashSet<i32>,
    }

    let mut months: BTreeMap<(i32, u32), Month> = BTreeMap::new();
    for log in logs {
        let month = months
            .entry((log.log_date.year(), log.log_date.month()))
            .or_default();
        month.total += to_decimal(log.hours_worked);
        month.entries += 1;
        month.employees.insert(log.employee_id);
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), m)| MonthlyHoursDto {
            month: format!("{:04}-{:02}", year, month),
            total_hours: to_f64(m.total),
            average_hours: to_f64(m.total / Decimal::from(m.entries)),
            employee_count: m.employees.len() as u64,
        })
        .collect()
}

/// Share of allocated days used per leave type, highest first.
///
/// The rate is `used * 100 / total` rounded to one decimal, or 0 when nothing was allocated.
pub fn leave_utilization(
    balances: &[(entity::leave_balance::Model, Option<entity::leave_type::Model>)],
) -> Vec<LeaveUtilizationDto> {
    let mut per_type: HashMap<i32, (String, i64, i64)> = HashMap::new();

    for (balance, leave_type) in balances {
        let Some(leave_type) = leave_type else {
            continue;
        };
        let entry = per_type
            .entry(leave_type.id)
            .or_insert_with(|| (leave_type.name.clone(), 0, 0));
        entry.1 += i64::from(balance.total_days);
        entry.2 += i64::from(balance.used_days);
    }

    let mut result: Vec<LeaveUtilizationDto> = per_type
        .into_iter()
        .map(|(leave_type_id, (name, total, used))| LeaveUtilizationDto {
            leave_type_id,
            leave_type_name: name,
            total_days: total,
            used_days: used,
            utilization_rate: if total > 0 {
                round_to(used as f64 * 100.0 / total as f64, 1)
            } else {
                0.0
            },
        })
        .collect();

    result.sort_by(|a, b| {
        by_rating_desc(a.utilization_rate, b.utilization_rate)
            .then_with(|| a.leave_type_name.cmp(&b.leave_type_name))
    });
    result
}

/// One row per department ordered by name, including departments without staff.
///
/// # Arguments
/// - `departments` - Every department
/// - `active_employees` - Active employees only
/// - `reviews` - Published reviews inside the rating window
/// - `logs` - Work logs inside the hours window
pub fn department_summary(
    departments: &[entity::department::Model],
    active_employees: &[entity::employee::Model],
    reviews: &[entity::performance_review::Model],
    logs: &[entity::work_log::Model],
) -> Vec<DepartmentSummaryDto> {
    let department_of: HashMap<i32, i32> = active_employees
        .iter()
        .map(|e| (e.id, e.department_id))
        .collect();

    let mut headcount: HashMap<i32, u64> = HashMap::new();
    for employee in active_employees {
        *headcount.entry(employee.department_id).or_default() += 1;
    }

    let mut ratings: HashMap<i32, RatingAccumulator> = HashMap::new();
    for review in reviews {
        if let (Some(rating), Some(department_id)) =
            (review.overall_rating, department_of.get(&review.employee_id))
        {
            ratings
                .entry(*department_id)
                .or_default()
                .add(review.employee_id, rating);
        }
    }

    let mut hours: HashMap<i32, Decimal> = HashMap::new();
    for log in logs {
        if let Some(department_id) = department_of.get(&log.employee_id) {
            *hours.entry(*department_id).or_default() += to_decimal(log.hours_worked);
        }
    }

    let mut result: Vec<DepartmentSummaryDto> = departments
        .iter()
        .map(|d| DepartmentSummaryDto {
            department_id: d.id,
            department_name: d.name.clone(),
            active_employees: headcount.get(&d.id).copied().unwrap_or(0),
            average_rating: ratings.get(&d.id).map(RatingAccumulator::average),
            total_hours_last_month: to_f64(hours.get(&d.id).copied().unwrap_or_default()),
        })
        .collect();

    result.sort_by(|a, b| a.department_name.cmp(&b.department_name));
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use hrdesk_test_utils::prelude::*;

    use super::*;

    fn employees(list: Vec<entity::employee::Model>) -> HashMap<i32, entity::employee::Model> {
        list.into_iter().map(|e| (e.id, e)).collect()
    }

    fn departments() -> HashMap<i32, String> {
        HashMap::from([(1, "Engineering".to_string()), (2, "Sales".to_string())])
    }

    /// Expect departments ordered by average rating with distinct reviewed employees counted
    #[test]
    fn department_performance_orders_by_average() {
        let mut seller = factory::mock_employee(3, "EMP003");
        seller.department_id = 2;
        let staff = employees(vec![
            factory::mock_employee(1, "EMP001"),
            factory::mock_employee(2, "EMP002"),
            seller,
        ]);
        let reviews = vec![
            factory::mock_review(1, 1, Some(3.0)),
            factory::mock_review(2, 1, Some(4.0)),
            factory::mock_review(3, 2, Some(3.5)),
            factory::mock_review(4, 3, Some(4.5)),
            factory::mock_review(5, 2, None),
        ];

        let result = department_performance(&reviews, &staff, &departments());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].department_name, "Sales");
        assert_eq!(result[0].average_rating, 4.5);
        assert_eq!(result[1].department_name, "Engineering");
        assert_eq!(result[1].average_rating, 3.5);
        assert_eq!(result[1].review_count, 3);
        assert_eq!(result[1].employee_count, 2);
    }

    /// Expect at most ten performers, best first
    #[test]
    fn top_performers_limits_and_sorts() {
        let staff = employees(
            (1..=12)
                .map(|id| factory::mock_employee(id, &format!("EMP{:03}", id)))
                .collect(),
        );
        let reviews: Vec<_> = (1..=12)
            .map(|id| factory::mock_review(id, id, Some(1.0 + f64::from(id) / 4.0)))
            .collect();

        let result = top_performers(&reviews, &staff, &departments());

        assert_eq!(result.len(), TOP_PERFORMER_LIMIT);
        assert_eq!(result[0].employee_id, 12);
        assert_eq!(result[9].employee_id, 3);
    }

    /// Expect months newest first with the per-entry average and distinct employees
    #[test]
    fn monthly_hours_groups_by_month() {
        let logs = vec![
            factory::mock_work_log(1, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 8.0),
            factory::mock_work_log(1, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), 6.0),
            factory::mock_work_log(2, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), 7.0),
            factory::mock_work_log(2, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 4.0),
        ];

        let result = monthly_hours(&logs);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].month, "2024-06");
        assert_eq!(result[1].month, "2024-05");
        assert_eq!(result[1].total_hours, 21.0);
        assert_eq!(result[1].average_hours, 7.0);
        assert_eq!(result[1].employee_count, 2);
    }

    fn leave_type(id: i32, name: &str) -> entity::leave_type::Model {
        entity::leave_type::Model {
            id,
            name: name.to_string(),
            description: None,
            max_days_per_year: 10,
            carry_forward: false,
            requires_approval: true,
        }
    }

    /// Expect utilization rounded to one decimal and zero for unallocated types
    #[test]
    fn leave_utilization_rounds_rate() {
        let mut sick = factory::mock_leave_balance(1, 0, 0);
        sick.leave_type_id = 2;
        let balances = vec![
            (factory::mock_leave_balance(1, 25, 5), Some(leave_type(1, "Annual Leave"))),
            (factory::mock_leave_balance(2, 20, 3), Some(leave_type(1, "Annual Leave"))),
            (sick, Some(leave_type(2, "Sick Leave"))),
        ];

        let result = leave_utilization(&balances);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].leave_type_name, "Annual Leave");
        assert_eq!(result[0].total_days, 45);
        assert_eq!(result[0].used_days, 8);
        assert_eq!(result[0].utilization_rate, 17.8);
        assert_eq!(result[1].utilization_rate, 0.0);
    }
}
