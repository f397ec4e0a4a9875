//! Leave requests, approvals and balances.

use std::collections::HashMap;

use chrono::Datelike;
use entity::sea_orm_active_enums::{EmployeeStatus, LeaveStatus, NotificationPriority};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    model::leave::{
        AllBalancesQuery, EmployeeBalancesDto, LeaveApplicationDto, LeaveApplicationListDto,
        LeaveApplicationQuery, LeaveBalanceDto, LeaveBalanceQuery, LeaveTypeDto, SubmitLeaveDto,
        UpdateLeaveStatusDto,
    },
    server::{
        data::{
            department::DepartmentRepository,
            employee::{EmployeeFilter, EmployeeRepository},
            leave::{
                application::{LeaveApplicationFilter, LeaveApplicationRepository},
                balance::LeaveBalanceRepository,
                leave_type::LeaveTypeRepository,
            },
            notification::NewNotification,
        },
        error::{leave::LeaveError, Error},
        mail::{
            template::{self, LeaveSummary},
            Mailer,
        },
        model::{auth::AuthUser, permission},
        service::notification::{kind, NotificationService},
        util::{
            pagination::Page,
            time::{inclusive_days, today},
        },
    },
};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Converts applications into DTOs with employee, approver and leave type names.
async fn application_dtos<C: ConnectionTrait>(
    db: &C,
    applications: Vec<entity::leave_application::Model>,
) -> Result<Vec<LeaveApplicationDto>, Error> {
    let employee_ids: Vec<i32> = applications
        .iter()
        .flat_map(|a| std::iter::once(a.employee_id).chain(a.approved_by))
        .collect();

    let names = EmployeeRepository::new(db).names_by_ids(&employee_ids).await?;
    let leave_types: HashMap<i32, String> = LeaveTypeRepository::new(db)
        .list()
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    Ok(applications
        .into_iter()
        .map(|a| LeaveApplicationDto {
            employee_name: names.get(&a.employee_id).cloned(),
            leave_type_name: leave_types.get(&a.leave_type_id).cloned(),
            approver_name: a.approved_by.and_then(|id| names.get(&id).cloned()),
            id: a.id,
            employee_id: a.employee_id,
            leave_type_id: a.leave_type_id,
            start_date: a.start_date,
            end_date: a.end_date,
            total_days: a.total_days,
            reason: a.reason,
            attachments: a.attachments.0,
            status: a.status,
            applied_at: a.applied_at,
            approved_by: a.approved_by,
            approved_at: a.approved_at,
            rejection_reason: a.rejection_reason,
        })
        .collect())
}

async fn application_dto<C: ConnectionTrait>(
    db: &C,
    application: entity::leave_application::Model,
) -> Result<LeaveApplicationDto, Error> {
    application_dtos(db, vec![application])
        .await?
        .pop()
        .ok_or_else(|| Error::InternalError("Application conversion returned no rows".to_string()))
}

fn balance_dto(
    balance: entity::leave_balance::Model,
    leave_type: Option<entity::leave_type::Model>,
) -> LeaveBalanceDto {
    LeaveBalanceDto {
        id: balance.id,
        employee_id: balance.employee_id,
        leave_type_id: balance.leave_type_id,
        leave_type_name: leave_type.map(|t| t.name),
        year: balance.year,
        total_days: balance.total_days,
        used_days: balance.used_days,
        carry_forward_days: balance.carry_forward_days,
        remaining_days: balance.remaining_days,
    }
}

/// Service for the leave request workflow.
///
/// Submission checks the applicant's current-year balance without reserving days. Approval
/// re-checks the same balance inside the transaction that charges it, so concurrent requests
/// cannot overdraw a balance.
pub struct LeaveService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> LeaveService<'a> {
    /// Creates a new instance of [`LeaveService`]
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    /// Lists applications newest first. Employees outside management only see their own.
    pub async fn list(
        &self,
        user: &AuthUser,
        query: &LeaveApplicationQuery,
    ) -> Result<LeaveApplicationListDto, Error> {
        let page = Page::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = LeaveApplicationFilter {
            employee_id: user.scope_employee(query.employee_id),
            status: query.status,
            leave_type_id: query.leave_type_id,
        };

        let (applications, total) = LeaveApplicationRepository::new(self.db)
            .list(&filter, page.index(), page.limit)
            .await?;

        Ok(LeaveApplicationListDto {
            applications: application_dtos(self.db, applications).await?,
            pagination: page.to_dto(total),
        })
    }

    /// Submits a Pending leave application for the caller.
    ///
    /// # Returns
    /// - `Ok(LeaveApplicationDto)` - The stored application
    /// - `Err(LeaveError::NoBalance)` - The caller has no balance for the leave type this year
    /// - `Err(LeaveError::InsufficientBalance)` - The request exceeds the remaining days
    pub async fn submit(
        &self,
        user: &AuthUser,
        request: &SubmitLeaveDto,
    ) -> Result<LeaveApplicationDto, Error> {
        let total_days = inclusive_days(request.start_date, request.end_date);
        let year = today().year();

        let balance = LeaveBalanceRepository::new(self.db)
            .find(user.id, request.leave_type_id, year)
            .await?
            .ok_or(LeaveError::NoBalance)?;

        if total_days > balance.remaining_days {
            return Err(LeaveError::InsufficientBalance {
                available: balance.remaining_days,
                requested: total_days,
            }
            .into());
        }

        let application = LeaveApplicationRepository::new(self.db)
            .create(user.id, request, total_days, year)
            .await?;
        let dto = application_dto(self.db, application).await?;

        tracing::info!(
            application_id = dto.id,
            employee_id = user.id,
            total_days,
            "leave application submitted"
        );

        if let Some(manager_id) = user.manager_id {
            self.notify_manager(user, manager_id, &dto).await;
        }

        Ok(dto)
    }

    async fn notify_manager(&self, user: &AuthUser, manager_id: i32, application: &LeaveApplicationDto) {
        let manager = match EmployeeRepository::new(self.db).get(manager_id).await {
            Ok(manager) => manager,
            Err(err) => {
                tracing::warn!(manager_id, error = %err, "failed to load manager for leave notification");
                None
            }
        };
        let Some(manager) = manager else {
            return;
        };

        let leave_type = application.leave_type_name.as_deref().unwrap_or("Leave");
        let summary = LeaveSummary {
            leave_type,
            start_date: application.start_date,
            end_date: application.end_date,
            total_days: application.total_days,
        };
        let email = template::leave_request(
            &manager.email,
            &user.full_name(),
            &user.employee_code,
            &summary,
            application.reason.as_deref(),
        );

        NotificationService::new(self.db, self.mailer)
            .dispatch_best_effort(
                NewNotification {
                    recipient_id: manager.id,
                    sender_id: Some(user.id),
                    kind: kind::LEAVE_REQUEST.to_string(),
                    title: "New Leave Request".to_string(),
                    message: format!(
                        "{} has requested {} days of {} from {} to {}",
                        user.full_name(),
                        application.total_days,
                        leave_type,
                        application.start_date,
                        application.end_date
                    ),
                    data: Some(json!({ "leaveApplicationId": application.id })),
                    priority: NotificationPriority::High,
                },
                Some(email),
            )
            .await;
    }

    /// Approves or rejects a Pending application. Requires the manager class.
    ///
    /// The status change and, on approval, the balance charge commit together. An application
    /// that is no longer Pending is reported as [`LeaveError::NotPending`] and its balance is
    /// never charged twice.
    pub async fn decide(
        &self,
        user: &AuthUser,
        id: i32,
        request: &UpdateLeaveStatusDto,
    ) -> Result<LeaveApplicationDto, Error> {
        user.require_manager()?;

        let status = LeaveStatus::from(request.status);
        let rejection_reason = match status {
            LeaveStatus::Rejected => request.rejection_reason.clone(),
            _ => None,
        };

        let txn = self.db.begin().await?;
        let application_repo = LeaveApplicationRepository::new(&txn);

        let application = application_repo
            .get(id)
            .await?
            .filter(|a| a.status == LeaveStatus::Pending)
            .ok_or(LeaveError::NotPending)?;

        let updated = application_repo
            .decide(id, status, user.id, rejection_reason)
            .await?;
        if updated == 0 {
            return Err(LeaveError::NotPending.into());
        }

        if status == LeaveStatus::Approved {
            let balance_repo = LeaveBalanceRepository::new(&txn);
            let balance = balance_repo
                .find(
                    application.employee_id,
                    application.leave_type_id,
                    application.balance_year,
                )
                .await?
                .ok_or(LeaveError::NoBalance)?;

            if application.total_days > balance.remaining_days {
                return Err(LeaveError::InsufficientBalance {
                    available: balance.remaining_days,
                    requested: application.total_days,
                }
                .into());
            }

            balance_repo
                .add_used_days(balance, application.total_days)
                .await?;
        }

        let decided = application_repo
            .get(id)
            .await?
            .ok_or(LeaveError::NotPending)?;
        let dto = application_dto(&txn, decided).await?;

        txn.commit().await?;

        tracing::info!(
            application_id = id,
            approver_id = user.id,
            status = ?status,
            "leave application decided"
        );

        self.notify_decision(user, &dto).await;

        Ok(dto)
    }

    async fn notify_decision(&self, user: &AuthUser, application: &LeaveApplicationDto) {
        let approved = application.status == LeaveStatus::Approved;
        let leave_type = application.leave_type_name.as_deref().unwrap_or("Leave");

        let email = match EmployeeRepository::new(self.db).get(application.employee_id).await {
            Ok(Some(employee)) => {
                let summary = LeaveSummary {
                    leave_type,
                    start_date: application.start_date,
                    end_date: application.end_date,
                    total_days: application.total_days,
                };
                Some(template::leave_decision(
                    &employee.email,
                    &summary,
                    approved,
                    application.rejection_reason.as_deref(),
                ))
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    employee_id = application.employee_id,
                    error = %err,
                    "failed to load employee for leave decision email"
                );
                None
            }
        };

        let (kind, title, outcome) = if approved {
            (kind::LEAVE_APPROVED, "Leave Request Approved", "approved")
        } else {
            (kind::LEAVE_REJECTED, "Leave Request Rejected", "rejected")
        };

        NotificationService::new(self.db, self.mailer)
            .dispatch_best_effort(
                NewNotification {
                    recipient_id: application.employee_id,
                    sender_id: Some(user.id),
                    kind: kind.to_string(),
                    title: title.to_string(),
                    message: format!(
                        "Your {} request from {} to {} has been {}",
                        leave_type, application.start_date, application.end_date, outcome
                    ),
                    data: Some(json!({ "leaveApplicationId": application.id })),
                    priority: NotificationPriority::Medium,
                },
                email,
            )
            .await;
    }

    /// Current-year balances of the caller, or of `employeeId` for managers and HR.
    pub async fn balances(
        &self,
        user: &AuthUser,
        query: &LeaveBalanceQuery,
    ) -> Result<Vec<LeaveBalanceDto>, Error> {
        let employee_id = user.scope_employee(query.employee_id).unwrap_or(user.id);

        let balances = LeaveBalanceRepository::new(self.db)
            .list_for_employee(employee_id, today().year())
            .await?;

        Ok(balances
            .into_iter()
            .map(|(balance, leave_type)| balance_dto(balance, leave_type))
            .collect())
    }

    /// Balances of every Active employee for a year, grouped per employee.
    ///
    /// Requires `manage_leave` or `view_all_reports`.
    pub async fn all_balances(
        &self,
        user: &AuthUser,
        query: &AllBalancesQuery,
    ) -> Result<Vec<EmployeeBalancesDto>, Error> {
        user.require_any(&[permission::MANAGE_LEAVE, permission::VIEW_ALL_REPORTS])?;

        let year = query.year.unwrap_or_else(|| today().year());
        let employees = EmployeeRepository::new(self.db)
            .list_all(&EmployeeFilter {
                department_id: query.department_id,
                status: Some(EmployeeStatus::Active),
                ..Default::default()
            })
            .await?;
        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let employee_ids: Vec<i32> = employees.iter().map(|e| e.id).collect();
        let department_ids: Vec<i32> = employees.iter().map(|e| e.department_id).collect();
        let departments = DepartmentRepository::new(self.db)
            .names_by_ids(&department_ids)
            .await?;

        let mut grouped: HashMap<i32, Vec<LeaveBalanceDto>> = HashMap::new();
        for (balance, leave_type) in LeaveBalanceRepository::new(self.db)
            .list_for_year(year, Some(&employee_ids), None)
            .await?
        {
            grouped
                .entry(balance.employee_id)
                .or_default()
                .push(balance_dto(balance, leave_type));
        }

        Ok(employees
            .into_iter()
            .map(|e| EmployeeBalancesDto {
                balances: grouped.remove(&e.id).unwrap_or_default(),
                department_name: departments.get(&e.department_id).cloned(),
                employee_name: format!("{} {}", e.first_name, e.last_name),
                employee_id: e.id,
                employee_code: e.employee_code,
            })
            .collect())
    }

    pub async fn leave_types(&self) -> Result<Vec<LeaveTypeDto>, Error> {
        let leave_types = LeaveTypeRepository::new(self.db).list().await?;

        Ok(leave_types
            .into_iter()
            .map(|t| LeaveTypeDto {
                id: t.id,
                name: t.name,
                description: t.description,
                max_days_per_year: t.max_days_per_year,
                carry_forward: t.carry_forward,
                requires_approval: t.requires_approval,
            })
            .collect())
    }
}
