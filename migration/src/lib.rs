pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_department_table;
mod m20251101_000002_create_role_table;
mod m20251101_000003_create_role_permission_table;
mod m20251101_000004_create_employee_table;
mod m20251101_000005_create_leave_type_table;
mod m20251101_000006_create_leave_balance_table;
mod m20251101_000007_create_leave_application_table;
mod m20251101_000008_create_project_table;
mod m20251101_000009_create_work_log_table;
mod m20251101_000010_create_performance_review_table;
mod m20251101_000011_create_performance_metric_table;
mod m20251101_000012_create_notification_table;
mod m20251101_000013_create_audit_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_department_table::Migration),
            Box::new(m20251101_000002_create_role_table::Migration),
            Box::new(m20251101_000003_create_role_permission_table::Migration),
            Box::new(m20251101_000004_create_employee_table::Migration),
            Box::new(m20251101_000005_create_leave_type_table::Migration),
            Box::new(m20251101_000006_create_leave_balance_table::Migration),
            Box::new(m20251101_000007_create_leave_application_table::Migration),
            Box::new(m20251101_000008_create_project_table::Migration),
            Box::new(m20251101_000009_create_work_log_table::Migration),
            Box::new(m20251101_000010_create_performance_review_table::Migration),
            Box::new(m20251101_000011_create_performance_metric_table::Migration),
            Box::new(m20251101_000012_create_notification_table::Migration),
            Box::new(m20251101_000013_create_audit_log_table::Migration),
        ]
    }
}
