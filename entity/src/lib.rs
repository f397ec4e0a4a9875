pub mod prelude;

pub mod audit_log;
pub mod department;
pub mod employee;
pub mod leave_application;
pub mod leave_balance;
pub mod leave_type;
pub mod notification;
pub mod performance_metric;
pub mod performance_review;
pub mod project;
pub mod role;
pub mod role_permission;
pub mod sea_orm_active_enums;
pub mod types;
pub mod work_log;
