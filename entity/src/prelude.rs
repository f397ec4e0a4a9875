pub use super::audit_log::Entity as AuditLog;
pub use super::department::Entity as Department;
pub use super::employee::Entity as Employee;
pub use super::leave_application::Entity as LeaveApplication;
pub use super::leave_balance::Entity as LeaveBalance;
pub use super::leave_type::Entity as LeaveType;
pub use super::notification::Entity as Notification;
pub use super::performance_metric::Entity as PerformanceMetric;
pub use super::performance_review::Entity as PerformanceReview;
pub use super::project::Entity as Project;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::work_log::Entity as WorkLog;
