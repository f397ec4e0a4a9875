//! Permission strings granted to roles.

/// Grants every permission.
pub const ALL: &str = "all";
pub const MANAGE_EMPLOYEES: &str = "manage_employees";
pub const MANAGE_LEAVE: &str = "manage_leave";
pub const VIEW_ALL_REPORTS: &str = "view_all_reports";
pub const MANAGE_TEAM: &str = "manage_team";
pub const APPROVE_LEAVE: &str = "approve_leave";
pub const VIEW_REPORTS: &str = "view_reports";
pub const VIEW_PROFILE: &str = "view_profile";
pub const REQUEST_LEAVE: &str = "request_leave";
pub const LOG_HOURS: &str = "log_hours";
/// Allows sending notifications to arbitrary employees.
pub const MANAGE_NOTIFICATIONS: &str = "manage_notifications";
