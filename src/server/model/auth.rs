use serde::{Deserialize, Serialize};

use crate::{
    model::auth::AuthUserDto,
    server::{error::auth::AuthError, model::permission},
};

/// Signing settings for access tokens.
#[derive(Clone, Debug)]
pub struct TokenSettings {
    /// HS256 signing secret.
    pub secret: String,
    /// Lifetime of an issued token.
    pub expires_in_hours: i64,
}

/// Claims carried by an access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Employee ID
    pub sub: i32,
    pub employee_code: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// The employee making the current request, resolved from a verified access token.
///
/// Only Active employees are ever resolved into an `AuthUser`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: i32,
    pub department_name: Option<String>,
    pub manager_id: Option<i32>,
    pub role_name: String,
    pub permissions: Vec<String>,
}

impl AuthUser {
    /// Whether the caller was granted `permission`, directly or through `all`.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == permission || p == permission::ALL)
    }

    /// Accepts when the caller holds at least one of `permissions`.
    ///
    /// # Returns
    /// - `Ok(())` - Caller holds one of the permissions or `all`
    /// - `Err(AuthError::Forbidden)` - None of the permissions are granted
    pub fn require_any(&self, permissions: &[&str]) -> Result<(), AuthError> {
        if permissions.iter().any(|p| self.has_permission(p)) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Manager class: the role name contains "Manager" or the role grants `all`.
    pub fn is_manager(&self) -> bool {
        self.role_name.contains("Manager") || self.permissions.iter().any(|p| p == permission::ALL)
    }

    /// Whether the role belongs to human resources.
    pub fn is_hr(&self) -> bool {
        self.role_name.contains("HR")
    }

    /// Managers and HR may see other employees' leave, work logs and reviews.
    pub fn is_manager_or_hr(&self) -> bool {
        self.is_manager() || self.is_hr()
    }

    pub fn require_manager(&self) -> Result<(), AuthError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(AuthError::ManagerRequired)
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Restricts a requested employee filter to the caller unless they may see others.
    pub fn scope_employee(&self, requested: Option<i32>) -> Option<i32> {
        if self.is_manager_or_hr() {
            requested
        } else {
            Some(self.id)
        }
    }
}

impl From<AuthUser> for AuthUserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            employee_code: user.employee_code,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role_name,
            permissions: user.permissions,
            department: user.department_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthUser;

    fn user(role: &str, permissions: &[&str]) -> AuthUser {
        AuthUser {
            id: 1,
            employee_code: "EMP001".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "emp001@example.com".to_string(),
            department_id: 1,
            department_name: None,
            manager_id: None,
            role_name: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Expect the wildcard permission to satisfy any requirement
    #[test]
    fn all_grants_everything() {
        let admin = user("Admin", &["all"]);

        assert!(admin.require_any(&["manage_employees"]).is_ok());
        assert!(admin.is_manager());
    }

    /// Expect a permission outside the granted set to be rejected
    #[test]
    fn missing_permission_is_forbidden() {
        let employee = user("Employee", &["request_leave", "log_hours"]);

        assert!(employee.require_any(&["manage_employees", "view_all_reports"]).is_err());
        assert!(employee.require_any(&["log_hours"]).is_ok());
    }

    /// Expect HR roles to count as manager-or-HR and as managers only via the name
    #[test]
    fn hr_manager_classification() {
        let hr = user("HR Manager", &["manage_employees"]);
        let hr_assistant = user("HR Assistant", &["view_profile"]);

        assert!(hr.is_manager());
        assert!(!hr_assistant.is_manager());
        assert!(hr_assistant.is_manager_or_hr());
    }

    /// Expect non-privileged callers to be scoped to their own records
    #[test]
    fn scope_employee_limits_regular_employees() {
        let employee = user("Employee", &[]);
        let manager = user("Manager", &["manage_team"]);

        assert_eq!(employee.scope_employee(Some(7)), Some(1));
        assert_eq!(manager.scope_employee(Some(7)), Some(7));
        assert_eq!(manager.scope_employee(None), None);
    }
}
