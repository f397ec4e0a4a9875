//! Login, token issuance and caller resolution.

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::EmployeeStatus;
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{
        AuthUserDto, ChangePasswordDto, LoginDto, LoginResponseDto, ProfileDto, TokenDto,
    },
    server::{
        data::{department::DepartmentRepository, employee::EmployeeRepository, role::RoleRepository},
        error::{auth::AuthError, Error},
        model::auth::{AuthUser, Claims, TokenSettings},
        service::employee::employee_dtos,
        util::password::{hash_password, verify_password},
    },
};

/// Service for authenticating employees and managing their credentials.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenSettings,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenSettings) -> Self {
        Self { db, tokens }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// # Arguments
    /// - `credentials` - Email and plain-text password
    ///
    /// # Returns
    /// - `Ok(LoginResponseDto)` - Token plus the caller's identity and permissions
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountNotActive)` - The employee is not Active
    pub async fn login(&self, credentials: &LoginDto) -> Result<LoginResponseDto, Error> {
        let employee_repo = EmployeeRepository::new(self.db);

        let Some(employee) = employee_repo.find_by_email(&credentials.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if employee.status != EmployeeStatus::Active {
            return Err(AuthError::AccountNotActive.into());
        }

        if !verify_password(&credentials.password, &employee.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        employee_repo.set_last_login(employee.id).await?;

        let user = self.load_user(employee).await?;
        let token = self.issue_token(&user)?;

        tracing::info!(employee_id = user.id, "employee logged in");

        Ok(LoginResponseDto {
            message: "Login successful".to_string(),
            token,
            user: AuthUserDto::from(user),
        })
    }

    /// Signs an HS256 token for `user` that expires after the configured lifetime.
    pub fn issue_token(&self, user: &AuthUser) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            employee_code: user.employee_code.clone(),
            email: user.email.clone(),
            role: user.role_name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.tokens.expires_in_hours)).timestamp(),
        };

        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.tokens.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenEncoding(e).into())
    }

    /// Checks the signature and expiry of a token.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid
    /// - `Err(AuthError::TokenExpired)` - Token is past its expiry
    /// - `Err(AuthError::InvalidToken)` - Signature, algorithm or structure is wrong
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.tokens.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }

    /// Resolves a bearer token into the Active employee it was issued to.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - Caller with role and permissions loaded
    /// - `Err(AuthError::AccountInactive)` - The employee no longer exists or is not Active
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, Error> {
        let claims = self.verify_token(token)?;

        let employee = EmployeeRepository::new(self.db)
            .get(claims.sub)
            .await?
            .filter(|e| e.status == EmployeeStatus::Active)
            .ok_or(AuthError::AccountInactive)?;

        self.load_user(employee).await
    }

    /// The caller's full employee record with their permissions.
    pub async fn profile(&self, user: &AuthUser) -> Result<ProfileDto, Error> {
        let employee = EmployeeRepository::new(self.db)
            .get(user.id)
            .await?
            .ok_or_else(|| Error::NotFound("Employee not found".to_string()))?;

        let employee = employee_dtos(self.db, vec![employee])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InternalError("Employee lookup returned no rows".to_string()))?;

        Ok(ProfileDto {
            employee,
            permissions: user.permissions.clone(),
        })
    }

    /// Replaces the caller's password after verifying the current one.
    ///
    /// # Returns
    /// - `Ok(())` - The new hash was stored
    /// - `Err(AuthError::IncorrectPassword)` - `current_password` does not match
    pub async fn change_password(
        &self,
        user: &AuthUser,
        request: &ChangePasswordDto,
    ) -> Result<(), Error> {
        let employee_repo = EmployeeRepository::new(self.db);

        let employee = employee_repo
            .get(user.id)
            .await?
            .ok_or(AuthError::AccountInactive)?;

        if !verify_password(&request.current_password, &employee.password_hash)? {
            return Err(AuthError::IncorrectPassword.into());
        }

        let password_hash = hash_password(&request.new_password)?;
        employee_repo.set_password_hash(user.id, password_hash).await?;

        tracing::info!(employee_id = user.id, "password changed");

        Ok(())
    }

    /// Issues a fresh token for an already authenticated caller.
    pub fn refresh(&self, user: &AuthUser) -> Result<TokenDto, Error> {
        Ok(TokenDto {
            token: self.issue_token(user)?,
        })
    }

    async fn load_user(&self, employee: entity::employee::Model) -> Result<AuthUser, Error> {
        let role_repo = RoleRepository::new(self.db);

        let role_name = role_repo
            .get(employee.role_id)
            .await?
            .map(|r| r.name)
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Role ID {} of employee ID {} does not exist",
                    employee.role_id, employee.id
                ))
            })?;
        let permissions = role_repo.permissions(employee.role_id).await?;
        let department_name = DepartmentRepository::new(self.db)
            .get(employee.department_id)
            .await?
            .map(|d| d.name);

        Ok(AuthUser {
            id: employee.id,
            employee_code: employee.employee_code,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            department_id: employee.department_id,
            department_name,
            manager_id: employee.manager_id,
            role_name,
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    mod login {
        use entity::sea_orm_active_enums::EmployeeStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::auth::LoginDto,
            server::{
                error::{auth::AuthError, Error},
                model::auth::TokenSettings,
                service::auth::AuthService,
            },
        };

        fn settings() -> TokenSettings {
            TokenSettings {
                secret: TEST_JWT_SECRET.to_string(),
                expires_in_hours: 24,
            }
        }

        /// Expect a valid login to return a token that resolves back to the employee
        #[tokio::test]
        async fn issues_token_for_active_employee() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test
                .employee()
                .insert_with_role("EMP001", "Employee", &["request_leave"])
                .await?;
            let tokens = settings();
            let service = AuthService::new(&test.db, &tokens);

            let response = service
                .login(&LoginDto {
                    email: employee.email.clone(),
                    password: TEST_PASSWORD.to_string(),
                })
                .await
                .expect("login should succeed");
            let user = service
                .authenticate(&response.token)
                .await
                .expect("token should resolve");

            assert_eq!(user.id, employee.id);
            assert_eq!(response.user.role, "Employee");
            assert_eq!(response.user.permissions, vec!["request_leave".to_string()]);

            Ok(())
        }

        /// Expect a wrong password to be reported as invalid credentials
        #[tokio::test]
        async fn rejects_wrong_password() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let tokens = settings();

            let result = AuthService::new(&test.db, &tokens)
                .login(&LoginDto {
                    email: employee.email,
                    password: "not-the-password".to_string(),
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));

            Ok(())
        }

        /// Expect a terminated employee to be refused even with the right password
        #[tokio::test]
        async fn rejects_inactive_employee() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let employee = test
                .employee()
                .set_status(employee, EmployeeStatus::Terminated)
                .await?;
            let tokens = settings();

            let result = AuthService::new(&test.db, &tokens)
                .login(&LoginDto {
                    email: employee.email,
                    password: TEST_PASSWORD.to_string(),
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::AccountNotActive))
            ));

            Ok(())
        }
    }

    mod verify_token {
        use crate::server::{
            error::auth::AuthError, model::auth::TokenSettings, service::auth::AuthService,
        };
        use hrdesk_test_utils::prelude::*;

        /// Expect a token signed with another secret to be rejected as invalid
        #[tokio::test]
        async fn rejects_foreign_signature() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let ours = TokenSettings {
                secret: TEST_JWT_SECRET.to_string(),
                expires_in_hours: 24,
            };
            let theirs = TokenSettings {
                secret: "some-other-secret".to_string(),
                expires_in_hours: 24,
            };
            let user = AuthService::new(&test.db, &ours)
                .load_user(employee)
                .await
                .expect("employee should load");
            let token = AuthService::new(&test.db, &theirs)
                .issue_token(&user)
                .expect("token should encode");

            let result = AuthService::new(&test.db, &ours).verify_token(&token);

            assert!(matches!(result, Err(AuthError::InvalidToken)));

            Ok(())
        }

        /// Expect a token past its expiry to be reported as expired
        #[tokio::test]
        async fn rejects_expired_token() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let expired = TokenSettings {
                secret: TEST_JWT_SECRET.to_string(),
                expires_in_hours: -2,
            };
            let service = AuthService::new(&test.db, &expired);
            let user = service.load_user(employee).await.expect("employee should load");
            let token = service.issue_token(&user).expect("token should encode");

            let result = service.verify_token(&token);

            assert!(matches!(result, Err(AuthError::TokenExpired)));

            Ok(())
        }
    }
}
