use entity::sea_orm_active_enums::EmployeeStatus;

use super::*;

/// Expect protected endpoints to require a bearer token
#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let app = app(&test);

    let (status, body) = send(&app, request(Method::GET, "/api/auth/profile", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");

    Ok(())
}

/// Expect a garbage token to be rejected as invalid
#[tokio::test]
async fn invalid_token_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let app = app(&test);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/auth/profile", Some("not-a-jwt"), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    Ok(())
}

/// Expect a token and the caller's permissions on login, then a profile without the hash
#[tokio::test]
async fn login_then_profile() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test
        .employee()
        .insert_with_role("EMP001", "Employee", &["request_leave", "log_hours"])
        .await?;
    let app = app(&test);

    let token = login(&app, &employee).await;
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/auth/profile", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeeCode"], "EMP001");
    assert_eq!(body["permissions"], json!(["log_hours", "request_leave"]));
    assert!(body.get("passwordHash").is_none());

    Ok(())
}

/// Expect a wrong password to be reported as invalid credentials
#[tokio::test]
async fn wrong_password_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": employee.email, "password": "wrong-password" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    Ok(())
}

/// Expect a terminated employee to be refused at login
#[tokio::test]
async fn inactive_account_cannot_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let employee = test
        .employee()
        .set_status(employee, EmployeeStatus::Terminated)
        .await?;
    let app = app(&test);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": employee.email, "password": TEST_PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Account is not active");

    Ok(())
}

/// Expect mismatched confirmation to fail validation with field details
#[tokio::test]
async fn change_password_requires_matching_confirmation() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/change-password",
            Some(&token),
            Some(json!({
                "currentPassword": TEST_PASSWORD,
                "newPassword": "new-password-1",
                "confirmPassword": "new-password-2"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));

    Ok(())
}
