use entity::sea_orm_active_enums::EmployeeStatus;
use sea_orm::EntityTrait;

use super::*;

/// Expect a plain employee to be refused the employee list
#[tokio::test]
async fn list_requires_permission() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test
        .employee()
        .insert_with_role("EMP001", "Employee", &["view_profile"])
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(&app, request(Method::GET, "/api/employees", Some(&token), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");

    Ok(())
}

/// Expect HR to page through employees with pagination metadata
#[tokio::test]
async fn lists_with_pagination() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["manage_employees"])
        .await?;
    test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/employees?page=1&limit=2", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["pagination"], json!({ "page": 1, "limit": 2, "total": 3, "pages": 2 }));

    Ok(())
}

/// Expect delete to terminate the employee and keep the row
#[tokio::test]
async fn delete_terminates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["manage_employees"])
        .await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, body) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/employees/{}", employee.id),
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee terminated successfully");

    let stored = entity::prelude::Employee::find_by_id(employee.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.status, EmployeeStatus::Terminated);

    Ok(())
}

/// Expect a missing employee to answer 404 with the message
#[tokio::test]
async fn missing_employee_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["manage_employees"])
        .await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/employees/999", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");

    Ok(())
}

/// Expect an absurd page number to yield an empty page instead of failing the request
#[tokio::test]
async fn huge_page_is_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["manage_employees"])
        .await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/employees?page=18446744073709551615&limit=10",
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["employees"], json!([]));
    assert_eq!(body["pagination"]["total"], 1);

    Ok(())
}
