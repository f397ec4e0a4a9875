use chrono::{Datelike, Utc};
use sea_orm::EntityTrait;

use super::*;

fn current_year() -> i32 {
    Utc::now().year()
}

/// Expect a five day application to be stored as Pending
#[tokio::test]
async fn submit_counts_inclusive_days() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test
        .employee()
        .insert_with_role("EMP001", "Employee", &["request_leave"])
        .await?;
    let annual = test.leave().insert_leave_type("Annual Leave", 25).await?;
    test.leave()
        .insert_balance(employee.id, annual.id, current_year(), 25, 0)
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/leave/applications",
            Some(&token),
            Some(json!({
                "leaveTypeId": annual.id,
                "startDate": format!("{}-06-02", current_year()),
                "endDate": format!("{}-06-06", current_year()),
                "reason": "Holiday"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["application"]["totalDays"], 5);
    assert_eq!(body["application"]["status"], "Pending");

    Ok(())
}

/// Expect an end date before the start date to fail validation
#[tokio::test]
async fn submit_rejects_reversed_dates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/leave/applications",
            Some(&token),
            Some(json!({
                "leaveTypeId": 1,
                "startDate": "2025-06-06",
                "endDate": "2025-06-02"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    Ok(())
}

/// Expect approval to charge the balance once and a repeat approval to be refused
#[tokio::test]
async fn approval_charges_balance_once() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (manager, _) = test
        .employee()
        .insert_with_role("MGR001", "Manager", &["approve_leave"])
        .await?;
    let (employee, _) = test
        .employee()
        .insert_with_role_and_manager("EMP001", "Employee", &[], Some(manager.id))
        .await?;
    let annual = test.leave().insert_leave_type("Annual Leave", 25).await?;
    let balance = test
        .leave()
        .insert_balance(employee.id, annual.id, current_year(), 25, 2)
        .await?;
    let start = chrono::NaiveDate::from_ymd_opt(current_year(), 6, 2).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(current_year(), 6, 6).unwrap();
    let application = test
        .leave()
        .insert_application(
            employee.id,
            annual.id,
            start,
            end,
            entity::sea_orm_active_enums::LeaveStatus::Pending,
        )
        .await?;
    let app = app(&test);
    let token = login(&app, &manager).await;
    let uri = format!("/api/leave/applications/{}/status", application.id);

    let (first, body) = send(
        &app,
        request(Method::PATCH, &uri, Some(&token), Some(json!({ "status": "Approved" }))),
    )
    .await;
    let (second, second_body) = send(
        &app,
        request(Method::PATCH, &uri, Some(&token), Some(json!({ "status": "Approved" }))),
    )
    .await;

    assert_eq!(first, StatusCode::OK, "{}", body);
    assert_eq!(body["application"]["status"], "Approved");
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(
        second_body["error"],
        "Leave application not found or already processed"
    );

    let stored = entity::prelude::LeaveBalance::find_by_id(balance.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.used_days, 7);
    assert_eq!(stored.remaining_days, 18);

    Ok(())
}

/// Expect a non-manager to be refused the decision endpoint
#[tokio::test]
async fn decision_requires_manager() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            "/api/leave/applications/1/status",
            Some(&token),
            Some(json!({ "status": "Approved" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Manager access required");

    Ok(())
}

/// Expect a rejection without a reason to fail validation and leave the application Pending
#[tokio::test]
async fn rejection_requires_reason() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (manager, _) = test
        .employee()
        .insert_with_role("MGR001", "Manager", &["approve_leave"])
        .await?;
    let (employee, _) = test
        .employee()
        .insert_with_role_and_manager("EMP001", "Employee", &[], Some(manager.id))
        .await?;
    let annual = test.leave().insert_leave_type("Annual Leave", 25).await?;
    let start = chrono::NaiveDate::from_ymd_opt(current_year(), 6, 2).unwrap();
    let application = test
        .leave()
        .insert_application(
            employee.id,
            annual.id,
            start,
            start,
            entity::sea_orm_active_enums::LeaveStatus::Pending,
        )
        .await?;
    let app = app(&test);
    let token = login(&app, &manager).await;
    let uri = format!("/api/leave/applications/{}/status", application.id);

    let (missing, missing_body) = send(
        &app,
        request(Method::PATCH, &uri, Some(&token), Some(json!({ "status": "Rejected" }))),
    )
    .await;
    let (blank, _) = send(
        &app,
        request(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "Rejected", "rejectionReason": "   " })),
        ),
    )
    .await;

    assert_eq!(missing, StatusCode::BAD_REQUEST);
    assert_eq!(missing_body["error"], "Validation error");
    assert_eq!(blank, StatusCode::BAD_REQUEST);

    let stored = entity::prelude::LeaveApplication::find_by_id(application.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.status, entity::sea_orm_active_enums::LeaveStatus::Pending);

    let (rejected, rejected_body) = send(
        &app,
        request(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "Rejected", "rejectionReason": "Team is at capacity" })),
        ),
    )
    .await;

    assert_eq!(rejected, StatusCode::OK, "{}", rejected_body);
    assert_eq!(rejected_body["message"], "Leave application rejected successfully");
    assert_eq!(rejected_body["application"]["rejectionReason"], "Team is at capacity");

    Ok(())
}
