use entity::sea_orm_active_enums::NotificationPriority;

use super::*;

/// Expect an empty id list to fail validation
#[tokio::test]
async fn bulk_action_rejects_empty_ids() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/notifications/bulk-action",
            Some(&token),
            Some(json!({ "notificationIds": [], "action": "mark_read" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    Ok(())
}

/// Expect an action outside mark_read, mark_unread and delete to be refused
#[tokio::test]
async fn bulk_action_rejects_unknown_action() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let notification = test
        .notification()
        .insert_notification(employee.id, NotificationPriority::Low, false)
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/notifications/bulk-action",
            Some(&token),
            Some(json!({ "notificationIds": [notification.id], "action": "archive" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    Ok(())
}

/// Expect a bulk action on someone else's notification to be forbidden
#[tokio::test]
async fn bulk_action_refuses_foreign_notifications() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
    let own = test
        .notification()
        .insert_notification(alice.id, NotificationPriority::Low, false)
        .await?;
    let foreign = test
        .notification()
        .insert_notification(bob.id, NotificationPriority::Low, false)
        .await?;
    let app = app(&test);
    let token = login(&app, &alice).await;

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/notifications/bulk-action",
            Some(&token),
            Some(json!({ "notificationIds": [own.id, foreign.id], "action": "delete" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect mark_read to update the caller's notifications and the unread count to follow
#[tokio::test]
async fn bulk_mark_read_updates_unread_count() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let first = test
        .notification()
        .insert_notification(employee.id, NotificationPriority::High, false)
        .await?;
    let second = test
        .notification()
        .insert_notification(employee.id, NotificationPriority::Low, false)
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/notifications/bulk-action",
            Some(&token),
            Some(json!({ "notificationIds": [first.id, second.id], "action": "mark_read" })),
        ),
    )
    .await;
    let (_, unread) = send(
        &app,
        request(Method::GET, "/api/notifications/unread-count", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["affectedCount"], 2);
    assert_eq!(unread["unreadCount"], 0);

    Ok(())
}
