use super::*;

/// Expect five more hours on a day with twenty logged to be refused
#[tokio::test]
async fn rejects_more_than_24_hours_a_day() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test
        .employee()
        .insert_with_role("EMP001", "Employee", &["log_hours"])
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;
    let entry = |hours: f64| {
        json!({
            "logDate": "2025-03-03",
            "hoursWorked": hours,
            "taskDescription": "Support rotation"
        })
    };

    let (first, body) = send(
        &app,
        request(Method::POST, "/api/performance/work-logs", Some(&token), Some(entry(20.0))),
    )
    .await;
    let (second, second_body) = send(
        &app,
        request(Method::POST, "/api/performance/work-logs", Some(&token), Some(entry(5.0))),
    )
    .await;

    assert_eq!(first, StatusCode::CREATED, "{}", body);
    assert_eq!(body["workLog"]["status"], "Completed");
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(
        second_body["error"],
        "Total hours for the day cannot exceed 24. Current: 20, Adding: 5"
    );

    Ok(())
}

/// Expect employees to see only their own entries
#[tokio::test]
async fn list_is_scoped_to_caller() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
    let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
    let day = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    test.work().insert_work_log(alice.id, day, 8.0).await?;
    test.work().insert_work_log(bob.id, day, 6.0).await?;
    let app = app(&test);
    let token = login(&app, &alice).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/performance/work-logs?employeeId={}", bob.id),
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let logs = body["workLogs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["employeeId"], alice.id);

    Ok(())
}
