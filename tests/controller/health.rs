use super::*;

/// Expect the liveness check to answer without a token
#[tokio::test]
async fn reports_ok() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let app = app(&test);

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["uptime"].as_f64().is_some());

    Ok(())
}

/// Expect unknown paths to answer 404 with the JSON error body
#[tokio::test]
async fn unknown_route_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let app = app(&test);

    let (status, body) = send(&app, request(Method::GET, "/api/nowhere", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    Ok(())
}
