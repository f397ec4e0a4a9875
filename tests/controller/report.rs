use axum::http::header;

use super::*;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Expect a PDF attachment under the fixed file name by default
#[tokio::test]
async fn generates_pdf_attachment() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["view_all_reports"])
        .await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, headers, bytes) = send_raw(
        &app,
        request(
            Method::POST,
            "/api/reports/generate/employee-directory",
            Some(&token),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"employee-directory-report.pdf\""
    );
    assert!(bytes.starts_with(b"%PDF-1.4"));

    Ok(())
}

/// Expect an Excel request to return a spreadsheet with the report's file name
#[tokio::test]
async fn generates_excel_attachment() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["view_all_reports"])
        .await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, headers, bytes) = send_raw(
        &app,
        request(
            Method::POST,
            "/api/reports/generate/leave-usage",
            Some(&token),
            Some(json!({ "format": "Excel" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"leave-usage-report.xlsx\""
    );
    // XLSX files are zip archives
    assert!(bytes.starts_with(b"PK"));

    Ok(())
}

/// Expect an unknown report slug to answer 404
#[tokio::test]
async fn unknown_report_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (hr, _) = test
        .employee()
        .insert_with_role("HR001", "HR Manager", &["view_all_reports"])
        .await?;
    let app = app(&test);
    let token = login(&app, &hr).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/reports/generate/payroll",
            Some(&token),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Report type not found");

    Ok(())
}

/// Expect callers without report access to be refused
#[tokio::test]
async fn generation_requires_permission() -> Result<(), TestError> {
    let test = TestBuilder::new().with_hr_tables().build().await?;
    let (employee, _) = test
        .employee()
        .insert_with_role("EMP001", "Employee", &["view_profile"])
        .await?;
    let app = app(&test);
    let token = login(&app, &employee).await;

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/reports/generate/work-hours",
            Some(&token),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}
