//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered here together with its utoipa path definition. The collected
//! OpenAPI document is served by Swagger UI at `/api/docs`.

use axum::{http::StatusCode, response::IntoResponse, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, error::error_response, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /health` - Liveness check
/// - `/api/auth/*` - Login, profile, password change, logout and token refresh
/// - `/api/employees/*` - Employee records and the department and role catalogs
/// - `/api/leave/*` - Leave applications, approvals, balances and leave types
/// - `/api/performance/*` - Reviews, analytics, work logs and projects
/// - `/api/reports/*` - Report catalog, generation and dashboard analytics
/// - `/api/notifications/*` - In-app notifications
///
/// Unknown paths answer 404 with `{"error": "Route not found"}`.
///
/// # Returns
/// An Axum `Router<AppState>` ready to receive its state and middleware layers.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "HRDesk", description = "HRDesk employee management API"), tags(
        (name = controller::health::HEALTH_TAG, description = "Service health"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::employee::EMPLOYEE_TAG, description = "Employee management API routes"),
        (name = controller::leave::LEAVE_TAG, description = "Leave management API routes"),
        (name = controller::performance::PERFORMANCE_TAG, description = "Performance review API routes"),
        (name = controller::work_log::WORK_LOG_TAG, description = "Work hour tracking API routes"),
        (name = controller::report::REPORT_TAG, description = "Reporting API routes"),
        (name = controller::notification::NOTIFICATION_TAG, description = "Notification API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        // Auth
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::profile))
        .routes(routes!(controller::auth::change_password))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::refresh))
        // Employees
        .routes(routes!(
            controller::employee::list_employees,
            controller::employee::create_employee
        ))
        .routes(routes!(
            controller::employee::get_employee,
            controller::employee::update_employee,
            controller::employee::delete_employee
        ))
        .routes(routes!(controller::employee::list_departments))
        .routes(routes!(controller::employee::list_roles))
        // Leave
        .routes(routes!(
            controller::leave::list_applications,
            controller::leave::submit_application
        ))
        .routes(routes!(controller::leave::update_application_status))
        .routes(routes!(controller::leave::get_balances))
        .routes(routes!(controller::leave::get_all_balances))
        .routes(routes!(controller::leave::list_leave_types))
        // Performance
        .routes(routes!(
            controller::performance::list_reviews,
            controller::performance::create_review
        ))
        .routes(routes!(
            controller::performance::get_review,
            controller::performance::update_review
        ))
        .routes(routes!(controller::performance::get_analytics))
        .routes(routes!(
            controller::work_log::list_work_logs,
            controller::work_log::create_work_log
        ))
        .routes(routes!(
            controller::work_log::update_work_log,
            controller::work_log::delete_work_log
        ))
        .routes(routes!(controller::work_log::list_projects))
        // Reports
        .routes(routes!(controller::report::list_templates))
        .routes(routes!(controller::report::generate_report))
        .routes(routes!(controller::report::get_analytics))
        // Notifications
        .routes(routes!(
            controller::notification::list_notifications,
            controller::notification::create_notification
        ))
        .routes(routes!(controller::notification::unread_count))
        .routes(routes!(controller::notification::mark_read))
        .routes(routes!(controller::notification::mark_all_read))
        .routes(routes!(controller::notification::delete_notification))
        .routes(routes!(controller::notification::get_stats))
        .routes(routes!(controller::notification::bulk_action))
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .fallback(route_not_found)
}

async fn route_not_found() -> impl IntoResponse {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}
