//! HTML bodies for the emails HRDesk sends.

use chrono::NaiveDate;

use crate::server::mail::Email;

/// Details of a leave request shared by the leave templates.
#[derive(Clone, Debug)]
pub struct LeaveSummary<'a> {
    pub leave_type: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
}

/// Notifies a manager that one of their reports requested leave.
pub fn leave_request(
    manager_email: &str,
    employee_name: &str,
    employee_code: &str,
    leave: &LeaveSummary<'_>,
    reason: Option<&str>,
) -> Email {
    let html = format!(
        "<h2>New Leave Request</h2>\
         <p><strong>Employee:</strong> {}</p>\
         <p><strong>Employee ID:</strong> {}</p>\
         {}\
         <p><strong>Reason:</strong> {}</p>\
         <p>Please review and approve or reject this leave request in HRDesk.</p>",
        escape(employee_name),
        escape(employee_code),
        leave_details(leave),
        escape(reason.unwrap_or("N/A")),
    );

    Email {
        to: manager_email.to_string(),
        subject: format!("Leave Request - {}", employee_name),
        html,
    }
}

/// Tells an employee whether their leave request was approved or rejected.
pub fn leave_decision(
    employee_email: &str,
    leave: &LeaveSummary<'_>,
    approved: bool,
    rejection_reason: Option<&str>,
) -> Email {
    let status = if approved { "Approved" } else { "Rejected" };

    let mut html = format!(
        "<h2>Leave Request {}</h2>{}<p><strong>Status:</strong> {}</p>",
        status,
        leave_details(leave),
        status
    );
    if let (false, Some(reason)) = (approved, rejection_reason) {
        html.push_str(&format!(
            "<p><strong>Reason for Rejection:</strong> {}</p>",
            escape(reason)
        ));
    }

    Email {
        to: employee_email.to_string(),
        subject: format!("Leave Request {}", status),
        html,
    }
}

/// Reminds an employee that approved leave starts soon.
pub fn leave_reminder(employee_email: &str, leave: &LeaveSummary<'_>) -> Email {
    let html = format!(
        "<h2>Leave Reminder</h2>\
         <p>This is a reminder that your approved leave is starting soon:</p>\
         {}\
         <p>Please ensure all your work is properly handed over before your leave begins.</p>",
        leave_details(leave)
    );

    Email {
        to: employee_email.to_string(),
        subject: "Upcoming Leave Reminder".to_string(),
        html,
    }
}

/// Tells an employee that a performance review was recorded for them.
pub fn performance_review(
    employee_email: &str,
    review_period: &str,
    overall_rating: Option<f64>,
    review_date: NaiveDate,
) -> Email {
    let rating = overall_rating
        .map(|r| format!("{}/5", r))
        .unwrap_or_else(|| "Not rated".to_string());

    let html = format!(
        "<h2>Performance Review</h2>\
         <p>Your performance review for {} is now available.</p>\
         <p><strong>Overall Rating:</strong> {}</p>\
         <p><strong>Review Date:</strong> {}</p>\
         <p>Please log into HRDesk to view your complete review.</p>",
        escape(review_period),
        rating,
        review_date
    );

    Email {
        to: employee_email.to_string(),
        subject: "Performance Review Available".to_string(),
        html,
    }
}

fn leave_details(leave: &LeaveSummary<'_>) -> String {
    format!(
        "<p><strong>Leave Type:</strong> {}</p>\
         <p><strong>Dates:</strong> {} to {}</p>\
         <p><strong>Total Days:</strong> {}</p>",
        escape(leave.leave_type),
        leave.start_date,
        leave.end_date,
        leave.total_days
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
