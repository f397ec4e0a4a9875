//! Service layer.
//!
//! Services hold the business rules of HRDesk. They coordinate repositories, open transactions
//! for multi-step writes, and fan out best-effort side effects such as notifications and email.
//! Controllers call services and never touch repositories for writes directly.

pub mod analytics;
pub mod auth;
pub mod employee;
pub mod leave;
pub mod notification;
pub mod performance;
pub mod report;
pub mod seed;
pub mod work_log;
