//! Request and response bodies exchanged over the HTTP API.
//!
//! Every type here is serialized as camelCase JSON and documented in the OpenAPI schema.

pub mod api;
pub mod auth;
pub mod employee;
pub mod health;
pub mod leave;
pub mod notification;
pub mod performance;
pub mod report;
pub mod work_log;
