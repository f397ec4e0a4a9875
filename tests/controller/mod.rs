//! Tests for HTTP controller endpoints.
//!
//! Requests go through the full router so that extractors, permission checks and error
//! mapping are exercised together with the services.

mod auth;
mod employee;
mod health;
mod leave;
mod notification;
mod report;
mod work_log;

use axum::http::{Method, StatusCode};
use hrdesk_test_utils::prelude::*;
use serde_json::json;

use crate::util::{app, login, request, send, send_raw};
