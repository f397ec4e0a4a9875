//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers for exact hour and money amounts, date arithmetic (leave day counts, reporting
//! windows, service anniversaries), password hashing and pagination. These utilities are used
//! across services, controllers and scheduled jobs.

pub mod decimal;
pub mod pagination;
pub mod password;
pub mod time;
