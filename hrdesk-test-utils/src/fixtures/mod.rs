//! Test fixture modules for database row creation.
//!
//! Each submodule adds a fixture accessor to [`TestContext`](crate::TestContext):
//!
//! - `org` - departments, roles, and role permissions
//! - `employee` - employee accounts with a known password
//! - `leave` - leave types, balances, and applications
//! - `work` - projects and work logs
//! - `performance` - performance reviews
//! - `notification` - in-app notifications
//! - `factory` - in-memory models that never touch the database

pub mod employee;
pub mod factory;
pub mod leave;
pub mod notification;
pub mod org;
pub mod performance;
pub mod work;
