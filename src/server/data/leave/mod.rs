//! Repositories for leave types, per-year balances and leave applications.

pub mod application;
pub mod balance;
pub mod leave_type;
