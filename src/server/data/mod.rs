//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over SeaORM queries, are generic over
//! `ConnectionTrait` so they run inside or outside a transaction, and are organized by
//! domain (organization, employees, leave, performance, work logs, notifications, audit).

pub mod audit_log;
pub mod department;
pub mod employee;
pub mod leave;
pub mod notification;
pub mod performance;
pub mod project;
pub mod role;
pub mod work_log;
