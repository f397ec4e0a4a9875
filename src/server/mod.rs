//! Server application core modules.
//!
//! This module contains all server-side functionality for HRDesk, including HTTP routing,
//! token authentication, database access, report rendering, outbound email and scheduled
//! reminder jobs. It provides the complete backend for managing employees, leave, performance
//! reviews, work logs and notifications.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod mail;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
