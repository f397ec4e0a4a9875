//! Server application models and type definitions.
//!
//! This module contains the shared application state, the authenticated caller extracted
//! from access tokens, and the permission strings checked by handlers.

pub mod app;
pub mod auth;
pub mod permission;
