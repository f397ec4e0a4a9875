//! Request extractors shared by the controllers.
//!
//! [`AuthUser`](crate::server::model::auth::AuthUser) resolves the bearer token of protected
//! endpoints and [`valid_json::ValidJson`] deserializes and validates request bodies.

pub mod auth_user;
pub mod valid_json;
