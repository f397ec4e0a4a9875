//! Constant values shared across tests.
//!
//! None of these are real credentials. They only need to be stable so that tests can log in
//! fixture employees and mint tokens the application will accept.

/// Secret used to sign and verify bearer tokens in tests.
pub static TEST_JWT_SECRET: &str = "test-jwt-secret-not-for-production";

/// Plain-text password assigned to every fixture employee.
pub static TEST_PASSWORD: &str = "password123";

/// Department that fixture employees are placed in when none is given.
pub static TEST_DEPARTMENT: &str = "Engineering";
