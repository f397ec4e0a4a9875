//! Repositories for performance reviews and their metric ratings.

pub mod metric;
pub mod review;
