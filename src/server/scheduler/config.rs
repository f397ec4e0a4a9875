//! Cron expressions of the daily jobs.
//!
//! Expressions use the six-field `sec min hour day month weekday` form and are evaluated in UTC.

pub mod reminder {
    /// Birthday reminders at 08:00
    pub const BIRTHDAY_CRON: &str = "0 0 8 * * *";

    /// Work anniversary reminders at 08:05
    pub const ANNIVERSARY_CRON: &str = "0 5 8 * * *";

    /// Reminders for approved leave starting tomorrow, at 09:00
    pub const UPCOMING_LEAVE_CRON: &str = "0 0 9 * * *";
}

pub mod cleanup {
    /// Read notification cleanup at 03:00
    pub const NOTIFICATION_CLEANUP_CRON: &str = "0 0 3 * * *";
}
