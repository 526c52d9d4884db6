/// Longest task title accepted, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest task notes accepted, in characters.
pub const MAX_NOTES_LEN: usize = 1000;

/// Reminder lead time used when a reminder carries no explicit offset.
pub const DEFAULT_REMINDER_OFFSET_MINUTES: u32 = 15;
