//! Task service for get-it-done.
//!
//! Fetches task, exception and completion rows from a repository, hands them
//! to the recurrence engine, and performs the per-occurrence write
//! operations (completion toggles, skips, modifications, deletes).

pub mod error;
pub mod store;
pub mod task;
