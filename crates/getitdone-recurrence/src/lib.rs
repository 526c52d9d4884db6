//! Recurrence engine for get-it-done tasks.
//!
//! ## Summary
//! Decides which task occurrences fall on a calendar date, overlays
//! per-occurrence exceptions and completions, and summarizes date ranges for
//! calendar views. Every function here is pure: inputs are borrowed, results
//! are freshly allocated, nothing is persisted.

pub mod calendar;
pub mod describe;
pub mod matcher;
pub mod materialize;
pub mod merge;
pub mod model;
pub mod slot;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use matcher::matches;
pub use materialize::instances_for_date;
pub use summary::summarize;
