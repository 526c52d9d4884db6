//! Task data model consumed and produced by the engine.

mod completion;
mod exception;
mod instance;
mod rule;
mod task;
pub mod time;

pub use completion::TaskCompletion;
pub use exception::{ExceptionKind, OccurrenceOverride, TaskException};
pub use instance::{DaySummary, TaskInstance};
pub use rule::{Frequency, RecurrenceRule, WeekdaySet};
pub use task::{Reminder, Task};
