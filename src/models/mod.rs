//! Real-time scheduling domain models.
//!
//! Provides the data types shared by the analyzer, the dispatch engine and
//! the trace compiler.
//!
//! # Model Overview
//!
//! | Type | Role |
//! |------|------|
//! | `Task` | Periodic task descriptor (input) |
//! | `Job` | One activation of a task, live in the ready queue |
//! | `Trace` | One `TickAssignment` per simulated tick |
//! | `Schedule` | Per-task `[start, end)` intervals (output) |
//!
//! All times are integer ticks counted from the start of the simulation.

mod job;
mod policy;
mod schedule;
mod task;
mod trace;

pub use job::{Job, JobRecord};
pub use policy::Policy;
pub use schedule::{DeadlineMiss, Interval, Schedule, ScheduleEntry};
pub use task::Task;
pub use trace::{TickAssignment, Trace, IDLE};

/// Discrete simulated time unit.
pub type Tick = u64;
