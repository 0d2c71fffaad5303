//! Priority policies and the tick-driven dispatch engine.
//!
//! Every tick the engine releases new jobs, orders the ready queue by the
//! active policy and runs the head job for one tick. Preemption falls out of
//! the per-tick ordering: a newly released job with a smaller key simply
//! becomes the head.
//!
//! # Usage
//!
//! ```
//! use u_rtsched::dispatching::DispatchEngine;
//! use u_rtsched::models::{Policy, Task};
//!
//! let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 4)];
//! let trace = DispatchEngine::new(Policy::Rms).simulate(&tasks, 4).unwrap();
//! assert_eq!(trace.names(), vec!["A", "B", "A", "idle"]);
//! ```
//!
//! # References
//!
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"
//! - Buttazzo (2011), "Hard Real-Time Computing Systems", Ch. 4

mod engine;
mod ready;
pub mod rules;

pub use engine::{simulate, DispatchEngine, EngineRun};
pub use ready::{QueuedJob, ReadyQueue};

use crate::models::{Job, Policy, Task, Tick};
use std::fmt::Debug;

/// Priority key of a job. **Lower key = higher priority.**
pub type PriorityKey = Tick;

/// A priority-assignment rule.
///
/// # Key Convention
/// Rules return smaller keys for jobs that should run first. Ties are broken
/// by the ready queue: declaration order of the task, then release time.
pub trait PriorityPolicy: Send + Sync + Debug {
    /// Rule name (e.g., "RMS", "EDF").
    fn name(&self) -> &'static str;

    /// Priority key of `job`, a job of `task`.
    fn priority_key(&self, job: &Job, task: &Task) -> PriorityKey;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the built-in rule for `policy`.
pub fn rule_for(policy: Policy) -> Box<dyn PriorityPolicy> {
    match policy {
        Policy::Rms => Box::new(rules::RateMonotonic),
        Policy::Edf => Box::new(rules::EarliestDeadlineFirst),
    }
}
