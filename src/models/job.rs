//! Job model: one periodic activation of a task.

use serde::{Deserialize, Serialize};

use super::Tick;

/// A released, not yet completed activation of a task.
///
/// `task_index` is the task's position in the declared task list; it is the
/// final tie-breaker between jobs of equal priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Index of the owning task in declaration order.
    pub task_index: usize,
    /// Tick at which the job was released.
    pub release_time: Tick,
    /// Ticks of execution still owed.
    pub remaining_time: Tick,
    /// `release_time + deadline` of the owning task, saturating at `Tick::MAX`.
    pub absolute_deadline: Tick,
}

impl Job {
    /// Creates a job released at `release_time`.
    pub fn new(task_index: usize, release_time: Tick, exec_time: Tick, deadline: Tick) -> Self {
        Self {
            task_index,
            release_time,
            remaining_time: exec_time,
            absolute_deadline: release_time.saturating_add(deadline),
        }
    }

    /// Runs the job for one tick.
    #[inline]
    pub fn execute_tick(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Whether the job owes no more execution.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Life-cycle summary of one job, kept by the dispatch engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Owning task name.
    pub task: String,
    /// Release tick.
    pub release: Tick,
    /// Absolute deadline.
    pub deadline: Tick,
    /// Tick at which the last unit of work finished (exclusive end).
    /// `None` if the horizon ended first.
    pub completion: Option<Tick>,
}

impl JobRecord {
    /// Response time (completion - release), if the job completed.
    pub fn response_time(&self) -> Option<Tick> {
        self.completion.map(|c| c - self.release)
    }

    /// Whether the job completed after its deadline.
    pub fn missed_deadline(&self) -> bool {
        matches!(self.completion, Some(c) if c > self.deadline)
    }
}
