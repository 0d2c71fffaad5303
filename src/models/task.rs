//! Periodic task model.
//!
//! A task releases one job every `period` ticks, starting at tick 0. Each
//! job needs `exec_time` ticks of CPU and must finish within `deadline`
//! ticks of its release.
//!
//! # Reference
//! Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//! Hard-Real-Time Environment"

use serde::{Deserialize, Serialize};

use super::Tick;

/// A periodic task.
///
/// Tasks are immutable input: the simulator only ever reads them and keeps
/// its own copies of whatever it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Worst-case execution time per job (ticks).
    pub exec_time: Tick,
    /// Release period (ticks).
    pub period: Tick,
    /// Relative deadline (ticks after release).
    pub deadline: Tick,
}

impl Task {
    /// Creates an implicit-deadline task (deadline = period).
    pub fn new(name: impl Into<String>, exec_time: Tick, period: Tick) -> Self {
        Self {
            name: name.into(),
            exec_time,
            period,
            deadline: period,
        }
    }

    /// Sets the relative deadline.
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = deadline;
        self
    }

    /// Fraction of the CPU this task demands: `exec_time / period`.
    ///
    /// Returns `0.0` for a zero period so unvalidated input cannot produce NaN.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            return 0.0;
        }
        self.exec_time as f64 / self.period as f64
    }

    /// Whether a job of this task is released at `tick`.
    #[inline]
    pub fn releases_at(&self, tick: Tick) -> bool {
        self.period > 0 && tick % self.period == 0
    }

    /// Whether the relative deadline is shorter than the period.
    ///
    /// Utilization bounds only hold when no task is constrained this way.
    pub fn has_constrained_deadline(&self) -> bool {
        self.deadline < self.period
    }
}
