//! Built-in priority policies.
//!
//! - **Fixed priority**: RMS
//! - **Dynamic priority**: EDF
//!
//! # Key Convention
//! All rules return lower keys for higher priority jobs.
//!
//! # References
//! - Liu & Layland (1973): RMS is optimal among fixed-priority assignments
//!   for implicit-deadline periodic tasks; EDF is optimal among all.

use super::{PriorityKey, PriorityPolicy};
use crate::models::{Job, Task};

// ======================== Fixed-priority rules ========================

/// Rate-Monotonic.
///
/// Shorter period = higher priority. The key depends only on the task, so
/// every job of a task has the same priority.
#[derive(Debug, Clone, Copy)]
pub struct RateMonotonic;

impl PriorityPolicy for RateMonotonic {
    fn name(&self) -> &'static str {
        "RMS"
    }

    fn priority_key(&self, _job: &Job, task: &Task) -> PriorityKey {
        task.period
    }

    fn description(&self) -> &'static str {
        "Rate-Monotonic Scheduling"
    }
}

// ======================== Dynamic-priority rules ========================

/// Earliest Deadline First.
///
/// Earlier absolute deadline = higher priority. The key is fixed when the
/// job is released; ordering between tasks changes from job to job.
///
/// # Reference
/// Liu & Layland (1973), Theorem 7.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDeadlineFirst;

impl PriorityPolicy for EarliestDeadlineFirst {
    fn name(&self) -> &'static str {
        "EDF"
    }

    fn priority_key(&self, job: &Job, _task: &Task) -> PriorityKey {
        job.absolute_deadline
    }

    fn description(&self) -> &'static str {
        "Earliest Deadline First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_prefers_shorter_period() {
        let fast = Task::new("fast", 1, 4);
        let slow = Task::new("slow", 1, 10);
        let fast_job = Job::new(0, 0, 1, fast.deadline);
        let slow_job = Job::new(1, 0, 1, slow.deadline);
        assert!(
            RateMonotonic.priority_key(&fast_job, &fast)
                < RateMonotonic.priority_key(&slow_job, &slow)
        );
    }

    #[test]
    fn test_rms_ignores_release_time() {
        let task = Task::new("A", 1, 4);
        let early = Job::new(0, 0, 1, task.deadline);
        let late = Job::new(0, 8, 1, task.deadline);
        assert_eq!(
            RateMonotonic.priority_key(&early, &task),
            RateMonotonic.priority_key(&late, &task)
        );
    }

    #[test]
    fn test_edf_uses_absolute_deadline() {
        // Long period but released late with a short deadline.
        let a = Task::new("A", 1, 10).with_deadline(3);
        let b = Task::new("B", 1, 5);
        let a_job = Job::new(0, 10, 1, a.deadline); // deadline 13
        let b_job = Job::new(1, 10, 1, b.deadline); // deadline 15
        assert_eq!(EarliestDeadlineFirst.priority_key(&a_job, &a), 13);
        assert!(
            EarliestDeadlineFirst.priority_key(&a_job, &a)
                < EarliestDeadlineFirst.priority_key(&b_job, &b)
        );
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(RateMonotonic.name(), "RMS");
        assert_eq!(EarliestDeadlineFirst.name(), "EDF");
        assert_eq!(
            EarliestDeadlineFirst.description(),
            "Earliest Deadline First"
        );
    }
}
