//! Simulation quality metrics (KPIs).
//!
//! Computes standard real-time indicators from a compiled schedule and its
//! input tasks.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | CPU Utilization | Busy ticks / horizon |
//! | Context Switches | Boundaries between consecutive runs |
//! | Preemptions | Runs that ended with a started job unfinished |
//! | Worst Response Time | Max(completion - release) per task |
//! | Deadline Misses | Jobs late or unfinished at a deadline ≤ horizon |
//! | On-Time Rate | Fraction of judged jobs meeting their deadline |
//!
//! # Reference
//! Buttazzo (2011), "Hard Real-Time Computing Systems", Ch. 1.2

use std::collections::HashMap;

use crate::compiler::replay_jobs;
use crate::models::{Schedule, Task, Tick, IDLE};

/// Simulation performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone)]
pub struct SimulationKpi {
    /// Simulated ticks.
    pub horizon: Tick,
    /// Ticks spent running jobs.
    pub busy_ticks: Tick,
    /// Ticks spent idle.
    pub idle_ticks: Tick,
    /// Busy share of the horizon (0.0..1.0).
    pub cpu_utilization: f64,
    /// Changes of the running entry (idle included) between adjacent ticks.
    pub context_switches: usize,
    /// Jobs that lost the CPU before finishing.
    pub preemptions: usize,
    /// Worst observed response time per task (completed jobs only).
    pub worst_response_by_task: HashMap<String, Tick>,
    /// Jobs that missed their deadline.
    pub deadline_misses: usize,
    /// Fraction of judged jobs meeting their deadline (0.0..1.0).
    pub on_time_rate: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a schedule and its input tasks.
    ///
    /// # Arguments
    /// * `schedule` - The compiled schedule.
    /// * `tasks` - The simulated tasks (for periods and deadlines).
    /// * `horizon` - The simulated window.
    pub fn calculate(schedule: &Schedule, tasks: &[Task], horizon: Tick) -> Self {
        let idle_ticks = schedule.busy_ticks(IDLE);
        let busy_ticks = schedule.total_ticks().saturating_sub(idle_ticks);

        let runs: usize = schedule.sched.iter().map(|e| e.jobs.len()).sum();
        let context_switches = runs.saturating_sub(1);

        let mut preemptions = 0usize;
        let mut deadline_misses = 0usize;
        let mut judged = 0usize;
        let mut worst_response_by_task = HashMap::new();

        for task in tasks {
            let replay = replay_jobs(task, schedule, horizon);
            preemptions += replay.preemptions;

            for job in &replay.jobs {
                if let Some(response) = job.response_time() {
                    let worst = worst_response_by_task
                        .entry(task.name.clone())
                        .or_insert(0);
                    *worst = (*worst).max(response);
                }

                let missed = match job.completion {
                    Some(done) => done > job.deadline,
                    None => job.deadline <= horizon,
                };
                let decided = job.completion.is_some() || job.deadline <= horizon;
                if decided {
                    judged += 1;
                    if missed {
                        deadline_misses += 1;
                    }
                }
            }
        }

        let cpu_utilization = if horizon == 0 {
            0.0
        } else {
            busy_ticks as f64 / horizon as f64
        };

        let on_time_rate = if judged == 0 {
            1.0
        } else {
            (judged - deadline_misses) as f64 / judged as f64
        };

        Self {
            horizon,
            busy_ticks,
            idle_ticks,
            cpu_utilization,
            context_switches,
            preemptions,
            worst_response_by_task,
            deadline_misses,
            on_time_rate,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_misses: usize, min_utilization: f64) -> bool {
        self.deadline_misses <= max_misses && self.cpu_utilization >= min_utilization
    }
}
