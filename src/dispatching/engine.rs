//! Tick-driven dispatch engine.
//!
//! # Algorithm
//! For every tick `t` in `0..horizon`:
//! 1. Release a job of every task with `t % period == 0`.
//! 2. Pick the head of the ready queue (lowest priority key; ties by
//!    declaration order, then release time).
//! 3. Run it for one tick, or record `idle` if nothing is ready.
//! 4. Drop it from the queue once its remaining time reaches zero.
//!
//! Deadline misses do not stop the loop. They are visible afterwards in
//! the job log and in the compiled schedule.
//!
//! # Complexity
//! O(horizon × (n + log m)) for n tasks and m ready jobs.

use std::collections::binary_heap::PeekMut;
use std::sync::Arc;

use tracing::debug;

use super::{rule_for, PriorityPolicy, ReadyQueue};
use crate::error::{Result, SchedError};
use crate::models::{Job, JobRecord, Policy, Task, Tick, TickAssignment, Trace};

/// Upper bound on trace capacity reserved up front.
const MAX_PREALLOCATED_TICKS: usize = 1 << 20;

/// Everything one engine run produces.
#[derive(Debug, Clone, Default)]
pub struct EngineRun {
    /// One assignment per simulated tick.
    pub trace: Trace,
    /// Every released job, in release order.
    pub jobs: Vec<JobRecord>,
    /// Times a running, unfinished job lost the CPU to another job.
    pub preemptions: usize,
}

/// Uniprocessor dispatch engine for one priority policy.
///
/// The engine never mutates the caller's task list: it works on its own copy
/// and can be shared across threads to simulate independent task sets.
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    rule: Arc<dyn PriorityPolicy>,
}

impl DispatchEngine {
    /// Creates an engine for a built-in policy.
    pub fn new(policy: Policy) -> Self {
        Self {
            rule: Arc::from(rule_for(policy)),
        }
    }

    /// Creates an engine driven by a custom rule.
    pub fn with_rule<R: PriorityPolicy + 'static>(rule: R) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Name of the active rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Simulates `horizon` ticks and returns the trace.
    ///
    /// # Errors
    /// [`SchedError::EmptyTaskSet`] if `tasks` is empty.
    pub fn simulate(&self, tasks: &[Task], horizon: Tick) -> Result<Trace> {
        self.run(tasks, horizon).map(|run| run.trace)
    }

    /// Simulates `horizon` ticks and returns the trace plus the job log.
    ///
    /// Input is assumed validated; only the empty set is rejected.
    pub fn run(&self, tasks: &[Task], horizon: Tick) -> Result<EngineRun> {
        if tasks.is_empty() {
            return Err(SchedError::EmptyTaskSet);
        }
        let tasks = tasks.to_vec();

        let mut queue = ReadyQueue::with_capacity(tasks.len());
        let mut trace = Trace::with_capacity(
            usize::try_from(horizon)
                .unwrap_or(usize::MAX)
                .min(MAX_PREALLOCATED_TICKS),
        );
        let mut jobs: Vec<JobRecord> = Vec::new();
        let mut preemptions = 0usize;
        // Job log index of the job that ran on the previous tick, if unfinished.
        let mut running: Option<usize> = None;

        for tick in 0..horizon {
            // Release
            for (index, task) in tasks.iter().enumerate() {
                if !task.releases_at(tick) {
                    continue;
                }
                let job = Job::new(index, tick, task.exec_time, task.deadline);
                let key = self.rule.priority_key(&job, task);
                tracing::trace!(tick, task = %task.name, deadline = job.absolute_deadline, "release");
                jobs.push(JobRecord {
                    task: task.name.clone(),
                    release: tick,
                    deadline: job.absolute_deadline,
                    completion: None,
                });
                queue.push(key, job, jobs.len() - 1);
            }

            // Dispatch
            let Some(mut head) = queue.head_mut() else {
                trace.push(TickAssignment::Idle);
                running = None;
                continue;
            };

            let record = head.record;
            if let Some(prev) = running.filter(|&prev| prev != record) {
                preemptions += 1;
                debug!(
                    tick,
                    preempted = %jobs[prev].task,
                    by = %jobs[record].task,
                    "preemption"
                );
            }

            head.job.execute_tick();
            let name = &tasks[head.job.task_index].name;
            trace.push(TickAssignment::Task(name.clone()));

            // Completion
            if head.job.is_complete() {
                let done = PeekMut::pop(head);
                let finished = tick + 1;
                jobs[record].completion = Some(finished);
                if finished > done.job.absolute_deadline {
                    debug!(
                        tick,
                        task = %jobs[record].task,
                        deadline = done.job.absolute_deadline,
                        "job completed after its deadline"
                    );
                }
                running = None;
            } else {
                running = Some(record);
            }
        }

        debug!(
            rule = self.rule.name(),
            horizon,
            jobs = jobs.len(),
            preemptions,
            "simulation finished"
        );

        Ok(EngineRun {
            trace,
            jobs,
            preemptions,
        })
    }
}

/// Simulates `tasks` under `policy` for `horizon` ticks.
pub fn simulate(tasks: &[Task], policy: Policy, horizon: Tick) -> Result<Trace> {
    DispatchEngine::new(policy).simulate(tasks, horizon)
}
