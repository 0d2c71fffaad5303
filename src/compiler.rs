//! Trace compilation and post-hoc deadline checking.
//!
//! [`compile`] folds a per-tick trace into per-task `[start, end)` runs.
//! [`detect_deadline_misses`] replays each task's periodic demand against
//! those runs to find jobs that finished late.
//!
//! Both work on the compiled output only, so they apply equally to
//! schedules loaded from disk.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{
    DeadlineMiss, Interval, JobRecord, Schedule, ScheduleEntry, Task, Tick, Trace, IDLE,
};

/// Compiles a trace into a schedule.
///
/// The schedule holds one entry per task in declaration order, then the idle
/// entry. Each maximal run of equal names becomes one interval. Tasks that
/// never ran get an empty list, and the idle entry is always present.
///
/// Compilation is a pure function of its inputs: compiling the same trace
/// twice yields identical schedules.
pub fn compile(tasks: &[Task], trace: &Trace) -> Schedule {
    let mut entries: Vec<ScheduleEntry> = tasks
        .iter()
        .map(|t| ScheduleEntry::new(t.name.as_str()))
        .chain(std::iter::once(ScheduleEntry::new(IDLE)))
        .collect();

    let slot: HashMap<&str, usize> = tasks
        .iter()
        .map(|t| t.name.as_str())
        .chain(std::iter::once(IDLE))
        .enumerate()
        .map(|(i, name)| (name, i))
        .collect();

    let mut run: Option<(&str, Tick)> = None;
    let mut close = |name: &str, start: Tick, end: Tick| match slot.get(name) {
        Some(&i) => entries[i].jobs.push(Interval::new(start, end)),
        None => warn!(
            task = name,
            start,
            end,
            "trace names an unknown task; run dropped"
        ),
    };

    for (tick, assignment) in trace.iter().enumerate() {
        let tick = tick as Tick;
        let name = assignment.name();
        match run {
            Some((current, _)) if current == name => {}
            Some((current, start)) => {
                close(current, start, tick);
                run = Some((name, tick));
            }
            None => run = Some((name, tick)),
        }
    }
    if let Some((current, start)) = run {
        close(current, start, trace.len() as Tick);
    }

    Schedule {
        title: None,
        sched: entries,
    }
}

/// Per-job outcome of one task, reconstructed from a compiled schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReplay {
    /// Jobs released in `[0, horizon)`, in release order.
    pub jobs: Vec<JobRecord>,
    /// Runs that ended while a started job was still unfinished.
    pub preemptions: usize,
}

/// Attributes the ticks `task` received in `schedule` to its jobs.
///
/// Jobs of one task are served in release order, so every tick goes to the
/// oldest unfinished job that has been released.
pub fn replay_jobs(task: &Task, schedule: &Schedule, horizon: Tick) -> JobReplay {
    if task.period == 0 || task.exec_time == 0 {
        return JobReplay::default();
    }

    let mut jobs: Vec<JobRecord> = (0..horizon)
        .step_by(task.period as usize)
        .map(|release| JobRecord {
            task: task.name.clone(),
            release,
            deadline: release.saturating_add(task.deadline),
            completion: None,
        })
        .collect();
    let mut preemptions = 0usize;

    let mut job = 0usize;
    let mut remaining = task.exec_time;
    for iv in schedule.intervals(&task.name) {
        let end = iv.end().min(horizon);
        let mut pos = iv.start();
        while pos < end && job < jobs.len() {
            pos = pos.max(jobs[job].release);
            if pos >= end {
                break;
            }
            let take = remaining.min(end - pos);
            remaining -= take;
            pos += take;
            if remaining == 0 {
                jobs[job].completion = Some(pos);
                job += 1;
                remaining = task.exec_time;
            }
        }
        if end < horizon && remaining < task.exec_time {
            preemptions += 1;
        }
    }

    JobReplay { jobs, preemptions }
}

/// Finds every job that missed its deadline within `[0, horizon)`.
///
/// A job is reported when it completes after its absolute deadline, or when
/// it is still unfinished at a deadline no later than `horizon`. Jobs whose
/// deadline lies beyond the horizon are not judged.
pub fn detect_deadline_misses(
    tasks: &[Task],
    schedule: &Schedule,
    horizon: Tick,
) -> Vec<DeadlineMiss> {
    let mut misses = Vec::new();

    for task in tasks {
        for record in replay_jobs(task, schedule, horizon).jobs {
            let missed = match record.completion {
                Some(done) => done > record.deadline,
                None => record.deadline <= horizon,
            };
            if !missed {
                continue;
            }
            let miss = DeadlineMiss {
                task: record.task,
                release: record.release,
                deadline: record.deadline,
                completion: record.completion,
            };
            warn!(
                task = %miss.task,
                release = miss.release,
                deadline = miss.deadline,
                completion = ?miss.completion,
                lateness = ?miss.lateness(),
                "deadline miss"
            );
            misses.push(miss);
        }
    }

    misses
}
