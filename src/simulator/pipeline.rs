//! End-to-end simulation pipeline.
//!
//! # Algorithm
//!
//! 1. Validate the task set.
//! 2. Run the schedulability test for the requested policy; stop on an
//!    infeasible set, carry an unproven verdict forward.
//! 3. Fix the horizon (hyperperiod unless one was requested).
//! 4. Run the dispatch engine.
//! 5. Compile the trace and check it for deadline misses.
//!
//! Each stage returns a typed result; nothing is printed.

use tracing::{info, warn};

use crate::analysis::{analyze, SchedulabilityReport, Verdict};
use crate::compiler::{compile, detect_deadline_misses};
use crate::dispatching::DispatchEngine;
use crate::error::{Result, SchedError};
use crate::horizon::horizon;
use crate::models::{DeadlineMiss, JobRecord, Policy, Schedule, Task, Tick, Trace};
use crate::validation::validate_tasks;

/// Input container for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// Tasks to simulate, in declaration order.
    pub tasks: Vec<Task>,
    /// Priority policy.
    pub policy: Policy,
    /// Ticks to simulate; `0` = one hyperperiod.
    pub horizon: Tick,
    /// Title copied into the compiled schedule.
    pub title: Option<String>,
    /// Whether to simulate sets that only pass the necessary test.
    pub allow_unproven: bool,
}

impl SimulationRequest {
    /// Creates a request simulating one hyperperiod.
    pub fn new(tasks: Vec<Task>, policy: Policy) -> Self {
        Self {
            tasks,
            policy,
            horizon: 0,
            title: None,
            allow_unproven: true,
        }
    }

    /// Sets the number of ticks to simulate (`0` = hyperperiod).
    pub fn with_horizon(mut self, horizon: Tick) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the schedule title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets whether unproven task sets are simulated.
    pub fn with_allow_unproven(mut self, allow: bool) -> Self {
        self.allow_unproven = allow;
        self
    }
}

/// Everything one simulation run produces.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Schedulability result the run was admitted under.
    pub report: SchedulabilityReport,
    /// Number of simulated ticks.
    pub horizon: Tick,
    /// Raw per-tick trace.
    pub trace: Trace,
    /// Engine job log.
    pub jobs: Vec<JobRecord>,
    /// Compiled schedule.
    pub schedule: Schedule,
    /// Jobs that missed their deadline.
    pub deadline_misses: Vec<DeadlineMiss>,
}

impl SimulationOutcome {
    /// Whether every judged job met its deadline.
    pub fn meets_all_deadlines(&self) -> bool {
        self.deadline_misses.is_empty()
    }
}

/// Runs the full validate → analyze → simulate → compile pipeline.
///
/// # Example
///
/// ```
/// use u_rtsched::models::{Policy, Task};
/// use u_rtsched::simulator::{SimulationRequest, Simulator};
///
/// let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 4)];
/// let request = SimulationRequest::new(tasks, Policy::Rms);
///
/// let outcome = Simulator::new().run(&request).unwrap();
/// assert_eq!(outcome.horizon, 4);
/// assert_eq!(outcome.trace.names(), vec!["A", "B", "A", "idle"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator;

impl Simulator {
    /// Creates a simulator.
    pub fn new() -> Self {
        Self
    }

    /// Runs one simulation.
    ///
    /// # Errors
    /// - [`SchedError::EmptyTaskSet`] for an empty task list.
    /// - [`SchedError::MalformedInput`] if validation fails.
    /// - [`SchedError::InfeasibleUtilization`] if utilization exceeds 1.0.
    /// - [`SchedError::Unproven`] if the set is unproven and the request
    ///   disallows that.
    /// - [`SchedError::HorizonOverflow`] if the hyperperiod overflows.
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationOutcome> {
        let tasks = &request.tasks;
        if tasks.is_empty() {
            return Err(SchedError::EmptyTaskSet);
        }
        validate_tasks(tasks).map_err(SchedError::MalformedInput)?;

        let report = analyze(tasks, request.policy)?;
        match report.verdict {
            Verdict::Infeasible => {
                return Err(SchedError::InfeasibleUtilization {
                    policy: request.policy,
                    utilization: report.utilization,
                });
            }
            Verdict::Unproven if !request.allow_unproven => {
                return Err(SchedError::Unproven {
                    utilization: report.utilization,
                    bound: report.bound,
                });
            }
            _ => {}
        }

        let horizon = horizon(tasks, request.horizon)?;
        info!(
            policy = %request.policy,
            tasks = tasks.len(),
            horizon,
            utilization = report.utilization,
            "starting simulation"
        );

        let run = DispatchEngine::new(request.policy).run(tasks, horizon)?;
        let mut schedule = compile(tasks, &run.trace);
        schedule.title = request.title.clone();
        let deadline_misses = detect_deadline_misses(tasks, &schedule, horizon);

        if !deadline_misses.is_empty() {
            warn!(
                policy = %request.policy,
                misses = deadline_misses.len(),
                "simulation finished with deadline misses"
            );
        }

        Ok(SimulationOutcome {
            report,
            horizon,
            trace: run.trace,
            jobs: run.jobs,
            schedule,
            deadline_misses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_rms_end_to_end() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 4)];
        let request = SimulationRequest::new(tasks, Policy::Rms).with_title("rms demo");
        let outcome = Simulator::new().run(&request).unwrap();

        assert_eq!(outcome.horizon, 4);
        assert_eq!(outcome.report.verdict, Verdict::Guaranteed);
        assert_eq!(outcome.schedule.title.as_deref(), Some("rms demo"));
        assert_eq!(
            outcome.schedule.intervals("A"),
            &[Interval(0, 1), Interval(2, 3)]
        );
        assert_eq!(outcome.schedule.intervals("B"), &[Interval(1, 2)]);
        assert_eq!(outcome.schedule.intervals("idle"), &[Interval(3, 4)]);
        assert!(outcome.meets_all_deadlines());
    }

    #[test]
    fn test_requested_horizon() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 4)];
        let request = SimulationRequest::new(tasks, Policy::Edf).with_horizon(10);
        let outcome = Simulator::new().run(&request).unwrap();
        assert_eq!(outcome.horizon, 10);
        assert_eq!(outcome.trace.len(), 10);
        assert_eq!(outcome.schedule.total_ticks(), 10);
    }

    #[test]
    fn test_malformed_input_rejected() {
        let tasks = vec![Task::new("A", 0, 2), Task::new("A", 1, 4)];
        let err = Simulator::new()
            .run(&SimulationRequest::new(tasks, Policy::Rms))
            .unwrap_err();
        match err {
            SchedError::MalformedInput(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::DuplicateName));
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::NonPositiveExecTime));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_set_rejected() {
        let err = Simulator::new()
            .run(&SimulationRequest::new(Vec::new(), Policy::Edf))
            .unwrap_err();
        assert!(matches!(err, SchedError::EmptyTaskSet));
    }

    #[test]
    fn test_infeasible_rejected() {
        let tasks = vec![Task::new("A", 2, 3), Task::new("B", 2, 4)];
        let err = Simulator::new()
            .run(&SimulationRequest::new(tasks, Policy::Edf))
            .unwrap_err();
        assert!(matches!(
            err,
            SchedError::InfeasibleUtilization {
                policy: Policy::Edf,
                ..
            }
        ));
    }

    #[test]
    fn test_unproven_runs_by_default_and_reports_misses() {
        // U = 1.0 > 0.828: RMS misses B's first deadline, EDF does not.
        let tasks = vec![Task::new("A", 2, 4), Task::new("B", 3, 6)];

        let rms = Simulator::new()
            .run(&SimulationRequest::new(tasks.clone(), Policy::Rms))
            .unwrap();
        assert_eq!(rms.report.verdict, Verdict::Unproven);
        assert_eq!(rms.deadline_misses.len(), 1);
        assert_eq!(rms.deadline_misses[0].task, "B");
        assert_eq!(rms.deadline_misses[0].completion, Some(7));

        let edf = Simulator::new()
            .run(&SimulationRequest::new(tasks, Policy::Edf))
            .unwrap();
        assert_eq!(edf.report.verdict, Verdict::Guaranteed);
        assert!(edf.meets_all_deadlines());
    }

    #[test]
    fn test_unproven_can_be_refused() {
        let tasks = vec![Task::new("A", 2, 4), Task::new("B", 3, 6)];
        let request = SimulationRequest::new(tasks, Policy::Rms).with_allow_unproven(false);
        let err = Simulator::new().run(&request).unwrap_err();
        assert!(matches!(err, SchedError::Unproven { .. }));
    }

    #[test]
    fn test_constrained_rms_is_not_guaranteed() {
        // U = 0.2, but the second task cannot run before both deadlines.
        let tasks = vec![
            Task::new("A", 1, 10).with_deadline(1),
            Task::new("B", 1, 10).with_deadline(1),
        ];

        let strict = SimulationRequest::new(tasks.clone(), Policy::Rms).with_allow_unproven(false);
        let err = Simulator::new().run(&strict).unwrap_err();
        assert!(matches!(err, SchedError::Unproven { .. }));

        let outcome = Simulator::new()
            .run(&SimulationRequest::new(tasks, Policy::Rms))
            .unwrap();
        assert_eq!(outcome.report.verdict, Verdict::Unproven);
        assert_eq!(outcome.deadline_misses.len(), 1);
        assert_eq!(outcome.deadline_misses[0].task, "B");
        assert_eq!(outcome.deadline_misses[0].completion, Some(2));
    }
}
