//! Utilization-based schedulability analysis.
//!
//! # Rate-Monotonic
//! Liu & Layland (1973): `n` independent periodic tasks are guaranteed
//! schedulable under RMS on one processor if
//!
//! `U = Σ C_i / T_i ≤ n (2^(1/n) − 1)`
//!
//! The bound is sufficient, not necessary. Between the bound and 1.0 the set
//! may or may not be schedulable; above 1.0 it is certainly not. The bound
//! assumes every deadline is at least the period; with a shorter deadline
//! the set is at best unproven.
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | ∞ | ln 2 ≈ 0.693 |
//!
//! # Earliest-Deadline-First
//! For implicit deadlines, `U ≤ 1` is necessary and sufficient. When some
//! deadline is shorter than its period, `U ≤ 1` stays necessary and the
//! density `Σ C_i / min(D_i, T_i) ≤ 1` is used as the sufficient test.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchedError};
use crate::models::{Policy, Task};

/// Slack for floating-point sums such as `1/3 + 1/3 + 1/3`.
const UTILIZATION_EPSILON: f64 = 1e-9;

/// Strength of a schedulability result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The sufficient test passed: no deadline will be missed.
    Guaranteed,
    /// Necessary condition holds but the sufficient test failed.
    /// Simulation may proceed; the result carries no guarantee.
    Unproven,
    /// Utilization exceeds 1.0.
    Infeasible,
}

/// Outcome of a schedulability test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulabilityReport {
    /// Policy the test was run for.
    pub policy: Policy,
    /// Total utilization `Σ C_i / T_i`.
    pub utilization: f64,
    /// Bound the utilization (RMS) or density (EDF) was compared against.
    pub bound: f64,
    /// Result strength.
    pub verdict: Verdict,
}

impl SchedulabilityReport {
    /// Whether the simulation may proceed (guaranteed or unproven).
    pub fn is_schedulable(&self) -> bool {
        self.verdict != Verdict::Infeasible
    }

    /// Whether the task set is provably schedulable.
    pub fn is_guaranteed(&self) -> bool {
        self.verdict == Verdict::Guaranteed
    }
}

/// Liu & Layland utilization bound `n (2^(1/n) − 1)`.
///
/// Returns `0.0` for `n = 0` and `1.0` for `n = 1`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// Total utilization `Σ exec_time / period`.
pub fn utilization(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::utilization).sum()
}

/// Total density `Σ exec_time / min(deadline, period)`.
pub fn density(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .map(|t| {
            let window = t.deadline.min(t.period);
            if window == 0 {
                0.0
            } else {
                t.exec_time as f64 / window as f64
            }
        })
        .sum()
}

/// Runs the schedulability test for `policy`.
///
/// # Errors
/// [`SchedError::EmptyTaskSet`] if `tasks` is empty; utilization of an empty
/// set is not meaningful and is kept distinct from "not schedulable".
pub fn analyze(tasks: &[Task], policy: Policy) -> Result<SchedulabilityReport> {
    if tasks.is_empty() {
        return Err(SchedError::EmptyTaskSet);
    }

    let u = utilization(tasks);
    let report = match policy {
        Policy::Rms => {
            let bound = liu_layland_bound(tasks.len());
            let verdict = if u > 1.0 + UTILIZATION_EPSILON {
                Verdict::Infeasible
            } else if !tasks.iter().any(Task::has_constrained_deadline)
                && u <= bound + UTILIZATION_EPSILON
            {
                Verdict::Guaranteed
            } else {
                Verdict::Unproven
            };
            SchedulabilityReport {
                policy,
                utilization: u,
                bound,
                verdict,
            }
        }
        Policy::Edf => {
            let verdict = if u > 1.0 + UTILIZATION_EPSILON {
                Verdict::Infeasible
            } else if !tasks.iter().any(Task::has_constrained_deadline)
                || density(tasks) <= 1.0 + UTILIZATION_EPSILON
            {
                Verdict::Guaranteed
            } else {
                Verdict::Unproven
            };
            SchedulabilityReport {
                policy,
                utilization: u,
                bound: 1.0,
                verdict,
            }
        }
    };

    debug!(
        policy = %policy,
        utilization = report.utilization,
        bound = report.bound,
        verdict = ?report.verdict,
        "schedulability analysis"
    );
    if report.verdict == Verdict::Unproven {
        warn!(
            policy = %policy,
            utilization = report.utilization,
            bound = report.bound,
            "sufficient schedulability test not met; deadlines are not guaranteed"
        );
    }

    Ok(report)
}

/// Short form of [`analyze`]: `(schedulable, utilization)`.
///
/// `schedulable` is `true` for both guaranteed and unproven sets; use
/// [`analyze`] to tell them apart.
pub fn is_schedulable(tasks: &[Task], policy: Policy) -> Result<(bool, f64)> {
    let report = analyze(tasks, policy)?;
    Ok((report.is_schedulable(), report.utilization))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_small_n() {
        assert_eq!(liu_layland_bound(0), 0.0);
        assert!((liu_layland_bound(1) - 1.0).abs() < 1e-10);
        assert!((liu_layland_bound(2) - 0.828_427_124_746).abs() < 1e-9);
        assert!((liu_layland_bound(3) - 0.779_763_149_9).abs() < 1e-9);
    }

    #[test]
    fn test_bound_decreases_towards_ln2() {
        let mut prev = liu_layland_bound(1);
        for n in 2..50 {
            let b = liu_layland_bound(n);
            assert!(b < prev);
            assert!(b > std::f64::consts::LN_2);
            prev = b;
        }
    }

    #[test]
    fn test_rms_guaranteed() {
        let tasks = vec![
            Task::new("T1", 1, 4),
            Task::new("T2", 1, 5),
            Task::new("T3", 1, 20),
        ];
        let report = analyze(&tasks, Policy::Rms).unwrap();
        assert!((report.utilization - 0.45).abs() < 1e-10);
        assert!((report.bound - 0.7798).abs() < 1e-4);
        assert_eq!(report.verdict, Verdict::Guaranteed);
        assert!(report.is_guaranteed());
    }

    #[test]
    fn test_rms_unproven_is_still_schedulable() {
        // U = 0.5 + 0.4 = 0.9 > 0.828
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 2, 5)];
        let report = analyze(&tasks, Policy::Rms).unwrap();
        assert_eq!(report.verdict, Verdict::Unproven);
        assert!(report.is_schedulable());
        assert!(!report.is_guaranteed());
    }

    #[test]
    fn test_rms_full_utilization_harmonic() {
        // U = 1.0 exactly: above the bound, not infeasible.
        let tasks = vec![
            Task::new("A", 1, 3),
            Task::new("B", 1, 3),
            Task::new("C", 1, 3),
        ];
        let report = analyze(&tasks, Policy::Rms).unwrap();
        assert_eq!(report.verdict, Verdict::Unproven);
    }

    #[test]
    fn test_rms_constrained_deadline_not_guaranteed() {
        // U = 0.2 is far below the bound, but both jobs are due after one tick.
        let tasks = vec![
            Task::new("A", 1, 10).with_deadline(1),
            Task::new("B", 1, 10).with_deadline(1),
        ];
        let report = analyze(&tasks, Policy::Rms).unwrap();
        assert_eq!(report.verdict, Verdict::Unproven);
        assert!(report.is_schedulable());

        // Deadlines past the period keep the bound valid.
        let relaxed = vec![
            Task::new("A", 1, 4).with_deadline(6),
            Task::new("B", 1, 5),
        ];
        assert_eq!(
            analyze(&relaxed, Policy::Rms).unwrap().verdict,
            Verdict::Guaranteed
        );
    }

    #[test]
    fn test_infeasible() {
        let tasks = vec![Task::new("A", 2, 3), Task::new("B", 2, 4)];
        for policy in Policy::ALL {
            let report = analyze(&tasks, policy).unwrap();
            assert_eq!(report.verdict, Verdict::Infeasible);
            assert!(!report.is_schedulable());
        }
    }

    #[test]
    fn test_edf_exact() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 2, 5)];
        let report = analyze(&tasks, Policy::Edf).unwrap();
        assert_eq!(report.verdict, Verdict::Guaranteed);
        assert_eq!(report.bound, 1.0);

        let full = vec![Task::new("A", 1, 2), Task::new("B", 2, 4)];
        assert_eq!(
            analyze(&full, Policy::Edf).unwrap().verdict,
            Verdict::Guaranteed
        );
    }

    #[test]
    fn test_edf_constrained_deadlines() {
        // U = 0.8, density = 2/4 + 2/5 = 0.9
        let tasks = vec![
            Task::new("A", 2, 5).with_deadline(4),
            Task::new("B", 2, 5),
        ];
        assert_eq!(
            analyze(&tasks, Policy::Edf).unwrap().verdict,
            Verdict::Guaranteed
        );

        // U = 0.8, density = 2/2 + 2/5 = 1.4
        let tight = vec![
            Task::new("A", 2, 5).with_deadline(2),
            Task::new("B", 2, 5),
        ];
        assert_eq!(
            analyze(&tight, Policy::Edf).unwrap().verdict,
            Verdict::Unproven
        );
    }

    #[test]
    fn test_empty_task_set_is_distinct() {
        assert!(matches!(
            analyze(&[], Policy::Rms),
            Err(SchedError::EmptyTaskSet)
        ));
        assert!(matches!(
            is_schedulable(&[], Policy::Edf),
            Err(SchedError::EmptyTaskSet)
        ));
    }

    #[test]
    fn test_is_schedulable_short_form() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 4)];
        let (ok, u) = is_schedulable(&tasks, Policy::Rms).unwrap();
        assert!(ok);
        assert!((u - 0.75).abs() < 1e-10);
    }
}
