//! Crate error type.

use thiserror::Error;

use crate::models::Policy;
use crate::validation::ValidationError;

/// Errors reported by the simulation pipeline.
///
/// Every variant is a local decision for the caller; the library never
/// terminates the process.
#[derive(Debug, Error)]
pub enum SchedError {
    /// The task set failed validation; the simulation never started.
    #[error("malformed task set: {}", summarize(.0))]
    MalformedInput(Vec<ValidationError>),

    /// No tasks were supplied.
    #[error("task set is empty")]
    EmptyTaskSet,

    /// Total utilization exceeds 1.0, so no uniprocessor schedule exists.
    #[error("task set is not schedulable under {policy}: utilization {utilization:.4} > 1.0")]
    InfeasibleUtilization { policy: Policy, utilization: f64 },

    /// The sufficient bound was exceeded and the caller refused unproven runs.
    #[error("schedulability not proven: utilization {utilization:.4} exceeds bound {bound:.4}")]
    Unproven { utilization: f64, bound: f64 },

    /// The policy name is unknown, or the descriptor does not list it.
    #[error("unsupported scheduling policy '{policy}'")]
    UnsupportedPolicy { policy: String },

    /// The hyperperiod does not fit in a tick counter.
    #[error("hyperperiod of the task periods overflows")]
    HorizonOverflow,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, SchedError>;
