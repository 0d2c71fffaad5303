//! Input validation for periodic task sets.
//!
//! Checks structural integrity of a task set before analysis or simulation.
//! Detects:
//! - Task sets with fewer than two tasks
//! - Empty, duplicate, or reserved task names
//! - Non-positive execution times, periods, or deadlines
//!
//! All problems are collected, so one pass reports everything wrong with
//! an input file.

use std::collections::HashSet;

use crate::models::{Task, IDLE};

/// Minimum number of tasks in a simulated task set.
pub const MIN_TASKS: usize = 2;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Fewer than [`MIN_TASKS`] tasks.
    TooFewTasks,
    /// A task has an empty name.
    EmptyName,
    /// A task uses the name of the idle pseudo-task.
    ReservedName,
    /// Two tasks share the same name.
    DuplicateName,
    /// `exec_time` is zero.
    NonPositiveExecTime,
    /// `period` is zero.
    NonPositivePeriod,
    /// `deadline` is zero.
    NonPositiveDeadline,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task set.
///
/// Checks:
/// 1. At least [`MIN_TASKS`] tasks
/// 2. Every name is non-empty, not `"idle"`, and unique
/// 3. `exec_time`, `period` and `deadline` are positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.len() < MIN_TASKS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewTasks,
            format!(
                "the task list must have at least {MIN_TASKS} tasks, found {}",
                tasks.len()
            ),
        ));
    }

    let mut names = HashSet::new();
    for (i, task) in tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("task #{i} has an empty name"),
            ));
        } else if task.name == IDLE {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedName,
                format!("task #{i} uses the reserved name '{IDLE}'"),
            ));
        } else if !names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("duplicate task name: {}", task.name),
            ));
        }

        if task.exec_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveExecTime,
                format!("task '{}': 'exec_time' must be a positive integer", task.name),
            ));
        }
        if task.period == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositivePeriod,
                format!("task '{}': 'period' must be a positive integer", task.name),
            ));
        }
        if task.deadline == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDeadline,
                format!("task '{}': 'deadline' must be a positive integer", task.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![Task::new("A", 1, 4), Task::new("B", 2, 8).with_deadline(6)]
    }

    fn kinds(tasks: &[Task]) -> Vec<ValidationErrorKind> {
        validate_tasks(tasks)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
    }

    #[test]
    fn test_too_few_tasks() {
        assert_eq!(kinds(&[]), vec![ValidationErrorKind::TooFewTasks]);
        assert_eq!(
            kinds(&[Task::new("A", 1, 4)]),
            vec![ValidationErrorKind::TooFewTasks]
        );
    }

    #[test]
    fn test_duplicate_name() {
        let tasks = vec![Task::new("A", 1, 4), Task::new("A", 1, 5)];
        assert_eq!(kinds(&tasks), vec![ValidationErrorKind::DuplicateName]);
    }

    #[test]
    fn test_empty_and_reserved_names() {
        let tasks = vec![Task::new("  ", 1, 4), Task::new("idle", 1, 5)];
        assert_eq!(
            kinds(&tasks),
            vec![
                ValidationErrorKind::EmptyName,
                ValidationErrorKind::ReservedName
            ]
        );
    }

    #[test]
    fn test_non_positive_fields() {
        let tasks = vec![
            Task::new("A", 0, 4),
            Task::new("B", 1, 0).with_deadline(3),
            Task::new("C", 1, 4).with_deadline(0),
        ];
        assert_eq!(
            kinds(&tasks),
            vec![
                ValidationErrorKind::NonPositiveExecTime,
                ValidationErrorKind::NonPositivePeriod,
                ValidationErrorKind::NonPositiveDeadline,
            ]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![Task::new("", 0, 0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 4);
        assert!(errors.iter().any(|e| e.message.contains("at least 2")));
    }
}
