//! YAML task-set descriptors and schedule output.
//!
//! Input format:
//!
//! ```yaml
//! title: two tasks
//! algo: [rms, edf]
//! tasks:
//!   - { name: A, exec_time: 1, period: 2, deadline: 2 }
//!   - { name: B, exec_time: 1, period: 4, deadline: 4 }
//! ```
//!
//! Missing or wrong-typed fields (including negative numbers) are rejected
//! by deserialization; zero values are caught by [`crate::validation`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchedError};
use crate::models::{Policy, Schedule, Task};

/// A task-set descriptor file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSetFile {
    /// Optional title for the rendered schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Policies this task set is meant to be simulated with.
    pub algo: Vec<Policy>,
    /// Tasks in declaration order.
    pub tasks: Vec<Task>,
}

impl TaskSetFile {
    /// Parses a descriptor from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Whether the descriptor lists `policy` in `algo`.
    pub fn supports(&self, policy: Policy) -> bool {
        self.algo.contains(&policy)
    }

    /// Returns the tasks if `policy` is listed in `algo`.
    ///
    /// # Errors
    /// [`SchedError::UnsupportedPolicy`] otherwise.
    pub fn tasks_for(&self, policy: Policy) -> Result<&[Task]> {
        if self.supports(policy) {
            Ok(&self.tasks)
        } else {
            Err(SchedError::UnsupportedPolicy {
                policy: policy.to_string(),
            })
        }
    }
}

/// Loads a descriptor from a YAML file.
pub fn load_task_set(path: impl AsRef<Path>) -> Result<TaskSetFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let file = TaskSetFile::from_yaml_str(&text)?;
    debug!(path = %path.display(), tasks = file.tasks.len(), "loaded task set");
    Ok(file)
}

impl Schedule {
    /// Serializes the schedule as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parses a schedule from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Writes a schedule to a YAML file.
pub fn save_schedule(schedule: &Schedule, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, schedule.to_yaml()?)?;
    debug!(path = %path.display(), "saved schedule");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, ScheduleEntry};

    const SAMPLE: &str = r#"
title: two tasks
algo: [rms, edf]
tasks:
  - name: A
    exec_time: 1
    period: 2
    deadline: 2
  - name: B
    exec_time: 1
    period: 4
    deadline: 4
"#;

    #[test]
    fn test_parse_descriptor() {
        let file = TaskSetFile::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(file.title.as_deref(), Some("two tasks"));
        assert_eq!(file.algo, vec![Policy::Rms, Policy::Edf]);
        assert_eq!(file.tasks.len(), 2);
        assert_eq!(file.tasks[1], Task::new("B", 1, 4));
    }

    #[test]
    fn test_policy_support() {
        let mut file = TaskSetFile::from_yaml_str(SAMPLE).unwrap();
        file.algo = vec![Policy::Rms];
        assert!(file.tasks_for(Policy::Rms).is_ok());
        assert!(matches!(
            file.tasks_for(Policy::Edf),
            Err(SchedError::UnsupportedPolicy { .. })
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        let text = "algo: [rms]\ntasks:\n  - { name: A, exec_time: 1, period: 2 }\n";
        assert!(matches!(
            TaskSetFile::from_yaml_str(text),
            Err(SchedError::Yaml(_))
        ));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let negative = "algo: [rms]\ntasks:\n  - { name: A, exec_time: -1, period: 2, deadline: 2 }\n";
        assert!(TaskSetFile::from_yaml_str(negative).is_err());

        let text = "algo: [rms]\ntasks:\n  - { name: A, exec_time: fast, period: 2, deadline: 2 }\n";
        assert!(TaskSetFile::from_yaml_str(text).is_err());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let text = "algo: [llf]\ntasks: []\n";
        assert!(TaskSetFile::from_yaml_str(text).is_err());
    }

    #[test]
    fn test_schedule_yaml() {
        let mut schedule = Schedule::new().with_title("demo");
        schedule.add_entry(ScheduleEntry {
            name: "A".into(),
            color: None,
            jobs: vec![Interval(0, 1), Interval(2, 3)],
        });
        schedule.add_entry(ScheduleEntry::new("idle"));

        let yaml = schedule.to_yaml().unwrap();
        assert!(yaml.contains("title: demo"));
        assert!(!yaml.contains("color"));

        let back = Schedule::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_task_set("/nonexistent/u-rtsched/tasks.yaml").unwrap_err();
        assert!(matches!(err, SchedError::Io(_)));
    }
}
