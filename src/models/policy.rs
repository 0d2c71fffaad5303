//! Scheduling policy selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedError;

/// Uniprocessor priority-assignment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Rate-Monotonic: fixed priority, shorter period first.
    Rms,
    /// Earliest-Deadline-First: dynamic priority, earlier absolute deadline first.
    Edf,
}

impl Policy {
    /// All supported policies.
    pub const ALL: [Policy; 2] = [Policy::Rms, Policy::Edf];

    /// Lowercase policy name as used in task-set descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Rms => "rms",
            Policy::Edf => "edf",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rms" => Ok(Policy::Rms),
            "edf" => Ok(Policy::Edf),
            _ => Err(SchedError::UnsupportedPolicy {
                policy: s.to_string(),
            }),
        }
    }
}
