//! Tick-by-tick execution trace.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Tick;

/// Name reserved for the idle pseudo-task.
pub const IDLE: &str = "idle";

/// What the CPU did during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TickAssignment {
    /// A job of the named task executed.
    Task(String),
    /// No job was ready.
    Idle,
}

impl TickAssignment {
    /// Task name, or `"idle"`.
    pub fn name(&self) -> &str {
        match self {
            TickAssignment::Task(name) => name,
            TickAssignment::Idle => IDLE,
        }
    }

    /// Whether the CPU was idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, TickAssignment::Idle)
    }
}

impl From<String> for TickAssignment {
    fn from(name: String) -> Self {
        if name == IDLE {
            TickAssignment::Idle
        } else {
            TickAssignment::Task(name)
        }
    }
}

impl From<&str> for TickAssignment {
    fn from(name: &str) -> Self {
        TickAssignment::from(name.to_string())
    }
}

impl From<TickAssignment> for String {
    fn from(a: TickAssignment) -> Self {
        match a {
            TickAssignment::Task(name) => name,
            TickAssignment::Idle => IDLE.to_string(),
        }
    }
}

impl fmt::Display for TickAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ordered sequence of tick assignments produced by one simulation run.
///
/// Entry `i` describes tick `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace(Vec<TickAssignment>);

impl Trace {
    /// Creates an empty trace with room for `horizon` ticks.
    pub fn with_capacity(horizon: usize) -> Self {
        Self(Vec::with_capacity(horizon))
    }

    /// Builds a trace from plain names (`"idle"` maps to [`TickAssignment::Idle`]).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            names
                .into_iter()
                .map(|n| TickAssignment::from(n.into()))
                .collect(),
        )
    }

    /// Appends the assignment for the next tick.
    pub fn push(&mut self, assignment: TickAssignment) {
        self.0.push(assignment);
    }

    /// Number of simulated ticks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tick was simulated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assignment at `tick`, if simulated.
    pub fn get(&self, tick: Tick) -> Option<&TickAssignment> {
        usize::try_from(tick).ok().and_then(|i| self.0.get(i))
    }

    /// Iterates over assignments in tick order.
    pub fn iter(&self) -> std::slice::Iter<'_, TickAssignment> {
        self.0.iter()
    }

    /// Assignments as a slice.
    pub fn as_slice(&self) -> &[TickAssignment] {
        &self.0
    }

    /// Names in tick order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(TickAssignment::name).collect()
    }

    /// Number of ticks assigned to `name` (`"idle"` counts idle ticks).
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|a| a.name() == name).count()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TickAssignment;
    type IntoIter = std::slice::Iter<'a, TickAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<TickAssignment> for Trace {
    fn from_iter<I: IntoIterator<Item = TickAssignment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
