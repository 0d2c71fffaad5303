//! Compiled schedule model.
//!
//! A schedule groups the ticks of a trace into maximal runs per task. It is
//! the structure handed to renderers and serializers:
//!
//! ```yaml
//! title: RMS example
//! sched:
//!   - name: A
//!     jobs: [[0, 1], [2, 3]]
//!   - name: idle
//!     jobs: [[3, 4]]
//! ```

use serde::{Deserialize, Serialize};

use super::{Tick, TickAssignment, Trace, IDLE};

/// A half-open tick interval `[start, end)`.
///
/// Serialized as a two-element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval(pub Tick, pub Tick);

impl Interval {
    /// Creates an interval.
    pub fn new(start: Tick, end: Tick) -> Self {
        Self(start, end)
    }

    /// First tick of the run.
    #[inline]
    pub fn start(&self) -> Tick {
        self.0
    }

    /// One past the last tick of the run.
    #[inline]
    pub fn end(&self) -> Tick {
        self.1
    }

    /// Run length in ticks.
    #[inline]
    pub fn len(&self) -> Tick {
        self.1.saturating_sub(self.0)
    }

    /// Whether the interval covers no tick.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `tick` lies inside the interval.
    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.0 <= tick && tick < self.1
    }
}

/// Execution intervals of one task (or of the idle pseudo-task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Task name, or `"idle"`.
    pub name: String,
    /// Display color for renderers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Maximal execution runs, strictly increasing and non-overlapping.
    pub jobs: Vec<Interval>,
}

impl ScheduleEntry {
    /// Creates an entry with no intervals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            jobs: Vec::new(),
        }
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Total ticks covered by this entry.
    pub fn busy_ticks(&self) -> Tick {
        self.jobs.iter().map(Interval::len).sum()
    }

    /// Whether this is the idle pseudo-task.
    pub fn is_idle(&self) -> bool {
        self.name == IDLE
    }
}

/// A compiled schedule.
///
/// Holds one entry per task, in declaration order, followed by the idle entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Optional chart title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Per-task interval lists.
    pub sched: Vec<ScheduleEntry>,
}

/// A job that did not finish by its absolute deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineMiss {
    /// Owning task name.
    pub task: String,
    /// Release tick of the job.
    pub release: Tick,
    /// Absolute deadline of the job.
    pub deadline: Tick,
    /// Completion tick, or `None` if the job was still unfinished at the horizon.
    pub completion: Option<Tick>,
}

impl DeadlineMiss {
    /// Ticks past the deadline at completion, or `None` if it never completed.
    pub fn lateness(&self) -> Option<Tick> {
        self.completion.map(|c| c.saturating_sub(self.deadline))
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the display color of the named entry. Unknown names are ignored.
    pub fn with_color(mut self, name: &str, color: impl Into<String>) -> Self {
        if let Some(entry) = self.entry_mut(name) {
            entry.color = Some(color.into());
        }
        self
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.sched.push(entry);
    }

    /// Finds the entry for a task (or `"idle"`).
    pub fn entry(&self, name: &str) -> Option<&ScheduleEntry> {
        self.sched.iter().find(|e| e.name == name)
    }

    /// Mutable access to the entry for a task.
    pub fn entry_mut(&mut self, name: &str) -> Option<&mut ScheduleEntry> {
        self.sched.iter_mut().find(|e| e.name == name)
    }

    /// Intervals of the named entry (empty if unknown).
    pub fn intervals(&self, name: &str) -> &[Interval] {
        self.entry(name).map(|e| e.jobs.as_slice()).unwrap_or(&[])
    }

    /// Ticks spent on the named entry.
    pub fn busy_ticks(&self, name: &str) -> Tick {
        self.entry(name).map(ScheduleEntry::busy_ticks).unwrap_or(0)
    }

    /// Sum of all interval lengths, idle included.
    pub fn total_ticks(&self) -> Tick {
        self.sched.iter().map(ScheduleEntry::busy_ticks).sum()
    }

    /// Latest interval end across all entries.
    pub fn end(&self) -> Tick {
        self.sched
            .iter()
            .flat_map(|e| e.jobs.iter())
            .map(Interval::end)
            .max()
            .unwrap_or(0)
    }

    /// Share of `[0, horizon)` spent on the named entry.
    ///
    /// Returns `None` if `horizon` is zero.
    pub fn utilization(&self, name: &str, horizon: Tick) -> Option<f64> {
        if horizon == 0 {
            return None;
        }
        Some(self.busy_ticks(name) as f64 / horizon as f64)
    }

    /// Name of the entry running at `tick`.
    pub fn assignment_at(&self, tick: Tick) -> Option<&str> {
        self.sched
            .iter()
            .find(|e| e.jobs.iter().any(|iv| iv.contains(tick)))
            .map(|e| e.name.as_str())
    }

    /// Whether every tick of `[0, horizon)` belongs to exactly one interval
    /// and every entry's intervals are strictly increasing.
    pub fn covers_exactly(&self, horizon: Tick) -> bool {
        let Ok(len) = usize::try_from(horizon) else {
            return false;
        };
        let mut hits = vec![0u8; len];
        for entry in &self.sched {
            let mut prev_end: Option<Tick> = None;
            for iv in &entry.jobs {
                if iv.is_empty() || iv.end() > horizon {
                    return false;
                }
                if prev_end.is_some_and(|p| iv.start() < p) {
                    return false;
                }
                prev_end = Some(iv.end());
                for t in iv.start()..iv.end() {
                    hits[t as usize] += 1;
                }
            }
        }
        hits.iter().all(|&h| h == 1)
    }

    /// Expands the schedule back into a trace of length [`Schedule::end`].
    ///
    /// Ticks not covered by any interval are reported as idle.
    pub fn to_trace(&self) -> Trace {
        (0..self.end())
            .map(|t| match self.assignment_at(t) {
                Some(name) => TickAssignment::from(name),
                None => TickAssignment::Idle,
            })
            .collect()
    }
}
