//! Random periodic task-set generation.
//!
//! Splits a target utilization across `n` tasks with UUniFast, then picks
//! each period from a menu of harmonic-friendly values so hyperperiods stay
//! small enough to simulate.
//!
//! # Reference
//! Bini & Buttazzo (2005), "Measuring the Performance of Schedulability
//! Tests", Real-Time Systems 30(1-2)

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::{Task, Tick};

/// Default period menu; any subset has an LCM of at most 40.
pub const DEFAULT_PERIODS: [Tick; 6] = [4, 5, 8, 10, 20, 40];

/// UUniFast: `n` utilizations, uniformly distributed over the simplex,
/// summing to `total`.
pub fn uunifast<R: Rng>(n: usize, total: f64, rng: &mut R) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let mut shares = Vec::with_capacity(n);
    let mut sum = total;
    for i in 1..n {
        let next = sum * rng.random::<f64>().powf(1.0 / (n - i) as f64);
        shares.push(sum - next);
        sum = next;
    }
    shares.push(sum);
    shares
}

/// Generator of implicit-deadline integer task sets.
#[derive(Debug, Clone)]
pub struct TaskSetGenerator {
    task_count: usize,
    utilization: f64,
    periods: Vec<Tick>,
}

impl TaskSetGenerator {
    /// Creates a generator for `task_count` tasks with total utilization
    /// close to `utilization`.
    pub fn new(task_count: usize, utilization: f64) -> Self {
        Self {
            task_count,
            utilization,
            periods: DEFAULT_PERIODS.to_vec(),
        }
    }

    /// Sets the period menu. Zero periods are ignored.
    pub fn with_periods(mut self, periods: Vec<Tick>) -> Self {
        self.periods = periods.into_iter().filter(|&p| p > 0).collect();
        self
    }

    /// Generates one task set named `T1..Tn`.
    ///
    /// Execution times are rounded to whole ticks and clamped to
    /// `1..=period`, so the realized utilization only approximates the target.
    /// Returns an empty set if the period menu is empty.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Task> {
        if self.periods.is_empty() {
            return Vec::new();
        }
        uunifast(self.task_count, self.utilization, rng)
            .into_iter()
            .enumerate()
            .filter_map(|(i, u)| {
                let period = *self.periods.choose(rng)?;
                let exec_time = ((u * period as f64).round() as Tick).clamp(1, period);
                Some(Task::new(format!("T{}", i + 1), exec_time, period))
            })
            .collect()
    }
}
