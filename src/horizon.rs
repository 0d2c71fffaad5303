//! Simulation horizon.
//!
//! By default a periodic task set is simulated for one hyperperiod, the LCM
//! of all periods. After that window every task releases at the same
//! relative instants again, so the schedule pattern repeats.

use crate::error::{Result, SchedError};
use crate::models::{Task, Tick};

fn gcd(mut a: Tick, mut b: Tick) -> Tick {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: Tick, b: Tick) -> Option<Tick> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Least common multiple of all task periods.
///
/// # Errors
/// - [`SchedError::EmptyTaskSet`] for an empty slice.
/// - [`SchedError::HorizonOverflow`] if the LCM does not fit in a [`Tick`].
pub fn hyperperiod(tasks: &[Task]) -> Result<Tick> {
    let mut periods = tasks.iter().map(|t| t.period);
    let first = periods.next().ok_or(SchedError::EmptyTaskSet)?;
    periods.try_fold(first, |acc, p| lcm(acc, p).ok_or(SchedError::HorizonOverflow))
}

/// Number of ticks to simulate.
///
/// `requested == 0` means "unset" and yields the hyperperiod. Any other value
/// is returned unchanged; a shorter window truncates the schedule and a
/// longer one repeats it.
pub fn horizon(tasks: &[Task], requested: Tick) -> Result<Tick> {
    if requested > 0 {
        return Ok(requested);
    }
    hyperperiod(tasks)
}
