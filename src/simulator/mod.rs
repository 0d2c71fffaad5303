//! Simulation pipeline and KPI evaluation.
//!
//! Provides the end-to-end `Simulator` (validate, analyze, simulate,
//! compile) and run quality metrics.
//!
//! # KPI
//!
//! `SimulationKpi` computes standard real-time metrics: CPU utilization,
//! context switches, preemptions, response times and deadline misses.
//!
//! # References
//!
//! - Buttazzo (2011), "Hard Real-Time Computing Systems", Ch. 4
//! - Liu (2000), "Real-Time Systems", Ch. 6

mod kpi;
mod pipeline;

pub use kpi::SimulationKpi;
pub use pipeline::{SimulationOutcome, SimulationRequest, Simulator};
