//! Uniprocessor real-time scheduling simulator.
//!
//! Simulates periodic task sets under Rate-Monotonic (RMS) and
//! Earliest-Deadline-First (EDF) scheduling, one tick at a time, and
//! compiles the resulting trace into per-task execution intervals.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Job`, `Policy`, `Trace`, `Schedule`
//! - **`validation`**: Task-set integrity checks (names, positive timing fields)
//! - **`analysis`**: Liu & Layland bound (RMS) and utilization test (EDF)
//! - **`horizon`**: Hyperperiod computation
//! - **`dispatching`**: Priority policies, ready queue and dispatch engine
//! - **`compiler`**: Trace → schedule compilation and deadline-miss detection
//! - **`simulator`**: End-to-end pipeline and KPIs
//! - **`generator`**: Random task sets (UUniFast)
//! - **`io`**: YAML descriptors and schedule output
//!
//! # Contract
//!
//! | Operation | Function |
//! |-----------|----------|
//! | `validate(tasks)` | [`validation::validate_tasks`] |
//! | `analyze(tasks, policy)` | [`analysis::analyze`] |
//! | `simulate(tasks, policy, horizon)` | [`dispatching::simulate`] |
//! | `compile(tasks, trace)` | [`compiler::compile`] |
//!
//! # References
//!
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"
//! - Buttazzo (2011), "Hard Real-Time Computing Systems"

pub mod analysis;
pub mod compiler;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod horizon;
pub mod io;
pub mod models;
pub mod simulator;
pub mod validation;

pub use error::{Result, SchedError};
