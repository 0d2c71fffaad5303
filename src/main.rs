//! CLI entrypoint: simulate a YAML task set and emit the compiled schedule.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_rtsched::io::{load_task_set, save_schedule};
use u_rtsched::models::Policy;
use u_rtsched::simulator::{SimulationKpi, SimulationRequest, Simulator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Uniprocessor RMS/EDF scheduling simulator", long_about = None)]
struct Cli {
    /// Input file describing the tasks to be scheduled.
    file: PathBuf,
    /// Output file for the resulting schedule. Printed to stdout if omitted.
    #[arg(long)]
    ofile: Option<PathBuf>,
    /// Number of ticks to simulate (0 = hyperperiod).
    #[arg(short = 's', long = "simtime", default_value_t = 0)]
    sim_time: u64,
    /// Scheduling policy.
    #[arg(long, default_value = "rms")]
    sched: Policy,
    /// Refuse task sets whose schedulability is not proven.
    #[arg(long)]
    strict: bool,
    /// Increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file = load_task_set(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    let tasks = file.tasks_for(cli.sched)?.to_vec();

    let mut request = SimulationRequest::new(tasks, cli.sched)
        .with_horizon(cli.sim_time)
        .with_allow_unproven(!cli.strict);
    if let Some(title) = &file.title {
        request = request.with_title(title.clone());
    }

    let outcome = Simulator::new().run(&request)?;
    let report = &outcome.report;
    let kpi = SimulationKpi::calculate(&outcome.schedule, &request.tasks, outcome.horizon);
    info!(
        policy = %cli.sched,
        horizon = outcome.horizon,
        utilization = report.utilization,
        verdict = ?report.verdict,
        cpu = kpi.cpu_utilization,
        preemptions = kpi.preemptions,
        misses = kpi.deadline_misses,
        "simulation complete"
    );

    match &cli.ofile {
        Some(path) => save_schedule(&outcome.schedule, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", outcome.schedule.to_yaml()?),
    }

    Ok(())
}
