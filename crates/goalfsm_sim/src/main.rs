use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goalfsm_core::logging::log_core_error;
use goalfsm_sim::{run, SimConfig, StopReason};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimConfig::from_args()
        .inspect_err(log_core_error)
        .context("parse simulator arguments")?;
    info!(
        nodes = config.nodes,
        edges = config.edges.len(),
        start = config.start,
        target = config.target,
        period_ms = config.period.as_millis() as u64,
        "starting simulation"
    );

    let summary = run(&config)
        .await
        .inspect_err(log_core_error)
        .context("run simulation")?;
    info!(
        ticks = summary.ticks,
        advanced = summary.advanced,
        failed = summary.failed,
        final_node = summary.final_node,
        stop = ?summary.stop,
        "simulation finished"
    );

    match summary.stop {
        StopReason::Reached => Ok(()),
        StopReason::NoPath => bail!("target {} unreachable from {}", config.target, summary.final_node),
        StopReason::TickLimit => bail!("target {} not reached within {} ticks", config.target, config.max_ticks),
    }
}
