use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use workflow::config::{Overrides, ScanConfig};
use workflow::runner::Runner;

mod report;
mod shutdown;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless sweep radar driver")]
struct Args {
    /// Load a scan config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Serial port the sensor is attached to (e.g. /dev/ttyACM0, COM4)
    #[arg(long)]
    port: Option<String>,
    #[arg(long)]
    baud: Option<u32>,
    /// Use the built-in synthetic sensor instead of a serial port
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long)]
    seed: Option<u64>,
    /// Start with distance labels enabled
    #[arg(long, default_value_t = false)]
    labels: bool,
    #[arg(long)]
    label_fontsize: Option<u32>,
    #[arg(long)]
    label_every: Option<u32>,
    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration: Option<f64>,
    /// Print the final summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = if let Some(path) = &args.config {
        ScanConfig::load(path)?
    } else {
        ScanConfig::default()
    };
    let overrides = Overrides {
        port: args.port.clone(),
        baud: args.baud,
        synthetic: args.synthetic,
        seed: args.seed,
        show_labels: args.labels,
        label_fontsize: args.label_fontsize,
        label_every: args.label_every,
    };
    let config = base.apply(&overrides);

    let limit = args
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("parsing --duration")?;

    let shutdown = shutdown::watch_ctrl_c()?;
    let runner = Runner::new(config);
    info!("source: {:?}", runner.config().source);
    let summary = runner.execute(&shutdown, limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let m = summary.metrics;
        println!(
            "Scan finished after {:.1}s -> frames {}, lines {} ok / {} rejected",
            summary.elapsed_seconds, summary.frames, m.lines_accepted, m.lines_rejected
        );
        println!(
            "hits {} recorded / {} evicted / {} stored",
            m.hits_recorded, m.hits_evicted, summary.hits_stored
        );
    }

    Ok(())
}
