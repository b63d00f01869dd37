mod config;
mod driver;
mod errors;
mod history;
mod results;
mod sample;
mod scoring;
mod stats;
mod tui;

use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use colored::Colorize;
use log::warn;

use crate::config::SimulationConfig;
use crate::driver::SimulationDriver;
use crate::errors::SimError;
use crate::results::SimulationReport;
use crate::scoring::CallStatus;
use crate::tui::DisplayMode;

/// Version string for --version, including the git revision when the
/// build script could determine one.
fn version() -> String {
    match option_env!("VOIPSIM_BUILD_GIT_HASH") {
        Some(rev) => format!("{} (rev {})", env!("CARGO_PKG_VERSION"), rev),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[derive(Parser)]
#[command(version = version(), about, long_about = None)]
struct Cli {
    /// Run headless and print a JSON report instead of the dashboard
    #[arg(long)]
    json: bool,

    /// Number of ticks to simulate in headless runs
    #[arg(long, default_value_t = 30)]
    ticks: u64,

    /// Seed for the random source, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Initial link bandwidth in kbps (64-2000)
    #[arg(long, default_value_t = 1000)]
    bandwidth: u32,

    /// Initial packet loss in percent (0-10)
    #[arg(long, default_value_t = 0.0)]
    loss: f64,

    /// Initial jitter in milliseconds (0-50)
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// Initial base latency in milliseconds (10-200)
    #[arg(long, default_value_t = 20.0)]
    latency: f64,

    /// Enable QoS voice prioritization
    #[arg(long)]
    qos: bool,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

impl Cli {
    /// Build the initial simulation config from the flags, clamping any
    /// out-of-range value to its control range.
    fn initial_config(&self) -> SimulationConfig {
        let requested = SimulationConfig {
            bandwidth_kbps: self.bandwidth,
            packet_loss_pct: self.loss,
            jitter_ms: self.jitter,
            latency_ms: self.latency,
            qos_enabled: self.qos,
        };

        let clamped = requested.clamped();
        if clamped != requested {
            warn!("out-of-range configuration flags clamped to their control ranges");
        }
        clamped
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let mode = DisplayMode::detect(cli.json, io::stdout().is_terminal());
    let mut driver = SimulationDriver::new(cli.initial_config(), cli.seed);

    let result = match mode {
        DisplayMode::Tui => tui::run_dashboard(&mut driver).await,
        DisplayMode::Json => run_headless(&mut driver, cli.ticks, true),
        DisplayMode::Headless => run_headless(&mut driver, cli.ticks, false),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(error.exit_code());
    }
}

/// Simulate `ticks` ticks without pacing and print the report.
///
/// Headless runs have no reason to wait out the real-time tick period;
/// each tick still completes fully before the next one.
fn run_headless(
    driver: &mut SimulationDriver,
    ticks: u64,
    json: bool,
) -> Result<(), SimError> {
    driver.start();
    for _ in 0..ticks {
        driver.tick();
    }
    driver.stop();

    let report = SimulationReport::from_driver(driver);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Print the plain-text run summary.
fn print_summary(report: &SimulationReport) {
    let quality = &report.quality;
    let mos_text = format!("{:.2} ({})", quality.mos, quality.status.label());
    let mos_colored = match quality.status {
        CallStatus::Excellent | CallStatus::Good => mos_text.bright_green(),
        CallStatus::Fair => mos_text.bright_yellow(),
        CallStatus::Poor | CallStatus::Bad => mos_text.bright_red(),
    };

    println!(
        "{} {} ticks, QoS {}",
        "Simulated:".bold().white(),
        report.ticks,
        if report.config.qos_enabled { "enabled" } else { "disabled" }
    );
    println!("{} {}", "MOS:".bold().white(), mos_colored);
    println!("{} {}", "R-Factor:".bold().white(), quality.r_factor);

    if let Some(sample) = report.samples.last() {
        println!(
            "{} {}% load, {} kbps link",
            "Network:".bold().white(),
            sample.network_load_pct,
            sample.bandwidth_kbps
        );
    }

    let window = &report.window;
    if let (Some(loss), Some(jitter), Some(latency)) =
        (window.avg_loss_pct, window.avg_jitter_ms, window.avg_latency_ms)
    {
        println!(
            "{} {:.2}% loss, {:.1} ms jitter, {:.0} ms latency",
            "Window avg:".bold().white(),
            loss,
            jitter,
            latency
        );
    }
}
