//! LeaveDesk scenario runner
//!
//! Builds a desk seeded with demo data, replays a JSON scenario against it
//! and prints the resulting requests, balances and notifications as JSON.
//!
//! Usage: leavedesk [--no-seed-requests] [--json-logs] [SCENARIO.json]

mod cli;
mod scenario;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use leavedesk_core::workflow::RequestStatus;
use leavedesk_shared::{AppConfig, LoggingConfig};
use leavedesk_store::seed::{seed_demo, seed_pending_request};
use leavedesk_store::{FixedClock, LeaveDesk};
use scenario::{RecordingSink, Report, Scenario};

const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.json");

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    config.logging.json |= cli.json_logs;
    init_tracing(&config.logging);

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::parse(DEMO_SCENARIO).context("Invalid built-in demo scenario")?,
    };

    let mut desk = LeaveDesk::from_config(&config)?;
    if let Some(today) = scenario.today {
        desk = desk.with_clock(FixedClock::on(today));
        info!(%today, "Clock pinned");
    }
    let employees = seed_demo(&mut desk)?;
    if !cli.no_seed_requests {
        seed_pending_request(&mut desk, &employees)
            .context("Failed to seed the pending leave request")?;
    }

    let mut sink = RecordingSink::default();
    scenario.run(&mut desk, &mut sink)?;

    let requests = desk.requests();
    info!(
        pending = requests.with_status(RequestStatus::Pending).len(),
        approved = requests.with_status(RequestStatus::Approved).len(),
        rejected = requests.with_status(RequestStatus::Rejected).len(),
        "Scenario complete"
    );

    let report = Report {
        requests: requests.all(),
        balances: desk.balances().all(),
        notifications: sink.recorded(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
