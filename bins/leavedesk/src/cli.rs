//! Command-line arguments for the scenario runner.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "leavedesk",
    version,
    about = "Replay a leave workflow scenario against a seeded desk"
)]
pub struct Cli {
    /// Scenario JSON file. Runs the built-in demo when omitted.
    #[arg(value_name = "SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Start without the seeded pending request.
    #[arg(long = "no-seed-requests")]
    pub no_seed_requests: bool,

    /// Emit JSON log lines (overrides `logging.json`).
    #[arg(long = "json-logs")]
    pub json_logs: bool,
}
