//! tckit CLI
//!
//! Grades submissions against the recorded test cases of a problem.
//!
//! # Commands
//!
//! - `tckit submit <command>`: run a submission on every test case and print
//!   the verdict of each subtask
//! - `tckit check`: validate a problem manifest and list missing test-case
//!   files
//!
//! Set `RUST_LOG=debug` for verbose logging.

mod args;
mod commands;
mod router;

use clap::Parser;

pub use args::{Cli, Commands, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with environment-based filtering
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = router::route(cli).await?;
    std::process::exit(code);
}
