//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands, OutputFormat};
use crate::commands;

/// Route CLI commands to their handlers, returning the process exit code
pub async fn route(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Submit {
            command,
            format,
            porcelain,
            time_limit,
            memory_limit,
            diff_lines,
            scratch_dir,
            no_color,
        } => {
            let args = commands::submit::SubmitArgs {
                manifest: cli.manifest,
                command,
                format: if porcelain { OutputFormat::Porcelain } else { format },
                time_limit,
                memory_limit,
                diff_lines,
                scratch_dir,
                color: !no_color,
            };
            commands::submit::execute(args).await?;
            Ok(0)
        }
        Commands::Check => {
            let ok = commands::check::execute(&cli.manifest)?;
            Ok(if ok { 0 } else { 1 })
        }
    }
}
