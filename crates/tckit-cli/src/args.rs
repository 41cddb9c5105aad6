//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default manifest file name
pub const DEFAULT_MANIFEST_FILE: &str = "problem.toml";

#[derive(Parser)]
#[command(name = "tckit")]
#[command(about = "Grade submissions against recorded test cases")]
#[command(version)]
pub struct Cli {
    /// Path to the problem manifest (TOML, YAML or JSON)
    #[arg(long, short, global = true, default_value = DEFAULT_MANIFEST_FILE, env = "TCKIT_MANIFEST")]
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a submission on every test case
    Submit {
        /// Shell command running the submission
        command: String,

        /// Output format of the final result
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Shorthand for `--format porcelain`
        #[arg(long, conflicts_with = "format")]
        porcelain: bool,

        /// Override the CPU time limit (seconds)
        #[arg(long)]
        time_limit: Option<u64>,

        /// Override the memory limit (MB)
        #[arg(long)]
        memory_limit: Option<u64>,

        /// Maximum rendered diff lines per wrong answer
        #[arg(long)]
        diff_lines: Option<usize>,

        /// Keep grading artifacts in this directory instead of a temporary one
        #[arg(long)]
        scratch_dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Validate the manifest and report missing test-case files
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress and result
    Text,
    /// One `<subtask-id> <CODE>` line per subtask
    Porcelain,
    /// Subtask verdicts as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args() {
        let cli = Cli::parse_from(["tckit", "-m", "p.yaml", "submit", "./sol", "--porcelain", "--time-limit", "3"]);
        assert_eq!(cli.manifest, PathBuf::from("p.yaml"));
        match cli.command {
            Commands::Submit {
                command,
                porcelain,
                time_limit,
                format,
                ..
            } => {
                assert_eq!(command, "./sol");
                assert!(porcelain);
                assert_eq!(time_limit, Some(3));
                assert_eq!(format, OutputFormat::Text);
            }
            Commands::Check => panic!("expected submit"),
        }
    }

    #[test]
    fn test_default_manifest() {
        let cli = Cli::parse_from(["tckit", "check"]);
        assert_eq!(cli.manifest, PathBuf::from(DEFAULT_MANIFEST_FILE));
        assert!(matches!(cli.command, Commands::Check));
    }
}
