//! Grading and generation configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use tckit_core::ProblemManifest;

use crate::diff::DEFAULT_MAX_DIFF_LINES;

/// Configuration for grading a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Problem slug
    pub slug: String,

    /// Shell command running the submission
    pub submission_command: String,

    /// Directory holding the recorded `.in` / `.out` files
    pub test_cases_dir: PathBuf,

    /// CPU time limit in seconds
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,

    /// Memory limit in megabytes
    #[serde(default = "default_memory_limit")]
    pub memory_limit_mb: u64,

    /// Maximum number of rendered diff lines per wrong answer
    #[serde(default = "default_diff_lines")]
    pub max_diff_lines: usize,

    /// Directory for per-test-case artifacts (a temporary one if unset)
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_time_limit() -> u64 {
    2
}

fn default_memory_limit() -> u64 {
    64
}

fn default_diff_lines() -> usize {
    DEFAULT_MAX_DIFF_LINES
}

impl GraderConfig {
    pub fn new(
        slug: impl Into<String>,
        submission_command: impl Into<String>,
        test_cases_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            slug: slug.into(),
            submission_command: submission_command.into(),
            test_cases_dir: test_cases_dir.into(),
            time_limit_secs: default_time_limit(),
            memory_limit_mb: default_memory_limit(),
            max_diff_lines: default_diff_lines(),
            scratch_dir: None,
        }
    }

    /// Take slug, directory and limits from a problem manifest
    pub fn from_manifest(manifest: &ProblemManifest, submission_command: impl Into<String>) -> Self {
        Self::new(
            manifest.slug.clone(),
            submission_command,
            manifest.test_cases_dir.clone(),
        )
        .with_time_limit(manifest.time_limit_secs)
        .with_memory_limit(manifest.memory_limit_mb)
    }

    pub fn with_time_limit(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_memory_limit(mut self, mb: u64) -> Self {
        self.memory_limit_mb = mb;
        self
    }

    pub fn with_max_diff_lines(mut self, lines: usize) -> Self {
        self.max_diff_lines = lines;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn memory_limit_bytes(&self) -> u64 {
        self.memory_limit_mb.saturating_mul(1024 * 1024)
    }
}

/// Configuration for generating test-case files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Problem slug
    pub slug: String,

    /// Shell command running the reference solution
    pub solution_command: String,

    /// Output directory for `.in` / `.out` files
    pub test_cases_dir: PathBuf,
}

impl GeneratorConfig {
    pub fn new(
        slug: impl Into<String>,
        solution_command: impl Into<String>,
        test_cases_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            slug: slug.into(),
            solution_command: solution_command.into(),
            test_cases_dir: test_cases_dir.into(),
        }
    }
}
