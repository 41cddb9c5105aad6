//! tckit grading and generation
//!
//! Runs programs against test-case files and turns the outcomes into
//! verdicts.
//!
//! # Features
//!
//! - **Grading**: execute a submission under CPU-time and memory limits,
//!   classify abnormal termination, diff the output, and aggregate per-test
//!   verdicts into per-subtask verdicts
//! - **Generation**: verify declared test cases, write their input files and
//!   record the reference solution's output
//! - **Reports**: human-readable text, porcelain `<subtask> <CODE>` lines and
//!   JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tckit_eval::{Evaluator, GraderConfig, LineDiff, Scorer, Submitter, TestCaseSubmitter, TextReporter};
//! use tckit_eval::os::UnixOperatingSystem;
//!
//! let os = Arc::new(UnixOperatingSystem::new());
//! let config = GraderConfig::from_manifest(&manifest, "./solution");
//! let submitter = Submitter::new(TestCaseSubmitter::new(
//!     Evaluator::new(os.clone()),
//!     Scorer::new(Box::new(LineDiff::default())),
//!     os,
//!     &config,
//! )?);
//! let verdicts = submitter
//!     .submit(&manifest.test_groups(), &manifest.scored_subtask_ids(), &config, &mut TextReporter::new(std::io::stdout()))
//!     .await;
//! ```

pub mod aggregator;
pub mod config;
pub mod diff;
pub mod generator;
pub mod grader;
pub mod os;
pub mod report;

// Re-exports for convenience
pub use aggregator::SubtaskVerdicts;
pub use config::{GeneratorConfig, GraderConfig};
pub use diff::{DiffReport, DiffTool, LineDiff};
pub use generator::{
    GenerationFailure, GenerationResult, Generator, MultipleTestCases, MultipleTestCasesCombinationResult,
    TestCaseGenerationResult,
};
pub use grader::{Evaluator, Scorer, Submitter, TestCaseSubmitter, classify};
pub use os::{ExecutionRequest, ExecutionResult, ExitOutcome, OperatingSystem, OsError};
pub use report::{GenerationReporter, JsonReporter, PorcelainReporter, SubmissionReporter, TextReporter};
