//! Grading a submission against recorded test cases
//!
//! Each test case is graded to completion before the next one starts:
//! execute under limits, classify, score when the execution was clean, then
//! fold the verdict into the subtask verdicts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, error, info};

use tckit_core::{Failure, SubtaskId, TestCase, Verdict};

use super::{Evaluator, Scorer};
use crate::aggregator::SubtaskVerdicts;
use crate::config::GraderConfig;
use crate::os::OperatingSystem;
use crate::report::SubmissionReporter;

/// Captured submission output
pub const SUBMISSION_OUTPUT: &str = "_submission.out";
/// Captured submission standard error
pub const SUBMISSION_ERROR: &str = "_error.out";

/// Where per-test-case artifacts are written
enum Scratch {
    Temporary(TempDir),
    Fixed(PathBuf),
}

impl Scratch {
    fn path(&self) -> &Path {
        match self {
            Scratch::Temporary(dir) => dir.path(),
            Scratch::Fixed(path) => path,
        }
    }
}

/// Grades a submission on a single test case
pub struct TestCaseSubmitter {
    evaluator: Evaluator,
    scorer: Scorer,
    os: Arc<dyn OperatingSystem>,
    scratch: Scratch,
}

impl TestCaseSubmitter {
    /// Create a submitter whose artifacts live in `config.scratch_dir`, or in
    /// a temporary directory removed on drop
    pub fn new(evaluator: Evaluator, scorer: Scorer, os: Arc<dyn OperatingSystem>, config: &GraderConfig) -> Result<Self> {
        let scratch = match &config.scratch_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create scratch directory: {:?}", dir))?;
                Scratch::Fixed(dir.clone())
            }
            None => Scratch::Temporary(
                TempDir::with_prefix("tckit-").context("Failed to create scratch directory")?,
            ),
        };
        debug!("Grading artifacts in {:?}", scratch.path());

        Ok(Self {
            evaluator,
            scorer,
            os,
            scratch,
        })
    }

    pub fn submission_output(&self) -> PathBuf {
        self.scratch.path().join(SUBMISSION_OUTPUT)
    }

    pub fn submission_error(&self) -> PathBuf {
        self.scratch.path().join(SUBMISSION_ERROR)
    }

    /// Grade one test case. Never fails: infrastructure errors become a
    /// `RuntimeError` verdict.
    pub async fn submit(
        &self,
        test_case: &TestCase,
        config: &GraderConfig,
        reporter: &mut dyn SubmissionReporter,
    ) -> Verdict {
        reporter.test_case_introduction(test_case);

        self.remove_artifacts().await;
        let verdict = match self.grade(test_case, config).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("Grading {} failed: {:#}", test_case.name, e);
                Verdict::runtime_error(vec![
                    Failure::new("Grading failed:", 0),
                    Failure::new(format!("{:#}", e), 1),
                ])
            }
        };
        self.remove_artifacts().await;

        debug!("{}: {}", test_case.name, verdict);
        reporter.test_case_verdict(test_case, &verdict);
        verdict
    }

    async fn grade(&self, test_case: &TestCase, config: &GraderConfig) -> Result<Verdict> {
        let output = self.submission_output();
        let verdict = self
            .evaluator
            .evaluate(test_case, config, &output, &self.submission_error())
            .await?;
        if !verdict.is_unknown() {
            return Ok(verdict);
        }

        self.scorer
            .score(&test_case.output_path(&config.test_cases_dir), &output)
            .await
    }

    async fn remove_artifacts(&self) {
        self.os.remove_file(&self.submission_output()).await;
        self.os.remove_file(&self.submission_error()).await;
    }
}

/// Grades a submission on every recorded test case and aggregates the verdicts
pub struct Submitter {
    test_case_submitter: TestCaseSubmitter,
}

impl Submitter {
    pub fn new(test_case_submitter: TestCaseSubmitter) -> Self {
        Self { test_case_submitter }
    }

    /// Grade test groups in order. Every declared subtask starts `Accepted`.
    pub async fn submit(
        &self,
        groups: &[(Option<u32>, Vec<TestCase>)],
        subtask_ids: &[SubtaskId],
        config: &GraderConfig,
        reporter: &mut dyn SubmissionReporter,
    ) -> SubtaskVerdicts {
        reporter.introduction(&config.slug);
        info!(
            "Grading '{}' on {} test cases",
            config.submission_command,
            groups.iter().map(|(_, cases)| cases.len()).sum::<usize>()
        );

        let mut verdicts = SubtaskVerdicts::new(subtask_ids.iter().copied());
        for (group_id, test_cases) in groups {
            reporter.test_group_introduction(*group_id);
            for test_case in test_cases {
                let verdict = self.test_case_submitter.submit(test_case, config, reporter).await;
                verdicts.record(&test_case.subtask_ids, &verdict);
            }
        }

        info!("Grading finished: {}", verdicts.overall());
        reporter.result(&verdicts);
        verdicts
    }
}
