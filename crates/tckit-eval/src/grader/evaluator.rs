//! Submission execution and outcome classification

use std::path::Path;
use std::sync::Arc;

use tckit_core::{Failure, TestCase, Verdict};

use crate::config::GraderConfig;
use crate::os::{CPU_LIMIT_SIGNAL, ExecutionRequest, ExecutionResult, OperatingSystem, OsError, describe_signal};

const EXECUTION_FAILED: &str = "Execution of submission failed:";

/// Classify a raw termination.
///
/// Exit code 0 yields `Unknown` (clean, not scored yet). The CPU-limit signal
/// yields `TimeLimitExceeded`; any other signal or a nonzero exit code yields
/// `RuntimeError` with diagnostics.
pub fn classify(exit_code: Option<i32>, signal: Option<i32>, stderr: &str) -> Verdict {
    if let Some(signal) = signal {
        if signal == CPU_LIMIT_SIGNAL {
            return Verdict::time_limit_exceeded();
        }
        return Verdict::runtime_error(vec![
            Failure::new(EXECUTION_FAILED, 0),
            Failure::new(describe_signal(signal), 1),
        ]);
    }

    match exit_code {
        Some(0) => Verdict::unknown(),
        Some(code) => Verdict::runtime_error(vec![
            Failure::new(EXECUTION_FAILED, 0),
            Failure::new(format!("Exit code: {}", code), 1),
            Failure::new(format!("Standard error: {}", stderr), 1),
        ]),
        None => Verdict::runtime_error(vec![
            Failure::new(EXECUTION_FAILED, 0),
            Failure::new("Process reported neither exit code nor signal", 1),
        ]),
    }
}

/// Classify an [`ExecutionResult`]
pub fn classify_result(result: &ExecutionResult) -> Verdict {
    classify(result.outcome.exit_code(), result.outcome.signal(), &result.stderr)
}

/// Runs a submission on one test case under the configured limits
pub struct Evaluator {
    os: Arc<dyn OperatingSystem>,
}

impl Evaluator {
    pub fn new(os: Arc<dyn OperatingSystem>) -> Self {
        Self { os }
    }

    /// Execute the submission with stdin bound to the test case input.
    ///
    /// Returns `Unknown` for a clean exit; scoring decides the final verdict.
    pub async fn evaluate(
        &self,
        test_case: &TestCase,
        config: &GraderConfig,
        submission_output: &Path,
        submission_error: &Path,
    ) -> Result<Verdict, OsError> {
        let request = ExecutionRequest::new(
            format!("{}-submission-evaluation", test_case.name),
            config.submission_command.clone(),
        )
        .stdin(test_case.input_path(&config.test_cases_dir))
        .stdout(submission_output)
        .stderr(submission_error);

        self.os.limit_execution_time(config.time_limit_secs);
        self.os.limit_execution_memory(config.memory_limit_bytes());
        let result = self.os.execute(&request).await;
        self.os.limit_execution_time(0);
        self.os.limit_execution_memory(0);

        Ok(classify_result(&result?))
    }
}
