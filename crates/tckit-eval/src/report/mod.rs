//! Presentation of grading and generation results
//!
//! The grader and the generator never format human-facing text themselves;
//! they hand structured results to a reporter passed in by the caller.

mod json;
mod porcelain;
mod text;

pub use json::JsonReporter;
pub use porcelain::PorcelainReporter;
pub use text::TextReporter;

use tckit_core::{TestCase, Verdict};

use crate::aggregator::SubtaskVerdicts;
use crate::generator::{GenerationResult, MultipleTestCasesCombinationResult, TestCaseGenerationResult};

/// Receives every step of a submission run
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionReporter: Send {
    fn introduction(&mut self, _slug: &str) {}

    fn test_group_introduction(&mut self, _group_id: Option<u32>) {}

    fn test_case_introduction(&mut self, _test_case: &TestCase) {}

    /// Final verdict of one test case, with its diagnostics
    fn test_case_verdict(&mut self, _test_case: &TestCase, _verdict: &Verdict) {}

    /// Aggregated verdict of every subtask
    fn result(&mut self, verdicts: &SubtaskVerdicts);
}

/// Receives every step of a generation run
#[cfg_attr(test, mockall::automock)]
pub trait GenerationReporter: Send {
    fn introduction(&mut self) {}

    fn test_case_introduction(&mut self, _test_case: &TestCase) {}

    fn test_case_result(&mut self, result: &TestCaseGenerationResult);

    /// A group is about to be combined into the file named `base_name`
    fn multiple_test_cases_combination_introduction(&mut self, _base_name: &str) {}

    fn multiple_test_cases_combination_result(&mut self, _result: &MultipleTestCasesCombinationResult) {}

    fn result(&mut self, result: &GenerationResult);
}
