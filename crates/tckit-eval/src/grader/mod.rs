//! Submission grading
//!
//! - [`Evaluator`]: runs the submission under limits and classifies how it
//!   terminated
//! - [`Scorer`]: compares a clean run's output with the expected output
//! - [`TestCaseSubmitter`] / [`Submitter`]: per-test-case flow and the loop
//!   over all test groups

mod evaluator;
mod scorer;
mod submitter;

pub use evaluator::{Evaluator, classify, classify_result};
pub use scorer::Scorer;
pub use submitter::{SUBMISSION_ERROR, SUBMISSION_OUTPUT, Submitter, TestCaseSubmitter};
