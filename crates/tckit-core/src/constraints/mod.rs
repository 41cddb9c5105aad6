//! Constraint definitions and verification

mod subtask;
mod verifier;

pub use subtask::{Constraint, ConstraintSet, Subtask, SubtaskId};
pub use verifier::{ConstraintsVerifier, MultipleTestCasesVerificationResult, VerificationResult};
