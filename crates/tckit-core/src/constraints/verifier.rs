//! Constraint verification of a single test case
//!
//! Verification never fails fatally: every finding is recorded in a
//! [`VerificationResult`] so a batch can report all failing test cases.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::subtask::{Constraint, ConstraintSet, SubtaskId};
use crate::io::Bindings;

/// Outcome of verifying one test case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Unsatisfied constraint descriptions, in declaration order, per subtask
    unsatisfied: BTreeMap<SubtaskId, Vec<String>>,
    /// Subtasks the data satisfies although the test case does not claim them
    satisfied_but_not_assigned: BTreeSet<SubtaskId>,
    /// Subtasks the test case is assigned to
    assigned: BTreeSet<SubtaskId>,
}

impl VerificationResult {
    /// No constraint of the global set or any claimed subtask failed
    pub fn is_satisfied(&self) -> bool {
        self.unsatisfied.is_empty()
    }

    /// Satisfied, and every satisfied subtask is claimed
    pub fn is_consistent(&self) -> bool {
        self.is_satisfied() && self.satisfied_but_not_assigned.is_empty()
    }

    pub fn unsatisfied_constraint_descriptions_by_subtask_id(&self) -> &BTreeMap<SubtaskId, Vec<String>> {
        &self.unsatisfied
    }

    pub fn satisfied_but_not_assigned_subtask_ids(&self) -> &BTreeSet<SubtaskId> {
        &self.satisfied_but_not_assigned
    }

    pub fn assigned_subtask_ids(&self) -> &BTreeSet<SubtaskId> {
        &self.assigned
    }
}

/// Outcome of verifying the test-case count of a combined file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultipleTestCasesVerificationResult {
    unsatisfied: Vec<String>,
}

impl MultipleTestCasesVerificationResult {
    pub fn is_satisfied(&self) -> bool {
        self.unsatisfied.is_empty()
    }

    pub fn unsatisfied_constraint_descriptions(&self) -> &[String] {
        &self.unsatisfied
    }
}

/// Evaluates test-case bindings against a problem's constraints
#[derive(Debug, Clone)]
pub struct ConstraintsVerifier {
    constraints: ConstraintSet,
}

impl ConstraintsVerifier {
    pub fn new(constraints: ConstraintSet) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Verify `bindings` for a test case claiming `claimed` subtasks.
    ///
    /// An empty claim on a problem without numbered subtasks assigns the
    /// test case to the global subtask.
    pub fn verify(&self, bindings: &Bindings, claimed: &BTreeSet<SubtaskId>) -> VerificationResult {
        let mut result = VerificationResult::default();

        let global_failures = unsatisfied(self.constraints.global_constraints(), bindings);
        if !global_failures.is_empty() {
            result.unsatisfied.insert(SubtaskId::Global, global_failures);
        }

        if !self.constraints.has_subtasks() {
            result.assigned.insert(SubtaskId::Global);
            return result;
        }

        for subtask in self.constraints.subtasks() {
            let failures = unsatisfied(subtask.constraints(), bindings);
            if claimed.contains(&subtask.id()) {
                result.assigned.insert(subtask.id());
                if !failures.is_empty() {
                    result.unsatisfied.insert(subtask.id(), failures);
                }
            } else if failures.is_empty() {
                result.satisfied_but_not_assigned.insert(subtask.id());
            }
        }

        if !result.is_consistent() {
            tracing::debug!(
                unsatisfied = result.unsatisfied.len(),
                unassigned = result.satisfied_but_not_assigned.len(),
                "test case failed constraint verification"
            );
        }

        result
    }

    /// Verify the bindings of a combined file, typically just the test-case
    /// count. Only global constraints apply; subtasks are ignored.
    pub fn verify_multiple_test_cases(&self, bindings: &Bindings) -> MultipleTestCasesVerificationResult {
        MultipleTestCasesVerificationResult {
            unsatisfied: unsatisfied(self.constraints.global_constraints(), bindings),
        }
    }
}

fn unsatisfied(constraints: &[Constraint], bindings: &Bindings) -> Vec<String> {
    constraints
        .iter()
        .filter(|c| !c.is_satisfied_by(bindings))
        .map(|c| c.description().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Subtask;

    fn n_between(lo: i64, hi: i64) -> impl Fn(&Bindings) -> bool + Send + Sync + 'static {
        move |b| b.int("N").is_some_and(|n| lo <= n && n <= hi)
    }

    fn verifier() -> ConstraintsVerifier {
        ConstraintsVerifier::new(
            ConstraintSet::new()
                .global("N is bound", |b| b.int("N").is_some())
                .subtask(
                    Subtask::new(1)
                        .constraint("1 <= N <= 10", n_between(1, 10))
                        .constraint("N is even", |b| b.int("N").is_some_and(|n| n % 2 == 0)),
                )
                .subtask(Subtask::new(2).constraint("1 <= N <= 1000", n_between(1, 1000))),
        )
    }

    fn ids(ids: &[u32]) -> BTreeSet<SubtaskId> {
        ids.iter().copied().map(SubtaskId::Numbered).collect()
    }

    #[test]
    fn test_all_claimed_and_satisfied() {
        let result = verifier().verify(&Bindings::new().with("N", 4), &ids(&[1, 2]));
        assert!(result.is_consistent());
        assert_eq!(result.assigned_subtask_ids(), &ids(&[1, 2]));
    }

    #[test]
    fn test_unsatisfied_in_declaration_order() {
        let result = verifier().verify(&Bindings::new().with("N", 11), &ids(&[1, 2]));
        assert!(!result.is_satisfied());
        assert_eq!(
            result.unsatisfied_constraint_descriptions_by_subtask_id()[&SubtaskId::Numbered(1)],
            vec!["1 <= N <= 10".to_string(), "N is even".to_string()]
        );
        assert!(
            !result
                .unsatisfied_constraint_descriptions_by_subtask_id()
                .contains_key(&SubtaskId::Numbered(2))
        );
    }

    #[test]
    fn test_satisfied_but_not_assigned() {
        let result = verifier().verify(&Bindings::new().with("N", 4), &ids(&[2]));
        assert!(result.is_satisfied());
        assert!(!result.is_consistent());
        assert_eq!(result.satisfied_but_not_assigned_subtask_ids(), &ids(&[1]));
    }

    #[test]
    fn test_unclaimed_unsatisfied_subtask_is_not_reported() {
        let result = verifier().verify(&Bindings::new().with("N", 500), &ids(&[2]));
        assert!(result.is_consistent());
        assert!(result.unsatisfied_constraint_descriptions_by_subtask_id().is_empty());
    }

    #[test]
    fn test_global_failures_reported_regardless_of_claims() {
        let result = verifier().verify(&Bindings::new(), &BTreeSet::new());
        assert_eq!(
            result.unsatisfied_constraint_descriptions_by_subtask_id()[&SubtaskId::Global],
            vec!["N is bound".to_string()]
        );
    }

    #[test]
    fn test_problem_without_subtasks_assigns_global() {
        let verifier = ConstraintsVerifier::new(
            ConstraintSet::new().global("1 <= N <= 10", n_between(1, 10)),
        );
        let result = verifier.verify(&Bindings::new().with("N", 3), &BTreeSet::new());
        assert!(result.is_consistent());
        assert_eq!(
            result.assigned_subtask_ids(),
            &BTreeSet::from([SubtaskId::Global])
        );
    }

    #[test]
    fn test_multiple_test_cases_checks_global_constraints_only() {
        let verifier = ConstraintsVerifier::new(
            ConstraintSet::new()
                .global("1 <= T <= 3", |b| b.int("T").is_some_and(|t| (1..=3).contains(&t)))
                .global("T is odd", |b| b.int("T").is_some_and(|t| t % 2 == 1))
                .subtask(Subtask::new(1).constraint("never", |_| false)),
        );

        assert!(verifier.verify_multiple_test_cases(&Bindings::new().with("T", 3)).is_satisfied());

        let result = verifier.verify_multiple_test_cases(&Bindings::new().with("T", 4));
        assert!(!result.is_satisfied());
        assert_eq!(
            result.unsatisfied_constraint_descriptions(),
            ["1 <= T <= 3".to_string(), "T is odd".to_string()]
        );
    }
}
