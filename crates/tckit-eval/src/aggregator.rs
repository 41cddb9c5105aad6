//! Per-subtask verdict aggregation
//!
//! Every declared subtask starts at `Accepted`. Each finalized test-case
//! verdict is joined into every subtask the test case is assigned to, keeping
//! the more severe kind. The join is commutative, associative and idempotent,
//! so the result does not depend on grading order.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use tckit_core::{SubtaskId, Verdict, VerdictKind};

/// Aggregated verdict of every declared subtask
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubtaskVerdicts {
    verdicts: BTreeMap<SubtaskId, Verdict>,
}

impl SubtaskVerdicts {
    /// Initialize every declared subtask to `Accepted`
    pub fn new(subtask_ids: impl IntoIterator<Item = SubtaskId>) -> Self {
        Self {
            verdicts: subtask_ids
                .into_iter()
                .map(|id| (id, Verdict::accepted()))
                .collect(),
        }
    }

    /// Join a test-case verdict into the subtasks it is assigned to
    pub fn record<'a>(&mut self, subtask_ids: impl IntoIterator<Item = &'a SubtaskId>, verdict: &Verdict) {
        if verdict.is_unknown() {
            warn!("Ignoring unscored verdict during aggregation");
            return;
        }

        for id in subtask_ids {
            match self.verdicts.get_mut(id) {
                Some(current) => {
                    let joined = std::mem::replace(current, Verdict::accepted())
                        .join(Verdict {
                            kind: verdict.kind,
                            failures: Vec::new(),
                        });
                    *current = joined;
                }
                None => warn!("Test case assigned to undeclared subtask {}", id),
            }
        }
    }

    pub fn get(&self, id: SubtaskId) -> Option<&Verdict> {
        self.verdicts.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubtaskId, &Verdict)> {
        self.verdicts.iter()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Most severe kind over all subtasks
    pub fn overall(&self) -> VerdictKind {
        self.verdicts
            .values()
            .map(|v| v.kind)
            .max()
            .unwrap_or(VerdictKind::Accepted)
    }

    /// Whether every subtask is accepted
    pub fn all_accepted(&self) -> bool {
        self.verdicts.values().all(Verdict::is_accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tckit_core::Failure;

    fn ids(ids: &[u32]) -> Vec<SubtaskId> {
        ids.iter().copied().map(SubtaskId::Numbered).collect()
    }

    #[test]
    fn test_initialized_to_accepted() {
        let verdicts = SubtaskVerdicts::new(ids(&[1, 2, 3]));
        assert_eq!(verdicts.len(), 3);
        assert!(verdicts.all_accepted());
        assert_eq!(verdicts.overall(), VerdictKind::Accepted);
    }

    #[test]
    fn test_subtask_takes_most_severe_verdict() {
        let mut verdicts = SubtaskVerdicts::new(ids(&[1, 2]));
        verdicts.record(&ids(&[2]), &Verdict::accepted());
        verdicts.record(
            &ids(&[2]),
            &Verdict::runtime_error(vec![Failure::new("Exit code: 1", 1)]),
        );

        assert_eq!(
            verdicts.get(SubtaskId::Numbered(2)).unwrap().kind,
            VerdictKind::RuntimeError
        );
        assert!(verdicts.get(SubtaskId::Numbered(2)).unwrap().failures.is_empty());
        assert_eq!(verdicts.get(SubtaskId::Numbered(1)), Some(&Verdict::accepted()));
        assert_eq!(verdicts.overall(), VerdictKind::RuntimeError);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let per_test = [
            (ids(&[1, 2]), Verdict::wrong_answer(vec![])),
            (ids(&[2]), Verdict::time_limit_exceeded()),
            (ids(&[1]), Verdict::accepted()),
            (ids(&[1, 2]), Verdict::runtime_error(vec![])),
        ];

        let mut forward = SubtaskVerdicts::new(ids(&[1, 2, 3]));
        for (subtasks, verdict) in &per_test {
            forward.record(subtasks, verdict);
        }

        let mut backward = SubtaskVerdicts::new(ids(&[1, 2, 3]));
        for (subtasks, verdict) in per_test.iter().rev() {
            backward.record(subtasks, verdict);
        }
        assert_eq!(forward, backward);

        let snapshot = forward.clone();
        for (subtasks, verdict) in &per_test {
            forward.record(subtasks, verdict);
        }
        assert_eq!(forward, snapshot);

        assert_eq!(forward.get(SubtaskId::Numbered(1)).unwrap().kind, VerdictKind::RuntimeError);
        assert_eq!(
            forward.get(SubtaskId::Numbered(2)).unwrap().kind,
            VerdictKind::TimeLimitExceeded
        );
        assert!(forward.get(SubtaskId::Numbered(3)).unwrap().is_accepted());
    }

    #[test]
    fn test_unknown_and_undeclared_are_ignored() {
        let mut verdicts = SubtaskVerdicts::new(ids(&[1]));
        verdicts.record(&ids(&[1]), &Verdict::unknown());
        verdicts.record(&ids(&[9]), &Verdict::wrong_answer(vec![]));

        assert_eq!(verdicts.len(), 1);
        assert!(verdicts.all_accepted());
    }

    #[test]
    fn test_serializes_by_subtask_code() {
        let mut verdicts = SubtaskVerdicts::new([SubtaskId::Global]);
        verdicts.record(&[SubtaskId::Global], &Verdict::wrong_answer(vec![]));
        let json = serde_json::to_string(&verdicts).unwrap();
        assert_eq!(json, r#"{"-1":{"kind":"wrong_answer"}}"#);
    }
}
