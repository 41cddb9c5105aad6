//! Constraint and subtask definitions
//!
//! A problem definition supplies these as plain data: an ordered list of
//! global constraints plus an ordered list of numbered subtasks, each an
//! ordered list of labeled predicates over the test-case bindings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::io::Bindings;

/// Identifier of a subtask
///
/// `Global` is the sentinel for constraints that apply to every test case;
/// it is rendered as `-1` in machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubtaskId {
    Global,
    Numbered(u32),
}

impl SubtaskId {
    const GLOBAL_CODE: i64 = -1;

    pub fn code(&self) -> i64 {
        match self {
            SubtaskId::Global => Self::GLOBAL_CODE,
            SubtaskId::Numbered(n) => i64::from(*n),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::GLOBAL_CODE => Some(SubtaskId::Global),
            n => u32::try_from(n).ok().filter(|n| *n > 0).map(SubtaskId::Numbered),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, SubtaskId::Global)
    }
}

impl From<u32> for SubtaskId {
    fn from(n: u32) -> Self {
        SubtaskId::Numbered(n)
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for SubtaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for SubtaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        SubtaskId::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid subtask id {}, expected -1 or a positive integer", code))
        })
    }
}

type PredicateFn = Arc<dyn Fn(&Bindings) -> bool + Send + Sync>;

/// A labeled boolean check over test-case bindings
#[derive(Clone)]
pub struct Constraint {
    description: String,
    predicate: PredicateFn,
}

impl Constraint {
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&Bindings) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_satisfied_by(&self, bindings: &Bindings) -> bool {
        (self.predicate)(bindings)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A numbered group of constraints
#[derive(Debug, Clone)]
pub struct Subtask {
    id: SubtaskId,
    constraints: Vec<Constraint>,
}

impl Subtask {
    pub fn new(id: u32) -> Self {
        Self {
            id: SubtaskId::Numbered(id),
            constraints: Vec::new(),
        }
    }

    /// Append a constraint
    pub fn constraint(
        mut self,
        description: impl Into<String>,
        predicate: impl Fn(&Bindings) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.constraints.push(Constraint::new(description, predicate));
        self
    }

    pub fn id(&self) -> SubtaskId {
        self.id
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// All constraints of a problem, immutable once built
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    global: Vec<Constraint>,
    subtasks: Vec<Subtask>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint that every test case must satisfy
    pub fn global(
        mut self,
        description: impl Into<String>,
        predicate: impl Fn(&Bindings) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.global.push(Constraint::new(description, predicate));
        self
    }

    /// Append a subtask
    pub fn subtask(mut self, subtask: Subtask) -> Self {
        self.subtasks.push(subtask);
        self
    }

    pub fn global_constraints(&self) -> &[Constraint] {
        &self.global
    }

    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// Subtasks that receive a verdict; `[Global]` when none are declared
    pub fn scored_subtask_ids(&self) -> Vec<SubtaskId> {
        if self.subtasks.is_empty() {
            vec![SubtaskId::Global]
        } else {
            self.subtasks.iter().map(Subtask::id).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtask_id_order_and_codes() {
        assert!(SubtaskId::Global < SubtaskId::Numbered(1));
        assert!(SubtaskId::Numbered(1) < SubtaskId::Numbered(2));
        assert_eq!(SubtaskId::Global.to_string(), "-1");
        assert_eq!(SubtaskId::from_code(3), Some(SubtaskId::Numbered(3)));
        assert_eq!(SubtaskId::from_code(0), None);
        assert_eq!(SubtaskId::from_code(-1), Some(SubtaskId::Global));
    }

    #[test]
    fn test_subtask_id_serde() {
        let ids = vec![SubtaskId::Global, SubtaskId::Numbered(2)];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, "[-1,2]");

        let parsed: Vec<SubtaskId> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ids);
        assert!(serde_json::from_str::<SubtaskId>("-5").is_err());
    }

    #[test]
    fn test_scored_subtask_ids() {
        let set = ConstraintSet::new().global("1 <= N", |b| b.int("N").is_some_and(|n| n >= 1));
        assert_eq!(set.scored_subtask_ids(), vec![SubtaskId::Global]);

        let set = set.subtask(Subtask::new(1)).subtask(Subtask::new(2));
        assert_eq!(
            set.scored_subtask_ids(),
            vec![SubtaskId::Numbered(1), SubtaskId::Numbered(2)]
        );
    }
}
