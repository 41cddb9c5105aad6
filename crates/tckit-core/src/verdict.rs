//! Grading verdicts
//!
//! Verdict kinds are totally ordered by severity:
//! `Accepted < WrongAnswer < RuntimeError < TimeLimitExceeded`.
//! `Unknown` marks a clean execution that has not been scored yet and sorts
//! below `Accepted`, so it never dominates an aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict classification, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    Unknown,
    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
}

impl VerdictKind {
    /// Short code used in porcelain output
    pub fn code(&self) -> &'static str {
        match self {
            VerdictKind::Unknown => "??",
            VerdictKind::Accepted => "AC",
            VerdictKind::WrongAnswer => "WA",
            VerdictKind::RuntimeError => "RTE",
            VerdictKind::TimeLimitExceeded => "TLE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VerdictKind::Unknown => "Unknown",
            VerdictKind::Accepted => "Accepted",
            VerdictKind::WrongAnswer => "Wrong Answer",
            VerdictKind::RuntimeError => "Runtime Error",
            VerdictKind::TimeLimitExceeded => "Time Limit Exceeded",
        }
    }
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One diagnostic line, with an indentation level for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    pub level: usize,
}

impl Failure {
    pub fn new(message: impl Into<String>, level: usize) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Outcome of grading a test case or a subtask
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
}

impl Verdict {
    fn of(kind: VerdictKind, failures: Vec<Failure>) -> Self {
        Self { kind, failures }
    }

    pub fn accepted() -> Self {
        Self::of(VerdictKind::Accepted, Vec::new())
    }

    pub fn wrong_answer(failures: Vec<Failure>) -> Self {
        Self::of(VerdictKind::WrongAnswer, failures)
    }

    pub fn runtime_error(failures: Vec<Failure>) -> Self {
        Self::of(VerdictKind::RuntimeError, failures)
    }

    pub fn time_limit_exceeded() -> Self {
        Self::of(VerdictKind::TimeLimitExceeded, Vec::new())
    }

    pub fn unknown() -> Self {
        Self::of(VerdictKind::Unknown, Vec::new())
    }

    pub fn is_accepted(&self) -> bool {
        self.kind == VerdictKind::Accepted
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == VerdictKind::Unknown
    }

    /// The more severe of two verdicts; on equal severity `self` is kept
    pub fn join(self, other: Verdict) -> Verdict {
        if other.kind > self.kind { other } else { self }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(VerdictKind::Accepted < VerdictKind::WrongAnswer);
        assert!(VerdictKind::WrongAnswer < VerdictKind::RuntimeError);
        assert!(VerdictKind::RuntimeError < VerdictKind::TimeLimitExceeded);
        assert!(VerdictKind::Unknown < VerdictKind::Accepted);
    }

    #[test]
    fn test_join_keeps_more_severe() {
        let rte = Verdict::runtime_error(vec![Failure::new("Exit code: 1", 1)]);
        assert_eq!(Verdict::accepted().join(rte.clone()), rte);
        assert_eq!(rte.clone().join(Verdict::wrong_answer(vec![])), rte);
        assert_eq!(
            Verdict::time_limit_exceeded().join(rte).kind,
            VerdictKind::TimeLimitExceeded
        );
    }

    #[test]
    fn test_join_is_order_independent() {
        let verdicts = [
            Verdict::wrong_answer(vec![]),
            Verdict::accepted(),
            Verdict::runtime_error(vec![]),
            Verdict::accepted(),
        ];

        let forward = verdicts
            .iter()
            .cloned()
            .fold(Verdict::accepted(), Verdict::join);
        let backward = verdicts
            .iter()
            .rev()
            .cloned()
            .fold(Verdict::accepted(), Verdict::join);

        assert_eq!(forward.kind, VerdictKind::RuntimeError);
        assert_eq!(forward.kind, backward.kind);
        assert_eq!(forward.clone().join(forward.clone()), forward);
    }

    #[test]
    fn test_codes() {
        assert_eq!(VerdictKind::Accepted.code(), "AC");
        assert_eq!(VerdictKind::TimeLimitExceeded.code(), "TLE");
        assert_eq!(Verdict::wrong_answer(vec![]).to_string(), "Wrong Answer");
    }
}
