//! Human-readable text output

use colored::Colorize;
use std::fmt::Display;
use std::io::Write;
use tracing::warn;

use tckit_core::{SubtaskId, TestCase, Verdict, VerdictKind, VerificationResult};

use super::{GenerationReporter, SubmissionReporter};
use crate::aggregator::SubtaskVerdicts;
use crate::generator::{
    GenerationFailure, GenerationResult, MultipleTestCasesCombinationResult, TestCaseGenerationResult,
};
use crate::os::{ExecutionResult, describe_signal};

const INDENT: &str = "  ";

/// Writes progress and results as indented text
pub struct TextReporter<W: Write + Send> {
    out: W,
    color: bool,
}

impl<W: Write + Send> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    /// Color verdicts with ANSI escapes
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, level: usize, text: impl Display) {
        let text = text.to_string();
        let prefix = INDENT.repeat(level);
        for line in text.lines() {
            if let Err(e) = writeln!(self.out, "{}{}", prefix, line) {
                warn!("Failed to write report: {}", e);
                return;
            }
        }
        if text.is_empty() && writeln!(self.out).is_err() {
            warn!("Failed to write report");
        }
    }

    fn paint(&self, kind: VerdictKind) -> String {
        let name = kind.display_name();
        if !self.color {
            return name.to_string();
        }
        match kind {
            VerdictKind::Accepted => name.green().to_string(),
            VerdictKind::Unknown => name.yellow().to_string(),
            _ => name.red().to_string(),
        }
    }

    fn paint_status(&self, ok: bool) -> String {
        match (ok, self.color) {
            (true, true) => "OK".green().to_string(),
            (false, true) => "FAILED".red().to_string(),
            (true, false) => "OK".to_string(),
            (false, false) => "FAILED".to_string(),
        }
    }

    fn verification_failure(&mut self, result: &VerificationResult) {
        for (id, descriptions) in result.unsatisfied_constraint_descriptions_by_subtask_id() {
            match id {
                SubtaskId::Global => self.line(3, "* Does not satisfy constraints, on:"),
                SubtaskId::Numbered(n) => {
                    self.line(3, format!("* Does not satisfy subtask {}, on constraints:", n))
                }
            }
            for description in descriptions {
                self.line(4, format!("- {}", description));
            }
        }
        for id in result.satisfied_but_not_assigned_subtask_ids() {
            self.line(3, format!("* Satisfies subtask {} but is not assigned to it", id));
        }
    }

    fn generation_failure(&mut self, failure: &GenerationFailure) {
        match failure {
            GenerationFailure::ConstraintsVerification { result } => self.verification_failure(result),
            GenerationFailure::MultipleTestCasesConstraintsVerification { result } => {
                self.line(3, "* Does not satisfy constraints, on:");
                for description in result.unsatisfied_constraint_descriptions() {
                    self.line(4, format!("- {}", description));
                }
            }
            GenerationFailure::SolutionExecution { result } => self.solution_failure(result),
            GenerationFailure::Format { message, .. } | GenerationFailure::Io { message } => {
                self.line(3, format!("* {}", message))
            }
        }
    }

    fn solution_failure(&mut self, result: &ExecutionResult) {
        self.line(3, "* Execution of solution failed:");
        match (result.outcome.exit_code(), result.outcome.signal()) {
            (_, Some(signal)) => self.line(4, format!("- {}", describe_signal(signal))),
            (Some(code), None) => {
                self.line(4, format!("- Exit code: {}", code));
                self.line(4, format!("- Standard error: {}", result.stderr));
            }
            (None, None) => self.line(4, "- Process reported neither exit code nor signal"),
        }
    }
}

impl<W: Write + Send> SubmissionReporter for TextReporter<W> {
    fn introduction(&mut self, slug: &str) {
        self.line(0, format!("Submitting to {}...", slug));
    }

    fn test_group_introduction(&mut self, group_id: Option<u32>) {
        self.line(0, "");
        match group_id {
            Some(id) => self.line(0, format!("[ TEST GROUP {} ]", id)),
            None => self.line(0, "[ TEST CASES ]"),
        }
    }

    fn test_case_verdict(&mut self, test_case: &TestCase, verdict: &Verdict) {
        let kind = self.paint(verdict.kind);
        self.line(1, format!("{}: {}", test_case.name, kind));
        for failure in &verdict.failures {
            self.line(2 + failure.level, &failure.message);
        }
    }

    fn result(&mut self, verdicts: &SubtaskVerdicts) {
        self.line(0, "");
        self.line(0, "[ RESULT ]");
        let rows: Vec<(SubtaskId, VerdictKind)> = verdicts.iter().map(|(id, v)| (*id, v.kind)).collect();
        for (id, kind) in rows {
            let kind = self.paint(kind);
            match id {
                SubtaskId::Global => self.line(1, kind),
                SubtaskId::Numbered(n) => self.line(1, format!("Subtask {}: {}", n, kind)),
            }
        }
    }
}

impl<W: Write + Send> GenerationReporter for TextReporter<W> {
    fn introduction(&mut self) {
        self.line(0, "Generating test cases...");
    }

    fn test_case_result(&mut self, result: &TestCaseGenerationResult) {
        let status = self.paint_status(result.is_successful());
        self.line(1, format!("{}: {}", result.name, status));

        let Some(failure) = &result.failure else {
            return;
        };
        if let Some(description) = &result.description {
            self.line(2, format!("Description: {}", description));
        }
        self.line(2, "Reasons:");
        self.generation_failure(failure);
    }

    fn multiple_test_cases_combination_result(&mut self, result: &MultipleTestCasesCombinationResult) {
        let status = self.paint_status(result.is_successful());
        self.line(
            1,
            format!("Combining test cases into a single file ({}): {}", result.name, status),
        );

        let Some(failure) = &result.failure else {
            return;
        };
        self.line(2, "Reasons:");
        self.generation_failure(failure);
    }

    fn result(&mut self, result: &GenerationResult) {
        self.line(0, "");
        if result.is_successful() {
            self.line(0, "Generation finished. All test cases OK.");
        } else {
            self.line(0, "Generation finished. Some test cases FAILED.");
        }
    }
}
