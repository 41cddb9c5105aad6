//! Machine-readable submission output: one `<subtask-id> <CODE>` line per
//! subtask, nothing else

use std::io::Write;
use tracing::warn;

use super::SubmissionReporter;
use crate::aggregator::SubtaskVerdicts;

pub struct PorcelainReporter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> PorcelainReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render subtask verdicts without writing them
    pub fn render(verdicts: &SubtaskVerdicts) -> String {
        verdicts
            .iter()
            .map(|(id, verdict)| format!("{} {}\n", id.code(), verdict.kind.code()))
            .collect()
    }
}

impl<W: Write + Send> SubmissionReporter for PorcelainReporter<W> {
    fn result(&mut self, verdicts: &SubtaskVerdicts) {
        if let Err(e) = self.out.write_all(Self::render(verdicts).as_bytes()) {
            warn!("Failed to write porcelain result: {}", e);
        }
    }
}
