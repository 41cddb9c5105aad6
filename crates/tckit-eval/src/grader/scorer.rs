//! Output scoring

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use tckit_core::{Failure, Verdict};

use crate::diff::DiffTool;

/// Compares a submission's output with the recorded expected output
pub struct Scorer {
    diff: Box<dyn DiffTool>,
}

impl Scorer {
    pub fn new(diff: Box<dyn DiffTool>) -> Self {
        Self { diff }
    }

    /// Byte equality first; the diff tool only runs on a mismatch
    pub async fn score(&self, expected: &Path, received: &Path) -> Result<Verdict> {
        let expected_bytes = tokio::fs::read(expected)
            .await
            .with_context(|| format!("Failed to read expected output: {:?}", expected))?;
        let received_bytes = tokio::fs::read(received)
            .await
            .with_context(|| format!("Failed to read submission output: {:?}", received))?;

        if expected_bytes == received_bytes {
            return Ok(Verdict::accepted());
        }

        let report = self.diff.diff(expected, received).await?;
        if !report.differs {
            // bytes decide; the diff tool only renders
            warn!(
                "Diff tool found no difference between {:?} and {:?}, whose bytes differ",
                expected, received
            );
        }
        let rendering = if report.rendering.is_empty() {
            "(outputs differ byte-wise only)".to_string()
        } else {
            report.rendering
        };
        Ok(Verdict::wrong_answer(vec![Failure::new(format!("Diff:\n{}", rendering), 0)]))
    }
}
