//! Output comparison
//!
//! The grader depends only on the [`DiffTool`] contract: a bounded,
//! human-readable rendering of line differences plus a "files differ" flag.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// Default number of rendered diff lines
pub const DEFAULT_MAX_DIFF_LINES: usize = 10;

/// Result of comparing two files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub differs: bool,
    pub rendering: String,
}

/// Compares an expected file with a received file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiffTool: Send + Sync {
    async fn diff(&self, expected: &Path, received: &Path) -> Result<DiffReport>;
}

/// Line-aligned comparison: line `i` of one file is compared with line `i`
/// of the other, and only differing positions are rendered
#[derive(Debug, Clone)]
pub struct LineDiff {
    max_lines: usize,
}

impl Default for LineDiff {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIFF_LINES)
    }
}

impl LineDiff {
    pub fn new(max_lines: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
        }
    }

    /// Render the differences between two byte buffers
    pub fn render(&self, expected: &[u8], received: &[u8]) -> DiffReport {
        if expected == received {
            return DiffReport {
                differs: false,
                rendering: String::new(),
            };
        }

        let expected: Vec<&[u8]> = expected.split_inclusive(|b| *b == b'\n').collect();
        let received: Vec<&[u8]> = received.split_inclusive(|b| *b == b'\n').collect();

        let mut lines = Vec::new();
        let mut omitted = 0usize;
        for index in 0..expected.len().max(received.len()) {
            let (e, r) = (expected.get(index), received.get(index));
            if e == r {
                continue;
            }
            for (tag, line) in [("expected", e), ("received", r)] {
                let Some(line) = line else { continue };
                if lines.len() < self.max_lines {
                    lines.push(format!("({}) [line {:02}]    {}", tag, index + 1, display_line(line)));
                } else {
                    omitted += 1;
                }
            }
        }

        if omitted > 0 {
            lines.push(format!("... ({} more lines)", omitted));
        }

        DiffReport {
            differs: true,
            rendering: lines.join("\n"),
        }
    }
}

fn display_line(line: &[u8]) -> String {
    let text = String::from_utf8_lossy(line);
    match text.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => format!("{} (no newline at end of file)", text),
    }
}

#[async_trait]
impl DiffTool for LineDiff {
    async fn diff(&self, expected: &Path, received: &Path) -> Result<DiffReport> {
        let expected_bytes = tokio::fs::read(expected)
            .await
            .with_context(|| format!("Failed to read expected output: {:?}", expected))?;
        let received_bytes = tokio::fs::read(received)
            .await
            .with_context(|| format!("Failed to read received output: {:?}", received))?;

        Ok(self.render(&expected_bytes, &received_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identical_outputs() {
        let report = LineDiff::default().render(b"1\n2\n", b"1\n2\n");
        assert!(!report.differs);
        assert!(report.rendering.is_empty());
    }

    #[test]
    fn test_single_line_difference() {
        let report = LineDiff::default().render(b"1\n2\n3\n", b"1\n5\n3\n");
        assert!(report.differs);
        assert_eq!(
            report.rendering,
            "(expected) [line 02]    2\n(received) [line 02]    5"
        );
    }

    #[test]
    fn test_missing_and_extra_lines() {
        let report = LineDiff::default().render(b"1\n2\n", b"1\n");
        assert_eq!(report.rendering, "(expected) [line 02]    2");

        let report = LineDiff::default().render(b"1\n", b"1\n2\n");
        assert_eq!(report.rendering, "(received) [line 02]    2");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let report = LineDiff::default().render(b"7\n", b"7");
        assert_eq!(
            report.rendering,
            "(expected) [line 01]    7\n(received) [line 01]    7 (no newline at end of file)"
        );
    }

    #[test]
    fn test_rendering_is_bounded() {
        let expected: String = (0..20).map(|i| format!("{}\n", i)).collect();
        let received: String = (0..20).map(|i| format!("{}\n", i + 100)).collect();

        let report = LineDiff::new(4).render(expected.as_bytes(), received.as_bytes());
        let lines: Vec<&str> = report.rendering.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "(expected) [line 01]    0");
        assert_eq!(lines[3], "(received) [line 02]    101");
        assert_eq!(lines[4], "... (36 more lines)");
    }

    #[tokio::test]
    async fn test_diff_files() {
        let temp_dir = TempDir::new().unwrap();
        let expected = temp_dir.path().join("expected.out");
        let received = temp_dir.path().join("received.out");
        tokio::fs::write(&expected, "42\n").await.unwrap();
        tokio::fs::write(&received, "43\n").await.unwrap();

        let report = LineDiff::default().diff(&expected, &received).await.unwrap();
        assert!(report.differs);
        assert!(report.rendering.contains("(received) [line 01]    43"));

        let missing = temp_dir.path().join("missing.out");
        assert!(LineDiff::default().diff(&expected, &missing).await.is_err());
    }
}
