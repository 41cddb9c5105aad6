//! JSON report generation

use anyhow::Result;

use crate::aggregator::SubtaskVerdicts;
use crate::generator::GenerationResult;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report of subtask verdicts, keyed by subtask id
    pub fn generate(verdicts: &SubtaskVerdicts) -> Result<String> {
        let json = serde_json::to_string_pretty(verdicts)?;
        Ok(json)
    }

    /// Generate a compact JSON report (no pretty printing)
    pub fn generate_compact(verdicts: &SubtaskVerdicts) -> Result<String> {
        let json = serde_json::to_string(verdicts)?;
        Ok(json)
    }

    /// Generate a JSON report of a generation run
    pub fn generate_generation(result: &GenerationResult) -> Result<String> {
        let json = serde_json::to_string_pretty(result)?;
        Ok(json)
    }
}
