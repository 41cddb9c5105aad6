//! Problem manifest
//!
//! The manifest is the persisted description of a problem's recorded test
//! data: slug, limits, subtasks and test groups. It is loaded from TOML, YAML
//! or JSON depending on the file extension.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constraints::SubtaskId;
use crate::error::ConfigError;
use crate::testcase::{TestCase, test_case_base_name, test_case_name};

/// A test group as recorded in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestGroup {
    /// Group id; omitted for test cases outside any group
    #[serde(default)]
    pub id: Option<u32>,

    /// Subtasks every test case of this group is assigned to
    #[serde(default)]
    pub subtasks: Vec<u32>,

    /// Number of test cases in the group
    pub test_cases: usize,
}

/// Problem manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemManifest {
    /// Problem slug, prefix of every test-case file name
    #[serde(default = "default_slug")]
    pub slug: String,

    /// Directory holding `.in` / `.out` files, relative to the manifest
    #[serde(default = "default_test_cases_dir")]
    pub test_cases_dir: PathBuf,

    /// CPU time limit in seconds
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,

    /// Memory limit in megabytes
    #[serde(default = "default_memory_limit")]
    pub memory_limit_mb: u64,

    /// Declared subtask ids (empty = single global subtask)
    #[serde(default)]
    pub subtasks: Vec<u32>,

    /// Each test group was combined into a single `<slug>_<group>` file
    #[serde(default)]
    pub multiple_test_cases: bool,

    /// Test groups in grading order
    #[serde(default)]
    pub test_groups: Vec<ManifestGroup>,
}

fn default_slug() -> String {
    "problem".to_string()
}

fn default_test_cases_dir() -> PathBuf {
    PathBuf::from("tc")
}

fn default_time_limit() -> u64 {
    2
}

fn default_memory_limit() -> u64 {
    64
}

impl Default for ProblemManifest {
    fn default() -> Self {
        Self {
            slug: default_slug(),
            test_cases_dir: default_test_cases_dir(),
            time_limit_secs: default_time_limit(),
            memory_limit_mb: default_memory_limit(),
            subtasks: Vec::new(),
            multiple_test_cases: false,
            test_groups: Vec::new(),
        }
    }
}

impl ProblemManifest {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_limits(mut self, time_limit_secs: u64, memory_limit_mb: u64) -> Self {
        self.time_limit_secs = time_limit_secs;
        self.memory_limit_mb = memory_limit_mb;
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<u32>) -> Self {
        self.subtasks = subtasks;
        self
    }

    pub fn with_group(mut self, group: ManifestGroup) -> Self {
        self.test_groups.push(group);
        self
    }

    pub fn with_multiple_test_cases(mut self, multiple_test_cases: bool) -> Self {
        self.multiple_test_cases = multiple_test_cases;
        self
    }

    pub fn with_test_cases_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.test_cases_dir = dir.into();
        self
    }

    /// Load a manifest, choosing the parser by extension (JSON by default)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.display().to_string(),
            format,
            message,
        };

        let mut manifest: ProblemManifest = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string()))?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))?,
        };

        if manifest.test_cases_dir.is_relative() {
            if let Some(parent) = path.parent() {
                manifest.test_cases_dir = parent.join(&manifest.test_cases_dir);
            }
        }

        manifest.validate()?;
        tracing::debug!(slug = %manifest.slug, groups = manifest.test_groups.len(), "loaded problem manifest");
        Ok(manifest)
    }

    /// Every group must claim only declared subtasks
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slug.is_empty() {
            return Err(ConfigError::Invalid("slug must not be empty".to_string()));
        }
        if self.subtasks.contains(&0) {
            return Err(ConfigError::Invalid("subtask ids must be positive".to_string()));
        }
        let declared: BTreeSet<u32> = self.subtasks.iter().copied().collect();
        for group in &self.test_groups {
            if let Some(undeclared) = group.subtasks.iter().find(|id| !declared.contains(id)) {
                return Err(ConfigError::Invalid(format!(
                    "test group {} claims undeclared subtask {}",
                    group.id.map_or_else(|| "<ungrouped>".to_string(), |id| id.to_string()),
                    undeclared
                )));
            }
        }
        Ok(())
    }

    /// Subtasks that receive a verdict
    pub fn scored_subtask_ids(&self) -> Vec<SubtaskId> {
        if self.subtasks.is_empty() {
            vec![SubtaskId::Global]
        } else {
            self.subtasks.iter().copied().map(SubtaskId::Numbered).collect()
        }
    }

    /// Recorded test cases in grading order, grouped by test group
    pub fn test_groups(&self) -> Vec<(Option<u32>, Vec<TestCase>)> {
        self.test_groups
            .iter()
            .map(|group| {
                let subtask_ids: BTreeSet<SubtaskId> = if self.subtasks.is_empty() {
                    BTreeSet::from([SubtaskId::Global])
                } else {
                    group.subtasks.iter().copied().map(SubtaskId::Numbered).collect()
                };
                if self.multiple_test_cases {
                    let combined = TestCase::new(test_case_base_name(&self.slug, group.id))
                        .with_subtasks(subtask_ids);
                    return (group.id, vec![combined]);
                }
                let cases = (1..=group.test_cases)
                    .map(|case_id| TestCase {
                        name: test_case_name(&self.slug, group.id, case_id),
                        description: None,
                        bindings: Default::default(),
                        subtask_ids: subtask_ids.clone(),
                    })
                    .collect();
                (group.id, cases)
            })
            .collect()
    }
}
