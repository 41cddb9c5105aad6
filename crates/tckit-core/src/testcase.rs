//! Test cases, test groups and the file naming contract
//!
//! Test-case files are named `<slug>_<group>_<case>.in` / `.out`, or
//! `<slug>_<case>.in` / `.out` for test cases outside any group. Case ids are
//! 1-based within their group. When a problem combines each group into one
//! file, that file is named by the base name alone: `<slug>_<group>` or
//! `<slug>`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::constraints::SubtaskId;
use crate::io::Bindings;

pub const INPUT_EXTENSION: &str = "in";
pub const OUTPUT_EXTENSION: &str = "out";

/// Name shared by every test case of a group, and of its combined file
pub fn test_case_base_name(slug: &str, group_id: Option<u32>) -> String {
    match group_id {
        Some(group) => format!("{}_{}", slug, group),
        None => slug.to_string(),
    }
}

/// Build the base name of a test case
pub fn test_case_name(slug: &str, group_id: Option<u32>, case_id: usize) -> String {
    format!("{}_{}", test_case_base_name(slug, group_id), case_id)
}

/// One concrete test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub bindings: Bindings,
    #[serde(default)]
    pub subtask_ids: BTreeSet<SubtaskId>,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            bindings: Bindings::new(),
            subtask_ids: BTreeSet::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_subtasks(mut self, ids: impl IntoIterator<Item = SubtaskId>) -> Self {
        self.subtask_ids = ids.into_iter().collect();
        self
    }

    pub fn input_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.name, INPUT_EXTENSION))
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.name, OUTPUT_EXTENSION))
    }
}

/// A group of test cases sharing the same subtask claims
#[derive(Debug, Clone, Default)]
pub struct TestGroup {
    id: Option<u32>,
    subtask_ids: BTreeSet<SubtaskId>,
    cases: Vec<(Option<String>, Bindings)>,
}

impl TestGroup {
    /// A numbered group
    pub fn new(id: u32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Test cases that belong to no group
    pub fn ungrouped() -> Self {
        Self::default()
    }

    pub fn with_subtasks(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.subtask_ids = ids.into_iter().map(SubtaskId::Numbered).collect();
        self
    }

    /// Append a test case
    pub fn case(mut self, bindings: Bindings) -> Self {
        self.cases.push((None, bindings));
        self
    }

    /// Append a test case with a human-readable description
    pub fn described_case(mut self, description: impl Into<String>, bindings: Bindings) -> Self {
        self.cases.push((Some(description.into()), bindings));
        self
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn subtask_ids(&self) -> &BTreeSet<SubtaskId> {
        &self.subtask_ids
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Named test cases of this group, in declaration order
    pub fn test_cases(&self, slug: &str) -> Vec<TestCase> {
        self.cases
            .iter()
            .enumerate()
            .map(|(index, (description, bindings))| TestCase {
                name: test_case_name(slug, self.id, index + 1),
                description: description.clone(),
                bindings: bindings.clone(),
                subtask_ids: self.subtask_ids.clone(),
            })
            .collect()
    }

    /// The single test case that holds every case of this group combined
    pub fn combined_test_case(&self, slug: &str) -> TestCase {
        TestCase::new(test_case_base_name(slug, self.id)).with_subtasks(self.subtask_ids.iter().copied())
    }
}
