//! `tckit check`: validate a manifest and its test-case files

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use tckit_core::ProblemManifest;

/// Test-case files the manifest declares but the directory lacks
pub fn missing_files(manifest: &ProblemManifest) -> Vec<PathBuf> {
    manifest
        .test_groups()
        .iter()
        .flat_map(|(_, cases)| cases.iter())
        .flat_map(|case| {
            [
                case.input_path(&manifest.test_cases_dir),
                case.output_path(&manifest.test_cases_dir),
            ]
        })
        .filter(|path| !path.is_file())
        .collect()
}

/// Returns whether every declared test-case file is present
pub fn execute(manifest_path: &Path) -> Result<bool> {
    let manifest = ProblemManifest::load(manifest_path)
        .with_context(|| format!("Failed to load manifest: {}", manifest_path.display()))?;

    let total: usize = manifest.test_groups.iter().map(|g| g.test_cases).sum();
    println!(
        "{} {} ({} test groups, {} test cases, subtasks: {})",
        "Manifest OK:".green(),
        manifest.slug.bold(),
        manifest.test_groups.len(),
        total,
        manifest
            .scored_subtask_ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let missing = missing_files(&manifest);
    if missing.is_empty() {
        println!("{}", "All test-case files present.".green());
        return Ok(true);
    }

    println!("{}", format!("{} test-case files missing:", missing.len()).red());
    for path in &missing {
        println!("  {}", path.display());
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tckit_core::ManifestGroup;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("p_1_1.in"), "1\n").unwrap();
        std::fs::write(temp_dir.path().join("p_1_1.out"), "1\n").unwrap();
        std::fs::write(temp_dir.path().join("p_1_2.in"), "2\n").unwrap();

        let manifest = ProblemManifest::new("p")
            .with_test_cases_dir(temp_dir.path())
            .with_group(ManifestGroup {
                id: Some(1),
                subtasks: vec![],
                test_cases: 2,
            });

        assert_eq!(missing_files(&manifest), vec![temp_dir.path().join("p_1_2.out")]);
    }

    #[test]
    fn test_check_manifest_file() {
        let temp_dir = TempDir::new().unwrap();
        let manifest_path = temp_dir.path().join("problem.yaml");
        std::fs::write(
            &manifest_path,
            "slug: p\ntest_groups:\n  - test_cases: 1\n",
        )
        .unwrap();
        std::fs::create_dir(temp_dir.path().join("tc")).unwrap();
        std::fs::write(temp_dir.path().join("tc/p_1.in"), "").unwrap();

        assert!(!execute(&manifest_path).unwrap());

        std::fs::write(temp_dir.path().join("tc/p_1.out"), "").unwrap();
        assert!(execute(&manifest_path).unwrap());
    }
}
