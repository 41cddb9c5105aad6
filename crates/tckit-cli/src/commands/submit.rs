//! `tckit submit`: grade a submission on every recorded test case

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use tckit_core::ProblemManifest;
use tckit_eval::{
    Evaluator, GraderConfig, JsonReporter, LineDiff, OperatingSystem, PorcelainReporter, Scorer, SubmissionReporter,
    Submitter, SubtaskVerdicts, TestCaseSubmitter, TextReporter,
};

use crate::args::OutputFormat;

pub struct SubmitArgs {
    pub manifest: PathBuf,
    pub command: String,
    pub format: OutputFormat,
    pub time_limit: Option<u64>,
    pub memory_limit: Option<u64>,
    pub diff_lines: Option<usize>,
    pub scratch_dir: Option<PathBuf>,
    pub color: bool,
}

/// Reporter that keeps nothing but the final result
#[derive(Default)]
struct FinalResult {
    verdicts: Option<SubtaskVerdicts>,
}

impl SubmissionReporter for FinalResult {
    fn result(&mut self, verdicts: &SubtaskVerdicts) {
        self.verdicts = Some(verdicts.clone());
    }
}

/// Build the grader configuration from the manifest and command-line overrides
pub fn grader_config(manifest: &ProblemManifest, args: &SubmitArgs) -> GraderConfig {
    let mut config = GraderConfig::from_manifest(manifest, args.command.clone());
    if let Some(secs) = args.time_limit {
        config = config.with_time_limit(secs);
    }
    if let Some(mb) = args.memory_limit {
        config = config.with_memory_limit(mb);
    }
    if let Some(lines) = args.diff_lines {
        config = config.with_max_diff_lines(lines);
    }
    if let Some(dir) = &args.scratch_dir {
        config = config.with_scratch_dir(dir);
    }
    config
}

#[cfg(unix)]
fn operating_system() -> Arc<dyn OperatingSystem> {
    Arc::new(tckit_eval::os::UnixOperatingSystem::new())
}

#[cfg(not(unix))]
fn operating_system() -> Arc<dyn OperatingSystem> {
    compile_error!("tckit requires a Unix operating system");
}

pub async fn execute(args: SubmitArgs) -> Result<()> {
    let manifest = ProblemManifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest: {}", args.manifest.display()))?;
    let config = grader_config(&manifest, &args);
    tracing::debug!(?config, "grading configuration");

    let os = operating_system();
    let submitter = Submitter::new(TestCaseSubmitter::new(
        Evaluator::new(os.clone()),
        Scorer::new(Box::new(LineDiff::new(config.max_diff_lines))),
        os,
        &config,
    )?);

    let groups = manifest.test_groups();
    let subtask_ids = manifest.scored_subtask_ids();

    match args.format {
        OutputFormat::Text => {
            let color = args.color && std::io::stdout().is_terminal();
            let mut reporter = TextReporter::new(std::io::stdout()).with_color(color);
            submitter.submit(&groups, &subtask_ids, &config, &mut reporter).await;
        }
        OutputFormat::Porcelain => {
            let mut reporter = PorcelainReporter::new(std::io::stdout());
            submitter.submit(&groups, &subtask_ids, &config, &mut reporter).await;
        }
        OutputFormat::Json => {
            let mut reporter = FinalResult::default();
            let verdicts = submitter.submit(&groups, &subtask_ids, &config, &mut reporter).await;
            println!("{}", JsonReporter::generate(&verdicts)?);
        }
    }

    Ok(())
}
