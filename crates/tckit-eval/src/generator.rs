//! Test-case generation
//!
//! For every declared test case, in order: verify constraints, print the input
//! file, then run the reference solution to record the expected output. A
//! failing test case is recorded and generation moves on to the next one.
//!
//! With multiple test cases enabled, the cases of a group are not written
//! separately. Their inputs are concatenated under a leading count line into
//! one `<slug>_<group>.in` file, the count is checked against its own
//! constraints, and the solution runs once on the combined file.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use tckit_core::{
    Bindings, CodecError, ConstraintSet, ConstraintsVerifier, IoCodec, IoFormat, MultipleTestCasesVerificationResult,
    TestCase, TestGroup, VerificationResult,
};

use crate::config::GeneratorConfig;
use crate::os::{ExecutionRequest, ExecutionResult, OperatingSystem};
use crate::report::GenerationReporter;

/// Why a test case could not be generated
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationFailure {
    /// The test case violates its constraints or subtask claims
    ConstraintsVerification { result: VerificationResult },
    /// The number of combined test cases violates its constraints
    MultipleTestCasesConstraintsVerification { result: MultipleTestCasesVerificationResult },
    /// The reference solution did not exit cleanly
    SolutionExecution { result: ExecutionResult },
    /// The input could not be printed with the input format
    Format {
        message: String,
        #[serde(skip)]
        error: CodecError,
    },
    /// Writing the test-case files failed
    Io { message: String },
}

impl GenerationFailure {
    pub fn io(message: impl Into<String>) -> Self {
        GenerationFailure::Io {
            message: message.into(),
        }
    }
}

impl From<CodecError> for GenerationFailure {
    fn from(error: CodecError) -> Self {
        GenerationFailure::Format {
            message: error.to_string(),
            error,
        }
    }
}

/// Outcome of generating one test case
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseGenerationResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<GenerationFailure>,
}

impl TestCaseGenerationResult {
    fn new(test_case: &TestCase, failure: Option<GenerationFailure>) -> Self {
        Self {
            name: test_case.name.clone(),
            description: test_case.description.clone(),
            failure,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.failure.is_none()
    }
}

/// Outcome of combining a group into a single file
#[derive(Debug, Clone, Serialize)]
pub struct MultipleTestCasesCombinationResult {
    /// Base name of the combined file
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<GenerationFailure>,
}

impl MultipleTestCasesCombinationResult {
    pub fn is_successful(&self) -> bool {
        self.failure.is_none()
    }
}

/// Outcome of a whole generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationResult {
    pub test_cases: Vec<TestCaseGenerationResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub combinations: Vec<MultipleTestCasesCombinationResult>,
}

impl GenerationResult {
    pub fn is_successful(&self) -> bool {
        self.test_cases.iter().all(TestCaseGenerationResult::is_successful)
            && self.combinations.iter().all(MultipleTestCasesCombinationResult::is_successful)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TestCaseGenerationResult> {
        self.test_cases.iter().filter(|r| !r.is_successful())
    }
}

/// Combines each group into one file whose first line is the case count
pub struct MultipleTestCases {
    counter: String,
    verifier: ConstraintsVerifier,
}

impl MultipleTestCases {
    /// `counter` names the count variable that `constraints` are written
    /// against; only their global constraints apply
    pub fn new(counter: impl Into<String>, constraints: ConstraintSet) -> Self {
        Self {
            counter: counter.into(),
            verifier: ConstraintsVerifier::new(constraints),
        }
    }
}

/// Writes `.in` / `.out` pairs for declared test cases
pub struct Generator {
    verifier: ConstraintsVerifier,
    input_format: IoFormat,
    os: Arc<dyn OperatingSystem>,
    multiple_test_cases: Option<MultipleTestCases>,
}

impl Generator {
    pub fn new(verifier: ConstraintsVerifier, input_format: IoFormat, os: Arc<dyn OperatingSystem>) -> Self {
        Self {
            verifier,
            input_format,
            os,
            multiple_test_cases: None,
        }
    }

    pub fn with_multiple_test_cases(mut self, multiple_test_cases: MultipleTestCases) -> Self {
        self.multiple_test_cases = Some(multiple_test_cases);
        self
    }

    /// Generate every test case of every group, in order
    pub async fn generate(
        &self,
        groups: &[TestGroup],
        config: &GeneratorConfig,
        reporter: &mut dyn GenerationReporter,
    ) -> GenerationResult {
        reporter.introduction();
        info!("Generating test cases for {} into {:?}", config.slug, config.test_cases_dir);

        let mut result = GenerationResult::default();
        for group in groups {
            match &self.multiple_test_cases {
                Some(multiple) => self.generate_combined(group, multiple, config, reporter, &mut result).await,
                None => {
                    for test_case in group.test_cases(&config.slug) {
                        reporter.test_case_introduction(&test_case);
                        let failure = self.generate_test_case(&test_case, config).await.err();
                        let case_result = TestCaseGenerationResult::new(&test_case, failure);
                        reporter.test_case_result(&case_result);
                        result.test_cases.push(case_result);
                    }
                }
            }
        }

        reporter.result(&result);
        result
    }

    async fn generate_test_case(&self, test_case: &TestCase, config: &GeneratorConfig) -> Result<(), GenerationFailure> {
        let input = self.render_input(test_case)?;
        self.write_file(&config.test_cases_dir, &test_case.input_path(&config.test_cases_dir), &input)
            .await?;
        self.run_solution(test_case, config).await
    }

    async fn generate_combined(
        &self,
        group: &TestGroup,
        multiple: &MultipleTestCases,
        config: &GeneratorConfig,
        reporter: &mut dyn GenerationReporter,
        result: &mut GenerationResult,
    ) {
        let mut inputs = Vec::new();
        let mut all_rendered = true;
        for test_case in group.test_cases(&config.slug) {
            reporter.test_case_introduction(&test_case);
            let failure = match self.render_input(&test_case) {
                Ok(input) => {
                    inputs.extend(input);
                    None
                }
                Err(failure) => {
                    all_rendered = false;
                    Some(failure)
                }
            };
            let case_result = TestCaseGenerationResult::new(&test_case, failure);
            reporter.test_case_result(&case_result);
            result.test_cases.push(case_result);
        }

        let combined = group.combined_test_case(&config.slug);
        if !all_rendered {
            warn!("Not combining {}: some of its test cases failed", combined.name);
            return;
        }

        reporter.multiple_test_cases_combination_introduction(&combined.name);
        let failure = self
            .combine(&combined, group.len(), inputs, multiple, config)
            .await
            .err();
        let combination = MultipleTestCasesCombinationResult {
            name: combined.name,
            failure,
        };
        reporter.multiple_test_cases_combination_result(&combination);
        result.combinations.push(combination);
    }

    async fn combine(
        &self,
        combined: &TestCase,
        count: usize,
        inputs: Vec<u8>,
        multiple: &MultipleTestCases,
        config: &GeneratorConfig,
    ) -> Result<(), GenerationFailure> {
        let bindings = Bindings::new().with(multiple.counter.clone(), count);
        let verification = multiple.verifier.verify_multiple_test_cases(&bindings);
        if !verification.is_satisfied() {
            return Err(GenerationFailure::MultipleTestCasesConstraintsVerification { result: verification });
        }

        let mut content = format!("{}\n", count).into_bytes();
        content.extend(inputs);
        self.write_file(&config.test_cases_dir, &combined.input_path(&config.test_cases_dir), &content)
            .await?;
        self.run_solution(combined, config).await
    }

    /// Verify a test case and print its input
    fn render_input(&self, test_case: &TestCase) -> Result<Vec<u8>, GenerationFailure> {
        let verification = self.verifier.verify(&test_case.bindings, &test_case.subtask_ids);
        if !verification.is_satisfied() {
            return Err(GenerationFailure::ConstraintsVerification { result: verification });
        }
        for id in verification.satisfied_but_not_assigned_subtask_ids() {
            warn!("{} satisfies subtask {} but is not assigned to it", test_case.name, id);
        }

        let mut input = Vec::new();
        IoCodec::print(&self.input_format, &test_case.bindings, &mut input)?;
        Ok(input)
    }

    async fn write_file(&self, dir: &Path, path: &Path, content: &[u8]) -> Result<(), GenerationFailure> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| GenerationFailure::io(format!("Cannot create {:?}: {}", dir, e)))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| GenerationFailure::io(format!("Cannot write {:?}: {}", path, e)))?;
        debug!("Wrote {:?}", path);
        Ok(())
    }

    /// Run the reference solution on the test case input to record its output
    async fn run_solution(&self, test_case: &TestCase, config: &GeneratorConfig) -> Result<(), GenerationFailure> {
        let request = ExecutionRequest::new(
            format!("{}-generation-evaluation", test_case.name),
            config.solution_command.clone(),
        )
        .stdin(test_case.input_path(&config.test_cases_dir))
        .stdout(test_case.output_path(&config.test_cases_dir));

        let execution = self
            .os
            .execute(&request)
            .await
            .map_err(|e| GenerationFailure::io(e.to_string()))?;
        if !execution.outcome.is_success() {
            return Err(GenerationFailure::SolutionExecution { result: execution });
        }

        Ok(())
    }
}
