//! tckit core library
//!
//! Building blocks shared by test-case generation and submission grading:
//!
//! - **Codec** ([`io`]): whitespace-exact parsing and printing of test-case
//!   data against line formats, with diagnostics naming the offending variable
//! - **Verifier** ([`constraints`]): evaluation of global and per-subtask
//!   constraints and subtask assignment checks
//! - **Verdicts** ([`verdict`]): the severity-ordered grading outcome
//! - **Test cases** ([`testcase`]) and the problem manifest ([`config`])
//!
//! # Example
//!
//! ```rust,ignore
//! use tckit_core::io::{Bindings, LineCodec, LineFormat};
//!
//! let format = LineFormat::builder().scalar("A").scalar("B").vector("C", 2).build()?;
//! let mut bindings = Bindings::new();
//! let last = LineCodec::parse(&format, &mut "42 123 1 2\n".as_bytes(), &mut bindings)?;
//! assert_eq!(last.as_deref(), Some("C[1]"));
//! ```

pub mod config;
pub mod constraints;
pub mod error;
pub mod io;
pub mod testcase;
pub mod verdict;

// Re-exports for convenience
pub use config::{ManifestGroup, ProblemManifest};
pub use constraints::{
    ConstraintSet, ConstraintsVerifier, MultipleTestCasesVerificationResult, Subtask, SubtaskId, VerificationResult,
};
pub use error::{CodecError, CodecResult, ConfigError, FormatError};
pub use io::{Bindings, IoCodec, IoFormat, LineCodec, LineFormat, Size};
pub use testcase::{TestCase, TestGroup, test_case_base_name, test_case_name};
pub use verdict::{Failure, Verdict, VerdictKind};
