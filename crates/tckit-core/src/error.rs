//! Error types for the codec, format builders and manifest loading

use thiserror::Error;

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Grammar errors raised while parsing or printing test-case data.
///
/// The display strings are part of the public contract: presentation layers
/// show them verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Expected: <space> after '{after}'")]
    MissingSpace { after: String },

    #[error("Expected: <space> or <newline> after '{after}'")]
    MissingSpaceOrNewline { after: String },

    #[error("Expected: <newline> after '{after}'")]
    MissingNewline { after: String },

    #[error("Expected: <newline>")]
    MissingBlankLine,

    #[error("Expected: <EOF> after '{after}'")]
    MissingEof { after: String },

    #[error("Expected: <EOF>")]
    MissingEofAtStart,

    #[error("Cannot parse for '{name}'. Found: {found}")]
    Unparseable { name: String, found: String },

    #[error("Number of elements of vector '{name}' unsatisfied. Expected: {expected}, actual: {actual}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Variable '{name}' is not bound")]
    Unbound { name: String },

    #[error("Variable '{name}' is bound to a {found}, expected a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Size of vector '{vector}' refers to '{size_variable}', which is not a bound non-negative integer")]
    UnresolvedSize {
        vector: String,
        size_variable: String,
    },

    #[error("Cannot print '{name}'. Token must be non-empty without whitespace, found: {token:?}")]
    UnprintableToken { name: String, token: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

/// Errors raised while building a format descriptor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Vector without size can only be the last variable in a line: '{name}'")]
    UnboundedVectorNotLast { name: String },
}

/// Errors raised while loading a problem manifest
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read manifest '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} manifest '{path}': {message}")]
    Parse {
        path: String,
        format: &'static str,
        message: String,
    },

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_messages() {
        assert_eq!(
            CodecError::MissingSpace {
                after: "B".to_string()
            }
            .to_string(),
            "Expected: <space> after 'B'"
        );
        assert_eq!(
            CodecError::Unparseable {
                name: "C[0]".to_string(),
                found: "<whitespace>".to_string()
            }
            .to_string(),
            "Cannot parse for 'C[0]'. Found: <whitespace>"
        );
        assert_eq!(
            CodecError::SizeMismatch {
                name: "C".to_string(),
                expected: 2,
                actual: 3
            }
            .to_string(),
            "Number of elements of vector 'C' unsatisfied. Expected: 2, actual: 3"
        );
    }
}
