//! Parsing and printing of test-case data according to a format descriptor
//!
//! Values on a line are separated by exactly one space and the line is
//! terminated by exactly one newline. Diagnostics name the offending variable,
//! and vector elements are rendered as `name[index]`.

use std::io::{BufRead, Write};

use super::format::{IoFormat, LineFormat, Variable, VariableKind};
use super::reader::TokenReader;
use super::value::{Bindings, Scalar, Value};
use crate::error::{CodecError, CodecResult};

/// Codec for a single line
pub struct LineCodec;

impl LineCodec {
    /// Parse one line from `input` into `bindings`.
    ///
    /// Returns the display name of the last variable or element consumed, or
    /// `None` for an empty format.
    pub fn parse<R: BufRead>(
        format: &LineFormat,
        input: &mut R,
        bindings: &mut Bindings,
    ) -> CodecResult<Option<String>> {
        let mut reader = TokenReader::new(input);
        Self::parse_with(format, &mut reader, bindings)
    }

    fn parse_with<R: BufRead>(
        format: &LineFormat,
        reader: &mut TokenReader<'_, R>,
        bindings: &mut Bindings,
    ) -> CodecResult<Option<String>> {
        let mut last: Option<String> = None;

        for variable in format.variables() {
            match &variable.kind {
                VariableKind::Scalar => {
                    if let Some(prev) = &last {
                        reader.expect_space(prev)?;
                    }
                    let value = reader.parse_scalar(&variable.name, variable.scalar_type)?;
                    bindings.insert(&variable.name, Value::Scalar(value));
                    last = Some(variable.name.clone());
                }
                VariableKind::Vector(Some(size)) => {
                    let count = size.resolve(&variable.name, bindings)?;
                    let mut values = Vec::with_capacity(count);
                    for index in 0..count {
                        if let Some(prev) = &last {
                            reader.expect_space(prev)?;
                        }
                        let name = variable.element_name(index);
                        values.push(reader.parse_scalar(&name, variable.scalar_type)?);
                        last = Some(name);
                    }
                    bindings.insert(&variable.name, Value::Vector(values));
                }
                VariableKind::Vector(None) => {
                    let values = Self::parse_rest_of_line(variable, reader, &mut last)?;
                    bindings.insert(&variable.name, Value::Vector(values));
                }
            }
        }

        reader.expect_newline(last.as_deref())?;
        Ok(last)
    }

    fn parse_rest_of_line<R: BufRead>(
        variable: &Variable,
        reader: &mut TokenReader<'_, R>,
        last: &mut Option<String>,
    ) -> CodecResult<Vec<Scalar>> {
        let mut values = Vec::new();
        loop {
            match last.as_deref() {
                Some(prev) => match reader.peek()? {
                    Some(b'\n') => break,
                    Some(b' ') => reader.bump(),
                    _ => {
                        return Err(CodecError::MissingSpaceOrNewline {
                            after: prev.to_string(),
                        });
                    }
                },
                None => {
                    if reader.peek_is(b'\n')? {
                        break;
                    }
                }
            }
            let name = variable.element_name(values.len());
            values.push(reader.parse_scalar(&name, variable.scalar_type)?);
            *last = Some(name);
        }
        Ok(values)
    }

    /// Print one line from `bindings` to `output`.
    ///
    /// Every vector with a declared size is checked against its live length
    /// before anything is written.
    pub fn print<W: Write>(
        format: &LineFormat,
        bindings: &Bindings,
        output: &mut W,
    ) -> CodecResult<()> {
        let mut tokens = Vec::new();

        for variable in format.variables() {
            match &variable.kind {
                VariableKind::Scalar => {
                    tokens.push(printable(&variable.name, bound_scalar(variable, bindings)?)?);
                }
                VariableKind::Vector(size) => {
                    let values = bound_vector(variable, bindings)?;
                    if let Some(size) = size {
                        let expected = size.resolve(&variable.name, bindings)?;
                        if expected != values.len() {
                            return Err(CodecError::SizeMismatch {
                                name: variable.name.clone(),
                                expected,
                                actual: values.len(),
                            });
                        }
                    }
                    for (index, value) in values.iter().enumerate() {
                        tokens.push(printable(&variable.element_name(index), value)?);
                    }
                }
            }
        }

        output.write_all(tokens.join(" ").as_bytes())?;
        output.write_all(b"\n")?;
        Ok(())
    }
}

/// Render a scalar, refusing tokens that would not read back as one token
fn printable(name: &str, value: &Scalar) -> CodecResult<String> {
    if let Scalar::Token(token) = value {
        if token.is_empty() || token.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(CodecError::UnprintableToken {
                name: name.to_string(),
                token: token.clone(),
            });
        }
    }
    Ok(value.to_string())
}

fn bound_scalar<'b>(variable: &Variable, bindings: &'b Bindings) -> CodecResult<&'b Scalar> {
    match bindings.get(&variable.name) {
        Some(Value::Scalar(s)) => Ok(s),
        Some(Value::Vector(_)) => Err(CodecError::KindMismatch {
            name: variable.name.clone(),
            expected: "scalar",
            found: "vector",
        }),
        None => Err(CodecError::Unbound {
            name: variable.name.clone(),
        }),
    }
}

fn bound_vector<'b>(variable: &Variable, bindings: &'b Bindings) -> CodecResult<&'b [Scalar]> {
    match bindings.get(&variable.name) {
        Some(Value::Vector(v)) => Ok(v),
        Some(Value::Scalar(_)) => Err(CodecError::KindMismatch {
            name: variable.name.clone(),
            expected: "vector",
            found: "scalar",
        }),
        None => Err(CodecError::Unbound {
            name: variable.name.clone(),
        }),
    }
}

/// Codec for a whole multi-line file
pub struct IoCodec;

impl IoCodec {
    /// Parse every line in order, then require end of stream
    pub fn parse<R: BufRead>(
        format: &IoFormat,
        input: &mut R,
        bindings: &mut Bindings,
    ) -> CodecResult<Option<String>> {
        let mut reader = TokenReader::new(input);
        let mut last: Option<String> = None;

        for line in format.lines() {
            if let Some(name) = LineCodec::parse_with(line, &mut reader, bindings)? {
                last = Some(name);
            }
        }

        if !reader.at_eof()? {
            return Err(match last {
                Some(after) => CodecError::MissingEof { after },
                None => CodecError::MissingEofAtStart,
            });
        }

        tracing::trace!(lines = format.lines().len(), "parsed test-case data");
        Ok(last)
    }

    /// Print every line in order
    pub fn print<W: Write>(format: &IoFormat, bindings: &Bindings, output: &mut W) -> CodecResult<()> {
        for line in format.lines() {
            LineCodec::print(line, bindings, output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Size;
    use std::io::Cursor;

    fn scalars_only() -> LineFormat {
        LineFormat::builder().scalar("A").scalar("B").build().unwrap()
    }

    fn with_vector() -> LineFormat {
        LineFormat::builder()
            .scalar("A")
            .scalar("B")
            .vector("C", 2)
            .build()
            .unwrap()
    }

    fn with_unbounded_vector() -> LineFormat {
        LineFormat::builder()
            .scalar("A")
            .scalar("B")
            .vector("C", Size::computed(|_| 2))
            .vector_unbounded("D")
            .build()
            .unwrap()
    }

    fn parse(format: &LineFormat, input: &str) -> (CodecResult<Option<String>>, Bindings) {
        let mut bindings = Bindings::new();
        let result = LineCodec::parse(format, &mut Cursor::new(input), &mut bindings);
        (result, bindings)
    }

    fn parse_err(format: &LineFormat, input: &str) -> String {
        parse(format, input).0.unwrap_err().to_string()
    }

    #[test]
    fn test_parse_empty_line() {
        let (result, bindings) = parse(&LineFormat::empty(), "\n");
        assert_eq!(result.unwrap(), None);
        assert!(bindings.is_empty());

        assert_eq!(parse_err(&LineFormat::empty(), "1\n"), "Expected: <newline>");
    }

    #[test]
    fn test_parse_scalars_only() {
        let (result, bindings) = parse(&scalars_only(), "42 123\n");
        assert_eq!(result.unwrap().as_deref(), Some("B"));
        assert_eq!(bindings.int("A"), Some(42));
        assert_eq!(bindings.int("B"), Some(123));
    }

    #[test]
    fn test_parse_with_vector() {
        let (result, bindings) = parse(&with_vector(), "42 123 1 2\n");
        assert_eq!(result.unwrap().as_deref(), Some("C[1]"));
        assert_eq!(bindings.int("A"), Some(42));
        assert_eq!(bindings.int("B"), Some(123));
        assert_eq!(bindings.ints("C"), Some(vec![1, 2]));
    }

    #[test]
    fn test_parse_trailing_line_without_newline_at_eof_fails() {
        assert_eq!(
            parse_err(&with_vector(), "42 123 1 2"),
            "Expected: <newline> after 'C[1]'"
        );
    }

    #[test]
    fn test_parse_missing_variable() {
        assert_eq!(
            parse_err(&with_vector(), "42  "),
            "Cannot parse for 'B'. Found: <whitespace>"
        );
    }

    #[test]
    fn test_parse_missing_space() {
        assert_eq!(
            parse_err(&with_vector(), "42 123\n"),
            "Expected: <space> after 'B'"
        );
        assert_eq!(
            parse_err(&with_vector(), "42 123 1\n"),
            "Expected: <space> after 'C[0]'"
        );
    }

    #[test]
    fn test_parse_too_many_elements() {
        assert_eq!(
            parse_err(&with_vector(), "42 123 1 2 3 4 5\n"),
            "Expected: <newline> after 'C[1]'"
        );
    }

    #[test]
    fn test_parse_double_space_is_rejected() {
        assert_eq!(
            parse_err(&scalars_only(), "42  123\n"),
            "Cannot parse for 'B'. Found: <whitespace>"
        );
    }

    #[test]
    fn test_parse_bad_token() {
        assert_eq!(
            parse_err(&with_vector(), "42 123 1 x\n"),
            "Cannot parse for 'C[1]'. Found: x"
        );
    }

    #[test]
    fn test_parse_unbounded_vector() {
        let (result, bindings) = parse(&with_unbounded_vector(), "42 123 1 2 3 4 5\n");
        assert_eq!(result.unwrap().as_deref(), Some("D[2]"));
        assert_eq!(bindings.ints("C"), Some(vec![1, 2]));
        assert_eq!(bindings.ints("D"), Some(vec![3, 4, 5]));
    }

    #[test]
    fn test_parse_unbounded_vector_may_be_empty() {
        let (result, bindings) = parse(&with_unbounded_vector(), "42 123 1 2\n");
        assert_eq!(result.unwrap().as_deref(), Some("C[1]"));
        assert_eq!(bindings.ints("D"), Some(vec![]));
    }

    #[test]
    fn test_parse_unbounded_vector_missing_space_or_newline() {
        assert_eq!(
            parse_err(&with_unbounded_vector(), "42 123 1 2 3 4 5"),
            "Expected: <space> or <newline> after 'D[2]'"
        );
    }

    #[test]
    fn test_parse_vector_size_from_bindings() {
        let header = LineFormat::builder().scalar("N").build().unwrap();
        let body = LineFormat::builder().vector("A", Size::of("N")).build().unwrap();
        let format = IoFormat::new(vec![header, body]);

        let mut bindings = Bindings::new();
        let last = IoCodec::parse(&format, &mut Cursor::new("3\n7 8 9\n"), &mut bindings).unwrap();
        assert_eq!(last.as_deref(), Some("A[2]"));
        assert_eq!(bindings.ints("A"), Some(vec![7, 8, 9]));
    }

    #[test]
    fn test_parse_io_format_requires_eof() {
        let format = IoFormat::new(vec![scalars_only()]);
        let mut bindings = Bindings::new();
        let err = IoCodec::parse(&format, &mut Cursor::new("1 2\n3\n"), &mut bindings).unwrap_err();
        assert_eq!(err.to_string(), "Expected: <EOF> after 'B'");
    }

    #[test]
    fn test_print_empty_line() {
        let mut out = Vec::new();
        LineCodec::print(&LineFormat::empty(), &Bindings::new(), &mut out).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_print_with_vector() {
        let bindings = Bindings::new()
            .with("A", 42)
            .with("B", 123)
            .with_vector("C", [1i64, 2]);
        let mut out = Vec::new();
        LineCodec::print(&with_vector(), &bindings, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "42 123 1 2\n");
    }

    #[test]
    fn test_print_size_mismatch() {
        let bindings = Bindings::new()
            .with("A", 42)
            .with("B", 123)
            .with_vector("C", [1i64, 2, 3]);
        let mut out = Vec::new();
        let err = LineCodec::print(&with_vector(), &bindings, &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Number of elements of vector 'C' unsatisfied. Expected: 2, actual: 3"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_unbounded_vector() {
        let bindings = Bindings::new()
            .with("A", 42)
            .with("B", 123)
            .with_vector("C", [1i64, 2])
            .with_vector("D", [3i64, 4, 5]);
        let mut out = Vec::new();
        LineCodec::print(&with_unbounded_vector(), &bindings, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "42 123 1 2 3 4 5\n");
    }

    #[test]
    fn test_print_unbound_variable() {
        let mut out = Vec::new();
        let err = LineCodec::print(&scalars_only(), &Bindings::new().with("A", 1), &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), "Variable 'B' is not bound");
    }

    #[test]
    fn test_print_rejects_tokens_that_do_not_parse_back() {
        let format = LineFormat::builder()
            .typed_scalar("S", crate::io::ScalarType::Token)
            .scalar("N")
            .build()
            .unwrap();

        for token in ["a b", "", "x\ny"] {
            let mut out = Vec::new();
            let err = LineCodec::print(&format, &Bindings::new().with("S", token).with("N", 1), &mut out)
                .unwrap_err();
            assert_eq!(
                err,
                CodecError::UnprintableToken {
                    name: "S".to_string(),
                    token: token.to_string(),
                }
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_print_names_the_offending_element() {
        let format = LineFormat::builder()
            .typed_vector("W", crate::io::ScalarType::Token, None)
            .build()
            .unwrap();
        let bindings = Bindings::new().with_vector("W", ["ok", "not\tok"]);

        let err = LineCodec::print(&format, &bindings, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot print 'W[1]'. Token must be non-empty without whitespace, found: \"not\\tok\""
        );
    }

    #[test]
    fn test_printed_data_parses_back() {
        let format = IoFormat::new(vec![
            LineFormat::builder().scalar("N").build().unwrap(),
            LineFormat::builder().vector("A", Size::of("N")).build().unwrap(),
            LineFormat::builder()
                .typed_scalar("name", crate::io::ScalarType::Token)
                .vector_unbounded("rest")
                .build()
                .unwrap(),
        ]);
        let original = Bindings::new()
            .with("N", 3)
            .with_vector("A", [-1i64, 0, 1])
            .with("name", "tree")
            .with_vector("rest", [10i64, 20]);

        let mut out = Vec::new();
        IoCodec::print(&format, &original, &mut out).unwrap();

        let mut parsed = Bindings::new();
        IoCodec::parse(&format, &mut Cursor::new(out), &mut parsed).unwrap();
        assert_eq!(parsed, original);
    }
}
