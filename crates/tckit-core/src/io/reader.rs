//! Byte-level scanner enforcing the whitespace rules of the line grammar

use std::io::BufRead;

use super::value::{Scalar, ScalarType};
use crate::error::{CodecError, CodecResult};

const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Peeking reader over a buffered input stream
pub(crate) struct TokenReader<'a, R: BufRead> {
    inner: &'a mut R,
}

impl<'a, R: BufRead> TokenReader<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        Self { inner }
    }

    /// Next byte without consuming it; `None` at end of stream
    pub(crate) fn peek(&mut self) -> CodecResult<Option<u8>> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    pub(crate) fn bump(&mut self) {
        self.inner.consume(1);
    }

    pub(crate) fn at_eof(&mut self) -> CodecResult<bool> {
        Ok(self.peek()?.is_none())
    }

    pub(crate) fn peek_is(&mut self, byte: u8) -> CodecResult<bool> {
        Ok(self.peek()? == Some(byte))
    }

    /// Consume exactly one space
    pub(crate) fn expect_space(&mut self, after: &str) -> CodecResult<()> {
        if self.peek_is(SPACE)? {
            self.bump();
            Ok(())
        } else {
            Err(CodecError::MissingSpace {
                after: after.to_string(),
            })
        }
    }

    /// Consume exactly one line terminator
    pub(crate) fn expect_newline(&mut self, after: Option<&str>) -> CodecResult<()> {
        if self.peek_is(NEWLINE)? {
            self.bump();
            return Ok(());
        }
        Err(match after {
            Some(after) => CodecError::MissingNewline {
                after: after.to_string(),
            },
            None => CodecError::MissingBlankLine,
        })
    }

    /// Read one token and convert it to `scalar_type`
    pub(crate) fn parse_scalar(&mut self, name: &str, scalar_type: ScalarType) -> CodecResult<Scalar> {
        let found = match self.peek()? {
            None => Some("<EOF>"),
            Some(b) if b.is_ascii_whitespace() => Some("<whitespace>"),
            Some(_) => None,
        };
        if let Some(found) = found {
            return Err(CodecError::Unparseable {
                name: name.to_string(),
                found: found.to_string(),
            });
        }

        let token = self.read_token()?;
        scalar_type
            .convert(&token)
            .ok_or_else(|| CodecError::Unparseable {
                name: name.to_string(),
                found: token,
            })
    }

    fn read_token(&mut self) -> CodecResult<String> {
        let mut bytes = Vec::new();
        while let Some(b) = self.peek()? {
            if b.is_ascii_whitespace() {
                break;
            }
            bytes.push(b);
            self.bump();
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
