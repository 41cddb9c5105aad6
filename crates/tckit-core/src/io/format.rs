//! Line and multi-line format descriptors

use std::fmt;
use std::sync::Arc;

use super::value::{Bindings, ScalarType};
use crate::error::{CodecError, FormatError};

type SizeFn = Arc<dyn Fn(&Bindings) -> usize + Send + Sync>;

/// Expected number of elements of a vector variable
#[derive(Clone)]
pub enum Size {
    /// Constant length
    Fixed(usize),
    /// Length taken from an integer scalar bound under this name
    Of(String),
    /// Length computed from the current bindings
    Computed(SizeFn),
}

impl Size {
    /// Length taken from another variable
    pub fn of(name: impl Into<String>) -> Self {
        Size::Of(name.into())
    }

    /// Length computed by a closure over the current bindings
    pub fn computed(f: impl Fn(&Bindings) -> usize + Send + Sync + 'static) -> Self {
        Size::Computed(Arc::new(f))
    }

    /// Resolve against the current bindings
    pub(crate) fn resolve(&self, vector: &str, bindings: &Bindings) -> Result<usize, CodecError> {
        match self {
            Size::Fixed(n) => Ok(*n),
            Size::Computed(f) => Ok(f(bindings)),
            Size::Of(name) => bindings
                .int(name)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| CodecError::UnresolvedSize {
                    vector: vector.to_string(),
                    size_variable: name.clone(),
                }),
        }
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Size::Of(name) => f.debug_tuple("Of").field(name).finish(),
            Size::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<usize> for Size {
    fn from(n: usize) -> Self {
        Size::Fixed(n)
    }
}

/// Shape of a variable within a line
#[derive(Debug, Clone)]
pub enum VariableKind {
    Scalar,
    /// `None` consumes the rest of the line
    Vector(Option<Size>),
}

/// A named variable declaration within a line format
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub scalar_type: ScalarType,
    pub kind: VariableKind,
}

impl Variable {
    /// Name rendered for diagnostics of a single element
    pub fn element_name(&self, index: usize) -> String {
        format!("{}[{}]", self.name, index)
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        matches!(self.kind, VariableKind::Vector(None))
    }
}

/// Grammar of one line: variables separated by single spaces
#[derive(Debug, Clone, Default)]
pub struct LineFormat {
    variables: Vec<Variable>,
}

impl LineFormat {
    /// Start building a line format
    pub fn builder() -> LineFormatBuilder {
        LineFormatBuilder::default()
    }

    /// A line with no variables
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Builder for [`LineFormat`]
#[derive(Debug, Default)]
pub struct LineFormatBuilder {
    variables: Vec<Variable>,
}

impl LineFormatBuilder {
    /// Append an integer scalar
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.typed_scalar(name, ScalarType::Int)
    }

    /// Append a scalar of the given type
    pub fn typed_scalar(mut self, name: impl Into<String>, scalar_type: ScalarType) -> Self {
        self.variables.push(Variable {
            name: name.into(),
            scalar_type,
            kind: VariableKind::Scalar,
        });
        self
    }

    /// Append an integer vector with an expected length
    pub fn vector(self, name: impl Into<String>, size: impl Into<Size>) -> Self {
        self.typed_vector(name, ScalarType::Int, Some(size.into()))
    }

    /// Append an integer vector that consumes the rest of the line
    pub fn vector_unbounded(self, name: impl Into<String>) -> Self {
        self.typed_vector(name, ScalarType::Int, None)
    }

    /// Append a vector of the given type
    pub fn typed_vector(
        mut self,
        name: impl Into<String>,
        scalar_type: ScalarType,
        size: Option<Size>,
    ) -> Self {
        self.variables.push(Variable {
            name: name.into(),
            scalar_type,
            kind: VariableKind::Vector(size),
        });
        self
    }

    /// Finish the format, rejecting an unbounded vector that is not last
    pub fn build(self) -> Result<LineFormat, FormatError> {
        let last = self.variables.len().saturating_sub(1);
        if let Some(variable) = self
            .variables
            .iter()
            .take(last)
            .find(|v| v.is_unbounded())
        {
            return Err(FormatError::UnboundedVectorNotLast {
                name: variable.name.clone(),
            });
        }
        Ok(LineFormat {
            variables: self.variables,
        })
    }
}

/// Grammar of a whole file: one line format per line
#[derive(Debug, Clone, Default)]
pub struct IoFormat {
    lines: Vec<LineFormat>,
}

impl IoFormat {
    pub fn new(lines: Vec<LineFormat>) -> Self {
        Self { lines }
    }

    /// Append a line
    pub fn with_line(mut self, line: LineFormat) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(&self) -> &[LineFormat] {
        &self.lines
    }
}
