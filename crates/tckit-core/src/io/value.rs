//! Variable storage for parsed and printed test-case data
//!
//! A [`Bindings`] map is the caller-owned storage that the codec writes into
//! while parsing and reads from while printing. Constraint predicates evaluate
//! against the same map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Target type a token is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// Signed 64-bit integer
    Int,
    /// 64-bit floating point number
    Real,
    /// Any non-whitespace token, kept verbatim
    Token,
}

impl ScalarType {
    /// Convert a raw token into a scalar of this type
    pub fn convert(&self, token: &str) -> Option<Scalar> {
        match self {
            ScalarType::Int => token.parse().ok().map(Scalar::Int),
            ScalarType::Real => token.parse().ok().map(Scalar::Real),
            ScalarType::Token => Some(Scalar::Token(token.to_string())),
        }
    }
}

/// A single scalar value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Real(f64),
    Token(String),
}

impl Scalar {
    /// Get the value as an integer, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a float; integers are widened
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Scalar::Real(v) => Some(*v),
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Token(_) => None,
        }
    }

    /// Get the value as a string token, if it is one
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Scalar::Token(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Real(v) => write!(f, "{}", v),
            Scalar::Token(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<usize> for Scalar {
    fn from(v: usize) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Token(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Token(v)
    }
}

/// Value bound to a variable name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Vector(Vec<Scalar>),
}

/// Named variable storage shared by the codec and the constraint verifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    /// Create empty bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a scalar value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.values.insert(name.into(), Value::Scalar(value.into()));
    }

    /// Bind a vector value
    pub fn set_vector<T: Into<Scalar>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) {
        let values = values.into_iter().map(Into::into).collect();
        self.values.insert(name.into(), Value::Vector(values));
    }

    /// Builder-style scalar binding
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style vector binding
    pub fn with_vector<T: Into<Scalar>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.set_vector(name, values);
        self
    }

    /// Look up a raw value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look up a scalar value
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.values.get(name) {
            Some(Value::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a vector value
    pub fn vector(&self, name: &str) -> Option<&[Scalar]> {
        match self.values.get(name) {
            Some(Value::Vector(v)) => Some(v),
            _ => None,
        }
    }

    /// Integer scalar shortcut, used heavily by constraint predicates
    pub fn int(&self, name: &str) -> Option<i64> {
        self.scalar(name).and_then(Scalar::as_int)
    }

    /// Float scalar shortcut
    pub fn real(&self, name: &str) -> Option<f64> {
        self.scalar(name).and_then(Scalar::as_real)
    }

    /// Integer vector shortcut; `None` if any element is not an integer
    pub fn ints(&self, name: &str) -> Option<Vec<i64>> {
        self.vector(name)?.iter().map(Scalar::as_int).collect()
    }

    /// Check whether a name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_convert() {
        assert_eq!(ScalarType::Int.convert("42"), Some(Scalar::Int(42)));
        assert_eq!(ScalarType::Int.convert("4x"), None);
        assert_eq!(ScalarType::Real.convert("2.5"), Some(Scalar::Real(2.5)));
        assert_eq!(
            ScalarType::Token.convert("abc"),
            Some(Scalar::Token("abc".to_string()))
        );
    }

    #[test]
    fn test_bindings_accessors() {
        let bindings = Bindings::new()
            .with("N", 3)
            .with("S", "hello")
            .with_vector("A", [1i64, 2, 3]);

        assert_eq!(bindings.int("N"), Some(3));
        assert_eq!(bindings.int("S"), None);
        assert_eq!(bindings.scalar("S").and_then(Scalar::as_token), Some("hello"));
        assert_eq!(bindings.ints("A"), Some(vec![1, 2, 3]));
        assert!(bindings.vector("N").is_none());
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn test_bindings_serialize_as_plain_map() {
        let bindings = Bindings::new().with("N", 2).with_vector("A", [5i64, 6]);
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(json, r#"{"A":[5,6],"N":2}"#);
    }
}
