//! Structured test-case I/O
//!
//! Format descriptors ([`LineFormat`], [`IoFormat`]), caller-owned variable
//! storage ([`Bindings`]) and the codecs translating between them and text.

mod codec;
mod format;
mod reader;
mod value;

pub use codec::{IoCodec, LineCodec};
pub use format::{IoFormat, LineFormat, LineFormatBuilder, Size, Variable, VariableKind};
pub use value::{Bindings, Scalar, ScalarType, Value};
