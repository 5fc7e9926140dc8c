//! Literal value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal: a canonical lexical value paired with its datatype IRI.
///
/// Two literals with equal value and datatype denote the same vertex
/// within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Canonical lexical form of the value.
    pub value: String,
    /// Datatype IRI.
    pub datatype: String,
}

impl Literal {
    /// Create a literal from an already-canonical value.
    pub fn new(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            datatype: datatype.into(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"^^<{}>", self.value, self.datatype)
    }
}
