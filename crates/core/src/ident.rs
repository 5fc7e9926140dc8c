//! Identifier and kind scheme.
//!
//! Every identifier carries a structural tag in its first two bytes, so the
//! kind of a construct is derivable without a store lookup: `v:` for plain
//! vertices, `e:` for edges, `l:` for literal vertices. Anything else is
//! foreign input and reports [`Kind::Unknown`].
//!
//! Plain vertex and edge identifiers are rendered from a store-wide
//! monotonic counter. Literal identifiers are content-addressed:
//! `l:<datatypeId>:<valueHash>:<graphId>`, where the hash is the SHA-256
//! digest of the canonical value rendered as 64 lowercase hex characters.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Structural tag of a plain vertex identifier.
pub const PREFIX_VERTEX: &str = "v:";
/// Structural tag of an edge identifier.
pub const PREFIX_EDGE: &str = "e:";
/// Structural tag of a literal vertex identifier.
pub const PREFIX_LITERAL: &str = "l:";

/// Kind of a construct, derived from its identifier alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Vertex,
    Edge,
    Literal,
    Unknown,
}

impl Kind {
    /// Human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Vertex => "vertex",
            Kind::Edge => "edge",
            Kind::Literal => "literal vertex",
            Kind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An opaque vertex, literal-vertex, or edge identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    /// Plain vertex identifier for a counter value.
    pub fn vertex(counter: u64) -> Self {
        Ident(format!("{PREFIX_VERTEX}{counter}"))
    }

    /// Edge identifier for a counter value.
    pub fn edge(counter: u64) -> Self {
        Ident(format!("{PREFIX_EDGE}{counter}"))
    }

    /// Literal vertex identifier for a (datatype id, value hash) pair,
    /// scoped to the owning graph.
    pub fn literal(datatype_id: u8, value_hash: &str, graph: &str) -> Self {
        Ident(format!("{PREFIX_LITERAL}{datatype_id}:{value_hash}:{graph}"))
    }

    /// Kind of this identifier, derived from its structural tag.
    pub fn kind(&self) -> Kind {
        match self.0.get(..2) {
            Some(PREFIX_VERTEX) => Kind::Vertex,
            Some(PREFIX_EDGE) => Kind::Edge,
            Some(PREFIX_LITERAL) => Kind::Literal,
            _ => Kind::Unknown,
        }
    }

    /// Whether this identifier denotes a vertex (plain or literal).
    pub fn is_vertex(&self) -> bool {
        matches!(self.kind(), Kind::Vertex | Kind::Literal)
    }

    /// Whether this identifier denotes an edge.
    pub fn is_edge(&self) -> bool {
        self.kind() == Kind::Edge
    }

    /// Whether this identifier denotes a literal vertex.
    pub fn is_literal(&self) -> bool {
        self.kind() == Kind::Literal
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, yielding the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Split a literal identifier into its components. Returns None for
    /// non-literal or malformed identifiers.
    pub fn literal_parts(&self) -> Option<LiteralParts<'_>> {
        let rest = self.0.strip_prefix(PREFIX_LITERAL)?;
        let mut fields = rest.splitn(3, ':');
        let datatype_id = fields.next()?.parse().ok()?;
        let value_hash = fields.next()?;
        let graph = fields.next()?;
        if value_hash.is_empty() || graph.is_empty() {
            return None;
        }
        Some(LiteralParts {
            datatype_id,
            value_hash,
            graph,
        })
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Ident {
    fn from(value: String) -> Self {
        Ident(value)
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident(value.to_owned())
    }
}

/// Components of a literal vertex identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralParts<'a> {
    /// Catalog datatype id; 0 for non-catalog datatypes.
    pub datatype_id: u8,
    /// Hex digest of the canonical value.
    pub value_hash: &'a str,
    /// Identifier of the owning graph.
    pub graph: &'a str,
}

impl LiteralParts<'_> {
    /// Key of the globally shared value blob (the identifier minus its
    /// graph suffix).
    pub fn value_key(&self) -> String {
        literal_value_key(self.datatype_id, self.value_hash)
    }
}

/// Key of the global value blob for a (datatype id, value hash) pair.
pub fn literal_value_key(datatype_id: u8, value_hash: &str) -> String {
    format!("{PREFIX_LITERAL}{datatype_id}:{value_hash}")
}

/// SHA-256 digest of a canonical value, rendered as 64 lowercase hex
/// characters for use inside composite keys.
pub fn value_hash(canonical: &str) -> String {
    let digest = Sha256::digest(canonical.as_bytes());
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
