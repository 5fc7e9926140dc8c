//! Error taxonomy shared by every weft crate.
//!
//! All caller-visible failures funnel through [`WeftError`]; validation
//! errors are raised before any store write is issued.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type WeftResult<T> = Result<T, WeftError>;

/// Unified error type.
#[derive(Debug, Error)]
pub enum WeftError {
    /// A graph with the given identifier is already registered.
    #[error("graph already exists: {0}")]
    GraphAlreadyExists(String),

    /// No graph with the given identifier is registered.
    #[error("unknown graph: {0}")]
    UnknownGraph(String),

    /// The head of an edge must be a vertex (plain or literal), never an
    /// edge or a foreign identifier.
    #[error("illegal edge head: {0}")]
    IllegalEdgeHead(String),

    /// A tail entry was not a recognizable vertex or edge identifier.
    #[error("illegal tail member: {0}")]
    IllegalTailMember(String),

    /// An edge's tail is never empty: raised when creating an edge with
    /// no targets or when removal would drain the tail.
    #[error("edge tail must not be empty ({0})")]
    EmptyTail(String),

    /// The head of an edge cannot be removed via `remove_tail`.
    #[error("cannot remove the head from the tail of edge {0}")]
    HeadNotRemovable(String),

    /// Two literal vertices cannot be merged.
    #[error("cannot merge two literal vertices")]
    IncompatibleMerge,

    /// A vertex-typed operation received a non-vertex identifier.
    #[error("not a vertex: {0}")]
    NotAVertex(String),

    /// An edge-typed operation received a non-edge identifier.
    #[error("not an edge: {0}")]
    NotAnEdge(String),

    /// A literal value does not conform to the lexical space of its
    /// datatype.
    #[error("malformed {datatype} value: \"{value}\"")]
    MalformedValue { datatype: String, value: String },

    /// The export adapter only accepts 2-uniform graphs.
    #[error("graph is not 2-uniform")]
    NonUniformGraph,

    /// A mutating operation was issued through a read-only connection.
    #[error("connection is read-only")]
    ReadOnly,

    /// Input failed validation before reaching the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A store key holds an entry of a different primitive type.
    #[error("wrong entry type at key: {0}")]
    WrongType(String),

    /// Backend/store level failure.
    #[error("store error: {0}")]
    Store(String),
}

impl WeftError {
    /// Create a MalformedValue error.
    pub fn malformed_value(datatype: impl Into<String>, value: impl Into<String>) -> Self {
        WeftError::MalformedValue {
            datatype: datatype.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        WeftError::InvalidInput(msg.into())
    }

    /// Create a WrongType error.
    pub fn wrong_type(key: impl Into<String>) -> Self {
        WeftError::WrongType(key.into())
    }

    /// Create a Store error.
    pub fn store(msg: impl Into<String>) -> Self {
        WeftError::Store(msg.into())
    }
}
