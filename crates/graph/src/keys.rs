//! Key layout for the key-value encoding.
//!
//! The layout is fixed for interop with existing deployments:
//!
//! | purpose | key |
//! |---|---|
//! | graph registry | `__graphs__` |
//! | id counter | `__construct_id__` |
//! | graph vertex set | `g:<graphId>:vertices` |
//! | graph edge set | `g:<graphId>:edges` |
//! | outgoing index | `<id>:oe` |
//! | ingoing index | `<id>:ie` |
//!
//! Edge structure, literal identifiers, and the global literal value blob
//! use the identifier scheme of `weft_core::ident` directly.

use weft_core::{WeftError, WeftResult};

/// Registry set holding every graph identifier.
pub const GRAPHS_KEY: &str = "__graphs__";

/// Store-wide monotonic identifier counter.
pub const COUNTER_KEY: &str = "__construct_id__";

/// Membership set of a graph's vertices.
pub fn vertex_set_key(graph: &str) -> String {
    format!("g:{graph}:vertices")
}

/// Membership set of a graph's edges.
pub fn edge_set_key(graph: &str) -> String {
    format!("g:{graph}:edges")
}

/// Outgoing-edge index of a vertex.
pub fn outgoing_key(id: &str) -> String {
    format!("{id}:oe")
}

/// Ingoing-edge index of a vertex or edge.
pub fn ingoing_key(id: &str) -> String {
    format!("{id}:ie")
}

/// Validate a graph identifier before it is embedded in keys.
pub fn validate_graph_id(id: &str) -> WeftResult<()> {
    if id.is_empty() {
        return Err(WeftError::invalid_input(
            "graph identifier must not be empty",
        ));
    }
    if id.contains(':') {
        return Err(WeftError::invalid_input(
            "graph identifier must not contain ':'",
        ));
    }
    Ok(())
}
