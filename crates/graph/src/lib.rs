//! Hypergraph data model persisted onto a generic key-value store.
//!
//! Edges connect one head vertex to a non-empty set of tail targets, which
//! may themselves be vertices or other edges. The algebra
//! ([`algebra::GraphRead`]/[`algebra::GraphWrite`]) is derived from a small
//! primitive interface; [`backend`] encodes those primitives onto any
//! [`weft_store::Store`]; [`connection`] manages the namespace of graphs
//! inside one store instance.

pub mod algebra;
pub mod backend;
pub mod connection;
pub mod export;
pub mod keys;

pub use algebra::{GraphRead, GraphWrite};
pub use backend::{Graph, GraphView};
pub use connection::{Connection, ConnectionOptions};
pub use export::{to_digraph, ExportNode};
