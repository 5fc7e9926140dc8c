//! Weft: a hypergraph data model with a pluggable key-value persistence
//! backend.
//!
//! This crate re-exports the public surface of the member crates with a
//! clean unified interface.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use weftdb::{Connection, GraphRead, GraphWrite, MemoryStore};
//!
//! let conn = Connection::open(Arc::new(MemoryStore::new()));
//! let graph = conn.create_graph(Some("people"))?;
//!
//! let alice = graph.create_string_vertex("Alice")?;
//! let bob = graph.create_vertex()?;
//! let carol = graph.create_vertex()?;
//! let knows = graph.create_edge(&alice, &[&bob, &carol])?;
//!
//! assert_eq!(graph.card(&knows)?, 3);
//! assert!(graph.is_neighbour(&alice, &bob)?);
//! # Ok::<(), weftdb::WeftError>(())
//! ```

// Core value and identifier types
pub use weft_core::{Ident, Kind, Literal, WeftError, WeftResult};

// Canonicalization and the datatype catalog
pub use weft_core::{c14n, xsd};

// Store protocol and the in-memory reference store
pub use weft_store::{Batch, Command, MemoryStore, Reply, Score, Store};

// Graph algebra, backend, registry, and export
pub use weft_graph::{
    to_digraph, Connection, ConnectionOptions, ExportNode, Graph, GraphRead, GraphView,
    GraphWrite,
};
