//! Directed-graph export.
//!
//! Projects the 2-ary subset of a hypergraph into a
//! [`petgraph::graph::DiGraph`]. Nodes are literal (value, datatype) pairs
//! where the incident identifier is a literal vertex and the raw
//! identifier otherwise, so two edges touching the same literal share one
//! exported node.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use weft_core::{Ident, Literal, WeftError, WeftResult};

use crate::algebra::GraphRead;

/// Node weight in an exported directed graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportNode {
    /// The incident was a literal vertex.
    Literal(Literal),
    /// The incident was a plain vertex or an edge.
    Ident(Ident),
}

/// Convert a graph into a directed graph.
///
/// Fails with [`WeftError::NonUniformGraph`] if any edge's cardinality is
/// not 2. Edge weights carry the originating edge identifier.
pub fn to_digraph<G: GraphRead>(graph: &G) -> WeftResult<DiGraph<ExportNode, Ident>> {
    let mut digraph = DiGraph::new();
    let mut nodes: HashMap<ExportNode, NodeIndex> = HashMap::new();
    for edge in graph.edges()? {
        if graph.card(&edge)? != 2 {
            return Err(WeftError::NonUniformGraph);
        }
        let head = graph
            .head(&edge)?
            .ok_or_else(|| WeftError::NotAnEdge(edge.to_string()))?;
        let target = graph
            .tail(&edge)?
            .into_iter()
            .next()
            .ok_or_else(|| WeftError::NotAnEdge(edge.to_string()))?;
        let source_index = intern(&mut digraph, &mut nodes, export_node(graph, &head)?);
        let target_index = intern(&mut digraph, &mut nodes, export_node(graph, &target)?);
        digraph.add_edge(source_index, target_index, edge);
    }
    Ok(digraph)
}

fn export_node<G: GraphRead>(graph: &G, id: &Ident) -> WeftResult<ExportNode> {
    Ok(match graph.literal(id)? {
        Some(literal) => ExportNode::Literal(literal),
        None => ExportNode::Ident(id.clone()),
    })
}

fn intern(
    digraph: &mut DiGraph<ExportNode, Ident>,
    nodes: &mut HashMap<ExportNode, NodeIndex>,
    node: ExportNode,
) -> NodeIndex {
    match nodes.get(&node) {
        Some(index) => *index,
        None => {
            let index = digraph.add_node(node.clone());
            nodes.insert(node, index);
            index
        }
    }
}
