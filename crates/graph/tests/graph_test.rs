//! Graph algebra and backend integration tests.
//!
//! Every test runs the full stack — algebra traits over the key-value
//! backend over the in-memory reference store.

use std::sync::Arc;

use weft_core::{xsd, Ident, Kind, WeftError};
use weft_graph::{Connection, Graph, GraphRead, GraphWrite};
use weft_store::MemoryStore;

fn empty_graph() -> Graph<MemoryStore> {
    let conn = Connection::open(Arc::new(MemoryStore::new()));
    conn.create_graph(Some("g")).unwrap()
}

#[test]
fn test_kind_vertex() {
    let g = empty_graph();
    let v = g.create_vertex().unwrap();
    assert!(g.is_vertex(&v));
    assert!(!g.is_edge(&v));
    assert!(!g.is_literal(&v));
    assert_eq!(g.kind(&v), Kind::Vertex);
}

#[test]
fn test_kind_edge() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert!(g.is_edge(&e));
    assert!(!g.is_vertex(&e));
    assert_eq!(g.kind(&e), Kind::Edge);
}

#[test]
fn test_kind_literal() {
    let g = empty_graph();
    let v = g.create_string_vertex("Pumuckl").unwrap();
    assert!(g.is_literal(&v));
    assert!(g.is_vertex(&v));
    assert_eq!(g.kind(&v), Kind::Literal);
}

#[test]
fn test_kind_foreign() {
    let g = empty_graph();
    assert_eq!(g.kind(&Ident::from("garbage")), Kind::Unknown);
}

#[test]
fn test_create_vertex() {
    let g = empty_graph();
    let v = g.create_vertex().unwrap();
    assert!(g.contains(&v).unwrap());
    assert!(g.vertices().unwrap().contains(&v));
    assert_eq!(g.vertex_count().unwrap(), 1);
}

#[test]
fn test_create_string_vertex() {
    let g = empty_graph();
    assert!(g.find_string_vertex("hello").unwrap().is_none());
    let v1 = g.create_string_vertex("hello").unwrap();
    let v2 = g.create_string_vertex("hello").unwrap();
    assert_eq!(v1, v2);
    assert_eq!(g.find_string_vertex("hello").unwrap(), Some(v1.clone()));
    let literal = g.literal(&v1).unwrap().unwrap();
    assert_eq!(literal.value, "hello");
    assert_eq!(literal.datatype, xsd::STRING);
    assert_eq!(g.value(&v1).unwrap().unwrap(), "hello");
    assert_eq!(g.datatype(&v1).unwrap().unwrap(), xsd::STRING);
}

#[test]
fn test_create_integer_vertex() {
    let g = empty_graph();
    assert!(g.find_integer_vertex(666).unwrap().is_none());
    let v1 = g.create_integer_vertex(666).unwrap();
    let v2 = g.create_integer_vertex(666).unwrap();
    assert_eq!(v1, v2);
    assert_eq!(g.find_integer_vertex(666).unwrap(), Some(v1.clone()));
    let literal = g.literal(&v1).unwrap().unwrap();
    assert_eq!(literal.value, "666");
    assert_eq!(literal.datatype, xsd::INTEGER);
}

/// Distinct lexical forms of one value converge on one identifier.
#[test]
fn test_literal_canonicalization_dedup() {
    let g = empty_graph();
    let v1 = g
        .create_literal_vertex("0001", Some(xsd::INTEGER))
        .unwrap();
    let v2 = g.create_literal_vertex("+1", Some(xsd::INTEGER)).unwrap();
    assert_eq!(v1, v2);
    assert_eq!(g.value(&v1).unwrap().unwrap(), "1");

    let d1 = g.create_literal_vertex("1", Some(xsd::DECIMAL)).unwrap();
    let d2 = g
        .create_literal_vertex("1.000", Some(xsd::DECIMAL))
        .unwrap();
    assert_eq!(d1, d2);
    assert_eq!(g.value(&d1).unwrap().unwrap(), "1.0");
    // same value, different datatype: a different vertex
    assert_ne!(v1, d1);
}

#[test]
fn test_literal_with_extension_datatype() {
    let g = empty_graph();
    let datatype = "http://psi.example.org/datatype";
    let v1 = g.create_literal_vertex("0001", Some(datatype)).unwrap();
    let v2 = g.create_literal_vertex("0001", Some(datatype)).unwrap();
    assert_eq!(v1, v2);
    let literal = g.literal(&v1).unwrap().unwrap();
    // extension datatypes pass through canonicalization unchanged
    assert_eq!(literal.value, "0001");
    assert_eq!(literal.datatype, datatype);
    assert!(g.find_vertex("0001", Some(datatype)).unwrap().is_some());
}

#[test]
fn test_malformed_literal_is_rejected() {
    let g = empty_graph();
    let result = g.create_literal_vertex("-123.A", Some(xsd::DECIMAL));
    assert!(matches!(result, Err(WeftError::MalformedValue { .. })));
    assert_eq!(g.vertex_count().unwrap(), 0);
}

#[test]
fn test_create_edge() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert!(g.contains(&e).unwrap());
    assert!(g.edges().unwrap().contains(&e));
    assert_eq!(g.head(&e).unwrap(), Some(v1));
    assert_eq!(g.tail(&e).unwrap(), vec![v2]);
}

#[test]
fn test_edge_tail_many() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let v4 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2, &v3, &v4]).unwrap();
    let mut tail = g.tail(&e).unwrap();
    tail.sort();
    let mut expected = vec![v2, v3, v4];
    expected.sort();
    assert_eq!(tail, expected);
}

#[test]
fn test_edge_head_must_be_vertex() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert!(matches!(
        g.create_edge(&e, &[&v1]),
        Err(WeftError::IllegalEdgeHead(_))
    ));
    assert!(matches!(
        g.create_edge(&Ident::from("junk"), &[&v1]),
        Err(WeftError::IllegalEdgeHead(_))
    ));
    // a literal head is fine
    let lit = g.create_string_vertex("head").unwrap();
    assert!(g.create_edge(&lit, &[&v1]).is_ok());
}

#[test]
fn test_edge_tail_members_are_validated() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    assert!(matches!(
        g.create_edge(&v1, &[]),
        Err(WeftError::EmptyTail(_))
    ));
    assert!(matches!(
        g.create_edge(&v1, &[&Ident::from("")]),
        Err(WeftError::IllegalTailMember(_))
    ));
}

/// Hyperedges may reference edges in their tail.
#[test]
fn test_edge_as_tail_member() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e1 = g.create_edge(&v1, &[&v2]).unwrap();
    let e2 = g.create_edge(&v3, &[&e1]).unwrap();
    assert!(g.tail(&e2).unwrap().contains(&e1));
    assert_eq!(g.indegree(&e1).unwrap(), 1);
    assert!(g.ingoing_edges(&[&e1]).unwrap().contains(&e2));
}

#[test]
fn test_rank_card() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    assert_eq!(g.rank().unwrap(), 0);
    assert_eq!(g.corank().unwrap(), 0);
    let e1 = g.create_edge(&v1, &[&v2]).unwrap();
    assert_eq!(g.card(&e1).unwrap(), 2);
    assert_eq!(g.rank().unwrap(), 2);
    let e2 = g.create_edge(&v1, &[&v2, &v3]).unwrap();
    assert_eq!(g.card(&e2).unwrap(), 3);
    assert_eq!(g.rank().unwrap(), 3);
    assert_eq!(g.corank().unwrap(), 2);
    // deleting the highest-cardinality edge lowers the rank
    g.delete_edge(&e2).unwrap();
    assert_eq!(g.rank().unwrap(), 2);
}

#[test]
fn test_degree() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    for v in [&v1, &v2, &v3] {
        assert_eq!(g.degree(v).unwrap(), 0);
    }
    g.create_edge(&v1, &[&v2]).unwrap();
    assert_eq!(g.outdegree(&v1).unwrap(), 1);
    assert_eq!(g.indegree(&v1).unwrap(), 0);
    assert_eq!(g.degree(&v1).unwrap(), 1);
    assert_eq!(g.indegree(&v2).unwrap(), 1);
    assert_eq!(g.degree(&v2).unwrap(), 1);
    g.create_edge(&v1, &[&v2, &v3]).unwrap();
    assert_eq!(g.degree(&v1).unwrap(), 2);
    assert_eq!(g.degree(&v2).unwrap(), 2);
    assert_eq!(g.degree(&v3).unwrap(), 1);
}

/// A self-loop counts once as cardinality but twice as degree, and the
/// vertex is its own neighbour.
#[test]
fn test_self_loop() {
    let g = empty_graph();
    let v = g.create_vertex().unwrap();
    let e = g.create_edge(&v, &[&v]).unwrap();
    assert_eq!(g.card(&e).unwrap(), 1);
    assert_eq!(g.head(&e).unwrap(), Some(v.clone()));
    assert_eq!(g.tail(&e).unwrap(), vec![v.clone()]);
    assert_eq!(g.indegree(&v).unwrap(), 1);
    assert_eq!(g.outdegree(&v).unwrap(), 1);
    assert_eq!(g.degree(&v).unwrap(), 2);
    assert!(g.is_neighbour(&v, &v).unwrap());
}

#[test]
fn test_edge_incidents() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    let incidents = g.edge_incidents(&e).unwrap();
    assert!(incidents.contains(&v1));
    assert!(incidents.contains(&v2));
    assert!(!incidents.contains(&v3));
}

#[test]
fn test_edge_contains() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert!(g.edge_contains(&e, &[&v1]).unwrap());
    assert!(g.edge_contains(&e, &[&v2]).unwrap());
    assert!(g.edge_contains(&e, &[&v1, &v2]).unwrap());
    assert!(!g.edge_contains(&e, &[&v3]).unwrap());
    assert!(!g.edge_contains(&e, &[&v1, &v2, &v3]).unwrap());
}

#[test]
fn test_uniform() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let v4 = g.create_vertex().unwrap();
    // an empty edge set is uniform for any k
    assert!(g.is_uniform(None).unwrap());
    assert!(g.is_uniform(Some(2)).unwrap());
    g.create_edge(&v1, &[&v2]).unwrap();
    assert!(g.is_uniform(None).unwrap());
    assert!(g.is_uniform(Some(2)).unwrap());
    let e2 = g.create_edge(&v1, &[&v2, &v3]).unwrap();
    assert!(!g.is_uniform(None).unwrap());
    assert!(!g.is_uniform(Some(2)).unwrap());
    assert!(!g.is_uniform(Some(3)).unwrap());
    // removing the card-3 edge restores uniformity at k = 2
    g.delete_edge(&e2).unwrap();
    assert!(g.is_uniform(None).unwrap());
    assert!(g.is_uniform(Some(2)).unwrap());
    assert!(!g.is_uniform(Some(3)).unwrap());
    let e3 = g.create_edge(&v1, &[&v3, &v4]).unwrap();
    assert!(g.is_uniform(None).unwrap());
    assert!(g.is_uniform(Some(2)).unwrap());
    g.delete_edge(&e3).unwrap();
}

#[test]
fn test_neighbours() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    assert!(!g.is_neighbour(&v1, &v2).unwrap());
    g.create_edge(&v1, &[&v2]).unwrap();
    assert!(g.is_neighbour(&v1, &v2).unwrap());
    assert!(g.neighbours(&[&v2]).unwrap().contains(&v1));
    assert!(g.neighbours(&[&v1]).unwrap().contains(&v2));
    assert!(!g.neighbours(&[&v1]).unwrap().contains(&v3));
}

#[test]
fn test_predecessors_successors() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let v4 = g.create_vertex().unwrap();
    for v in [&v1, &v2, &v3, &v4] {
        assert!(g.predecessors(&[v]).unwrap().is_empty());
        assert!(g.successors(&[v]).unwrap().is_empty());
    }
    g.create_edge(&v1, &[&v2]).unwrap();
    g.create_edge(&v1, &[&v3]).unwrap();
    g.create_edge(&v3, &[&v4]).unwrap();
    assert!(g.predecessors(&[&v2]).unwrap().contains(&v1));
    assert!(g.predecessors(&[&v3]).unwrap().contains(&v1));
    assert!(g.predecessors(&[&v4]).unwrap().contains(&v3));
    let combined = g.predecessors(&[&v3, &v4]).unwrap();
    assert!(combined.contains(&v1));
    assert!(combined.contains(&v3));
    let successors = g.successors(&[&v1]).unwrap();
    assert!(successors.contains(&v2));
    assert!(successors.contains(&v3));
    assert!(!successors.contains(&v4));
}

#[test]
fn test_edge_between_honours_direction() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert_eq!(g.edge_between(&v1, &v2).unwrap(), Some(e));
    assert_eq!(g.edge_between(&v2, &v1).unwrap(), None);
}

#[test]
fn test_add_tail() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    g.add_tail(&e, &[&v3]).unwrap();
    assert_eq!(g.card(&e).unwrap(), 3);
    assert!(g.tail(&e).unwrap().contains(&v3));
    assert_eq!(g.indegree(&v3).unwrap(), 1);
    // unknown identifiers are rejected before anything is written
    assert!(matches!(
        g.add_tail(&e, &[&Ident::from("junk")]),
        Err(WeftError::IllegalTailMember(_))
    ));
    assert!(matches!(
        g.add_tail(&v1, &[&v3]),
        Err(WeftError::NotAnEdge(_))
    ));
}

#[test]
fn test_remove_tail() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2, &v3]).unwrap();
    g.remove_tail(&e, &[&v3]).unwrap();
    assert_eq!(g.card(&e).unwrap(), 2);
    assert_eq!(g.indegree(&v3).unwrap(), 0);
    assert!(!g.tail(&e).unwrap().contains(&v3));
}

#[test]
fn test_remove_tail_protects_head_and_last_member() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    assert!(matches!(
        g.remove_tail(&e, &[&v1]),
        Err(WeftError::HeadNotRemovable(_))
    ));
    assert!(matches!(
        g.remove_tail(&e, &[&v2]),
        Err(WeftError::EmptyTail(_))
    ));
    // nothing changed
    assert_eq!(g.card(&e).unwrap(), 2);
}

#[test]
fn test_replace_tail() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    let replacement = g.replace_tail(&e, &[&v3]).unwrap();
    assert_ne!(replacement, e);
    assert!(!g.contains(&e).unwrap());
    assert_eq!(g.head(&replacement).unwrap(), Some(v1));
    assert_eq!(g.tail(&replacement).unwrap(), vec![v3]);
    assert_eq!(g.indegree(&v2).unwrap(), 0);
}

/// Deleting a vertex removes every edge incident to it.
#[test]
fn test_delete_vertex_cascades() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let v3 = g.create_vertex().unwrap();
    let e1 = g.create_edge(&v1, &[&v2]).unwrap();
    let e2 = g.create_edge(&v3, &[&v2]).unwrap();
    let e3 = g.create_edge(&v2, &[&v3]).unwrap();
    let untouched = g.create_edge(&v1, &[&v3]).unwrap();
    g.delete_vertex(&v2).unwrap();
    for e in [&e1, &e2, &e3] {
        assert!(!g.contains(e).unwrap());
    }
    assert!(g.contains(&untouched).unwrap());
    assert!(!g.contains(&v2).unwrap());
    assert_eq!(g.indegree(&v2).unwrap(), 0);
    assert_eq!(g.degree(&v3).unwrap(), 1);
}

#[test]
fn test_delete_checks_kinds() {
    let g = empty_graph();
    let v = g.create_vertex().unwrap();
    let e = g.create_edge(&v, &[&v]).unwrap();
    assert!(matches!(g.delete_vertex(&e), Err(WeftError::NotAVertex(_))));
    assert!(matches!(g.delete_edge(&v), Err(WeftError::NotAnEdge(_))));
    assert!(matches!(
        g.delete(&Ident::from("junk")),
        Err(WeftError::NotAVertex(_))
    ));
    // dispatching delete works for both kinds
    g.delete(&e).unwrap();
    g.delete(&v).unwrap();
    assert_eq!(g.vertex_count().unwrap(), 0);
}

#[test]
fn test_delete_edge_twice_is_noop() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_vertex().unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    g.delete_edge(&e).unwrap();
    g.delete_edge(&e).unwrap();
    assert!(!g.contains(&e).unwrap());
    assert_eq!(g.degree(&v1).unwrap(), 0);
}

/// Merging two plain vertices connected by an edge drops the edge and
/// shrinks the graph by one vertex.
#[test]
fn test_merge_vertices() {
    let g = empty_graph();
    let a = g.create_vertex().unwrap();
    let b = g.create_vertex().unwrap();
    g.create_edge(&a, &[&b]).unwrap();
    let before = g.vertex_count().unwrap();
    let survivor = g.merge_vertices(&a, &b).unwrap();
    assert_eq!(survivor, a);
    assert_eq!(g.vertex_count().unwrap(), before - 1);
    assert_eq!(g.indegree(&a).unwrap(), 0);
    assert_eq!(g.outdegree(&a).unwrap(), 0);
    assert!(g.edges().unwrap().is_empty());
    assert!(!g.contains(&b).unwrap());
}

#[test]
fn test_merge_rewires_incident_edges() {
    let g = empty_graph();
    let a = g.create_vertex().unwrap();
    let b = g.create_vertex().unwrap();
    let c = g.create_vertex().unwrap();
    let d = g.create_vertex().unwrap();
    g.create_edge(&c, &[&b]).unwrap();
    g.create_edge(&b, &[&d]).unwrap();
    g.merge_vertices(&a, &b).unwrap();
    assert!(!g.contains(&b).unwrap());
    assert!(g.is_neighbour(&c, &a).unwrap());
    assert!(g.edge_between(&c, &a).unwrap().is_some());
    assert!(g.edge_between(&a, &d).unwrap().is_some());
    assert_eq!(g.indegree(&b).unwrap(), 0);
}

#[test]
fn test_merge_rewires_self_loop() {
    let g = empty_graph();
    let a = g.create_vertex().unwrap();
    let b = g.create_vertex().unwrap();
    g.create_edge(&b, &[&b]).unwrap();
    g.merge_vertices(&a, &b).unwrap();
    assert!(!g.contains(&b).unwrap());
    assert!(g.is_neighbour(&a, &a).unwrap());
    assert_eq!(g.edges().unwrap().len(), 1);
}

#[test]
fn test_merge_literal_survives() {
    let g = empty_graph();
    let plain = g.create_vertex().unwrap();
    let literal = g.create_string_vertex("keep me").unwrap();
    let c = g.create_vertex().unwrap();
    g.create_edge(&c, &[&plain]).unwrap();
    // the literal survives even as the second argument
    let survivor = g.merge_vertices(&plain, &literal).unwrap();
    assert_eq!(survivor, literal);
    assert!(!g.contains(&plain).unwrap());
    assert!(g.edge_between(&c, &literal).unwrap().is_some());
}

#[test]
fn test_merge_two_literals_fails() {
    let g = empty_graph();
    let l1 = g.create_string_vertex("a").unwrap();
    let l2 = g.create_string_vertex("b").unwrap();
    let before = g.vertex_count().unwrap();
    assert!(matches!(
        g.merge_vertices(&l1, &l2),
        Err(WeftError::IncompatibleMerge)
    ));
    // both untouched
    assert_eq!(g.vertex_count().unwrap(), before);
    assert!(g.contains(&l1).unwrap());
    assert!(g.contains(&l2).unwrap());
}

#[test]
fn test_merge_same_vertex_is_noop() {
    let g = empty_graph();
    let v = g.create_vertex().unwrap();
    assert_eq!(g.merge_vertices(&v, &v).unwrap(), v);
    assert!(g.contains(&v).unwrap());
}

#[test]
fn test_clear() {
    let g = empty_graph();
    let v1 = g.create_vertex().unwrap();
    let v2 = g.create_string_vertex("lit").unwrap();
    let e = g.create_edge(&v1, &[&v2]).unwrap();
    g.clear().unwrap();
    assert_eq!(g.vertex_count().unwrap(), 0);
    assert!(g.edges().unwrap().is_empty());
    assert!(!g.contains(&v1).unwrap());
    assert!(!g.contains(&e).unwrap());
}

#[test]
fn test_identifier() {
    let g = empty_graph();
    assert_eq!(g.identifier(), "g");
}
