//! Hypergraph algebra.
//!
//! [`GraphRead`] and [`GraphWrite`] split the graph surface into two
//! capability levels. The *required* methods of each trait form the
//! minimal primitive interface a backend must provide; everything else is
//! a *provided* method derived purely from those primitives, so any
//! conforming backend gets the whole algebra — neighbourhoods, degrees,
//! rank, uniformity, merging, cascading deletion — for free.
//!
//! Backends may override a provided method when the store can answer it
//! more directly (the key-value backend overrides `card` with an
//! ordered-set count, for example), but the observable behavior must not
//! change.

use std::collections::HashSet;

use weft_core::{xsd, Ident, Kind, Literal, WeftError, WeftResult};

/// Read capability: the primitive accessors plus the derived read algebra.
pub trait GraphRead {
    /// The unique identifier of this graph.
    fn identifier(&self) -> &str;

    /// The head (source vertex) of an edge, or None if the edge does not
    /// exist.
    fn head(&self, edge: &Ident) -> WeftResult<Option<Ident>>;

    /// The tail (target set) of an edge. A self-loop reports its head as
    /// its only tail member; a missing edge reports an empty tail.
    fn tail(&self, edge: &Ident) -> WeftResult<Vec<Ident>>;

    /// All edges whose tail contains any of `ids`.
    fn ingoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>>;

    /// All edges whose head is any of `ids`.
    fn outgoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>>;

    /// All vertex identifiers in this graph.
    fn vertices(&self) -> WeftResult<HashSet<Ident>>;

    /// All edge identifiers in this graph.
    fn edges(&self) -> WeftResult<HashSet<Ident>>;

    /// The (value, datatype) pair bound to a literal vertex, or None for
    /// non-literal or unknown identifiers.
    fn literal(&self, id: &Ident) -> WeftResult<Option<Literal>>;

    /// The literal vertex for a value, or None if this graph holds no such
    /// vertex. A missing datatype means `xsd:string`.
    fn find_vertex(&self, value: &str, datatype: Option<&str>) -> WeftResult<Option<Ident>>;

    /// Whether `id` is a current vertex or edge of this graph.
    fn contains(&self, id: &Ident) -> WeftResult<bool>;

    // =========================================================================
    // Derived read operations
    // =========================================================================

    /// Kind of an identifier. Structural; never touches the store.
    fn kind(&self, id: &Ident) -> Kind {
        id.kind()
    }

    /// Whether `id` denotes an edge.
    fn is_edge(&self, id: &Ident) -> bool {
        self.kind(id) == Kind::Edge
    }

    /// Whether `id` denotes a vertex (plain or literal).
    fn is_vertex(&self, id: &Ident) -> bool {
        matches!(self.kind(id), Kind::Vertex | Kind::Literal)
    }

    /// Whether `id` denotes a literal vertex.
    fn is_literal(&self, id: &Ident) -> bool {
        self.kind(id) == Kind::Literal
    }

    /// Value part of a literal vertex.
    fn value(&self, id: &Ident) -> WeftResult<Option<String>> {
        Ok(self.literal(id)?.map(|literal| literal.value))
    }

    /// Datatype part of a literal vertex.
    fn datatype(&self, id: &Ident) -> WeftResult<Option<String>> {
        Ok(self.literal(id)?.map(|literal| literal.datatype))
    }

    /// Find an `xsd:string` literal vertex.
    fn find_string_vertex(&self, value: &str) -> WeftResult<Option<Ident>> {
        self.find_vertex(value, Some(xsd::STRING))
    }

    /// Find an `xsd:integer` literal vertex.
    fn find_integer_vertex(&self, value: i64) -> WeftResult<Option<Ident>> {
        self.find_vertex(&value.to_string(), Some(xsd::INTEGER))
    }

    /// Find an `xsd:anyURI` literal vertex.
    fn find_iri_vertex(&self, value: &str) -> WeftResult<Option<Ident>> {
        self.find_vertex(value, Some(xsd::ANY_URI))
    }

    /// Heads of all edges pointing at `ids`.
    fn predecessors(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        let mut result = HashSet::new();
        for edge in self.ingoing_edges(ids)? {
            if let Some(head) = self.head(&edge)? {
                result.insert(head);
            }
        }
        Ok(result)
    }

    /// Union of the tails of all edges leaving `ids`.
    fn successors(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        let mut result = HashSet::new();
        for edge in self.outgoing_edges(ids)? {
            result.extend(self.tail(&edge)?);
        }
        Ok(result)
    }

    /// Everything connected to `ids` in either direction.
    fn neighbours(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        let mut result = self.predecessors(ids)?;
        result.extend(self.successors(ids)?);
        Ok(result)
    }

    /// Whether `b` is a neighbour of `a`.
    fn is_neighbour(&self, a: &Ident, b: &Ident) -> WeftResult<bool> {
        Ok(self.neighbours(&[a])?.contains(b))
    }

    /// Cardinality of an edge: the number of distinct endpoints it
    /// touches. A self-loop has cardinality 1.
    fn card(&self, edge: &Ident) -> WeftResult<u64> {
        Ok(self.edge_incidents(edge)?.len() as u64)
    }

    /// Maximum edge cardinality, or 0 for an empty edge set.
    fn rank(&self) -> WeftResult<u64> {
        let mut rank = 0;
        for edge in self.edges()? {
            rank = rank.max(self.card(&edge)?);
        }
        Ok(rank)
    }

    /// Minimum edge cardinality, or 0 for an empty edge set.
    fn corank(&self) -> WeftResult<u64> {
        let mut corank: Option<u64> = None;
        for edge in self.edges()? {
            let card = self.card(&edge)?;
            corank = Some(corank.map_or(card, |current| current.min(card)));
        }
        Ok(corank.unwrap_or(0))
    }

    /// Number of edges whose tail contains `id`.
    fn indegree(&self, id: &Ident) -> WeftResult<u64> {
        Ok(self.ingoing_edges(&[id])?.len() as u64)
    }

    /// Number of edges whose head is `id`.
    fn outdegree(&self, id: &Ident) -> WeftResult<u64> {
        Ok(self.outgoing_edges(&[id])?.len() as u64)
    }

    /// Number of edges touching `id` in either direction.
    fn degree(&self, id: &Ident) -> WeftResult<u64> {
        Ok(self.indegree(id)? + self.outdegree(id)?)
    }

    /// Whether every edge has the same cardinality — equal to `k` when one
    /// is given. An empty edge set is uniform for any `k`.
    fn is_uniform(&self, k: Option<u64>) -> WeftResult<bool> {
        let mut expected = k;
        for edge in self.edges()? {
            let card = self.card(&edge)?;
            match expected {
                None => expected = Some(card),
                Some(required) if required != card => return Ok(false),
                Some(_) => {}
            }
        }
        Ok(true)
    }

    /// Head and tail of an edge as one set.
    fn edge_incidents(&self, edge: &Ident) -> WeftResult<HashSet<Ident>> {
        let mut incidents: HashSet<Ident> = self.tail(edge)?.into_iter().collect();
        if let Some(head) = self.head(edge)? {
            incidents.insert(head);
        }
        Ok(incidents)
    }

    /// Whether the edge touches every one of `ids`.
    fn edge_contains(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<bool> {
        let incidents = self.edge_incidents(edge)?;
        Ok(ids.iter().all(|id| incidents.contains(*id)))
    }

    /// All edges from `head` whose tail contains `tail`.
    fn edges_between(&self, head: &Ident, tail: &Ident) -> WeftResult<HashSet<Ident>> {
        let outgoing = self.outgoing_edges(&[head])?;
        let ingoing = self.ingoing_edges(&[tail])?;
        Ok(outgoing.intersection(&ingoing).cloned().collect())
    }

    /// One edge from `head` whose tail contains `tail`, or None. When
    /// several exist the choice is arbitrary. Direction-sensitive.
    fn edge_between(&self, head: &Ident, tail: &Ident) -> WeftResult<Option<Ident>> {
        Ok(self.edges_between(head, tail)?.into_iter().next())
    }

    /// Number of vertices in this graph.
    fn vertex_count(&self) -> WeftResult<u64> {
        Ok(self.vertices()?.len() as u64)
    }
}

/// Write capability: the primitive mutators plus the derived write algebra.
pub trait GraphWrite: GraphRead {
    /// Create a fresh anonymous vertex.
    fn create_vertex(&self) -> WeftResult<Ident>;

    /// Create (or find) the literal vertex for a value. Idempotent by
    /// content: equal (canonical value, datatype) pairs yield the same
    /// identifier. A missing datatype means `xsd:string`.
    fn create_literal_vertex(&self, value: &str, datatype: Option<&str>) -> WeftResult<Ident>;

    /// Create an edge from `head` to the non-empty target set `tail`.
    fn create_edge(&self, head: &Ident, tail: &[&Ident]) -> WeftResult<Ident>;

    /// Add targets to an edge's tail.
    fn add_tail(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<()>;

    /// Remove targets from an edge's tail. The head is not removable and
    /// the tail must not become empty.
    fn remove_tail(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<()>;

    /// Delete a vertex, cascading to every edge incident to it.
    fn delete_vertex(&self, id: &Ident) -> WeftResult<()>;

    /// Delete an edge. Deleting an edge that no longer exists is a no-op.
    fn delete_edge(&self, id: &Ident) -> WeftResult<()>;

    /// Remove all vertices and edges from this graph.
    fn clear(&self) -> WeftResult<()>;

    // =========================================================================
    // Derived write operations
    // =========================================================================

    /// Create (or find) an `xsd:string` literal vertex.
    fn create_string_vertex(&self, value: &str) -> WeftResult<Ident> {
        self.create_literal_vertex(value, Some(xsd::STRING))
    }

    /// Create (or find) an `xsd:integer` literal vertex.
    fn create_integer_vertex(&self, value: i64) -> WeftResult<Ident> {
        self.create_literal_vertex(&value.to_string(), Some(xsd::INTEGER))
    }

    /// Create (or find) an `xsd:anyURI` literal vertex.
    fn create_iri_vertex(&self, value: &str) -> WeftResult<Ident> {
        self.create_literal_vertex(value, Some(xsd::ANY_URI))
    }

    /// Replace an edge's whole tail: a new edge with the same head and the
    /// given targets supersedes the old one. Returns the new identifier.
    fn replace_tail(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<Ident> {
        let head = self
            .head(edge)?
            .ok_or_else(|| WeftError::NotAnEdge(edge.to_string()))?;
        let replacement = self.create_edge(&head, ids)?;
        self.delete_edge(edge)?;
        Ok(replacement)
    }

    /// Merge vertex `b` into vertex `a`.
    ///
    /// If exactly one of the two is a literal vertex, the literal survives
    /// regardless of argument order; merging two literals fails with
    /// [`WeftError::IncompatibleMerge`]. Edges directly between the two are
    /// deleted (they do not become self-loops); every other incident edge
    /// is rewired with the survivor replacing the non-survivor in head and
    /// tail position. Returns the surviving identifier.
    ///
    /// Composed of several sequential batches; a failure partway leaves a
    /// legal intermediate state, and retrying the merge is safe.
    fn merge_vertices(&self, a: &Ident, b: &Ident) -> WeftResult<Ident> {
        if a == b {
            return Ok(a.clone());
        }
        let (a_literal, b_literal) = (self.is_literal(a), self.is_literal(b));
        if a_literal && b_literal {
            return Err(WeftError::IncompatibleMerge);
        }
        let (survivor, doomed) = if b_literal { (b, a) } else { (a, b) };

        let mut direct = self.edges_between(survivor, doomed)?;
        direct.extend(self.edges_between(doomed, survivor)?);
        for edge in &direct {
            self.delete_edge(edge)?;
        }

        let mut incident = self.ingoing_edges(&[doomed])?;
        incident.extend(self.outgoing_edges(&[doomed])?);
        for edge in &incident {
            let head = match self.head(edge)? {
                Some(head) if head == *doomed => survivor.clone(),
                Some(head) => head,
                None => continue,
            };
            let tail: HashSet<Ident> = self
                .tail(edge)?
                .into_iter()
                .map(|target| {
                    if target == *doomed {
                        survivor.clone()
                    } else {
                        target
                    }
                })
                .collect();
            let targets: Vec<&Ident> = tail.iter().collect();
            self.create_edge(&head, &targets)?;
        }
        tracing::debug!(
            survivor = %survivor,
            merged = %doomed,
            rewired = incident.len(),
            "merged vertices"
        );
        self.delete_vertex(doomed)?;
        Ok(survivor.clone())
    }

    /// Delete a vertex or an edge, dispatching on the identifier's kind.
    fn delete(&self, id: &Ident) -> WeftResult<()> {
        match self.kind(id) {
            Kind::Edge => self.delete_edge(id),
            Kind::Vertex | Kind::Literal => self.delete_vertex(id),
            Kind::Unknown => Err(WeftError::NotAVertex(id.to_string())),
        }
    }
}
