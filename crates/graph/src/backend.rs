//! Key-value storage backend.
//!
//! [`GraphView`] implements the primitive read interface over any
//! [`Store`]; [`Graph`] composes a view and adds the write interface. An
//! edge's structure is one ordered set keyed by the edge identifier: the
//! head has score 0 and every tail member score 1, so the head is the
//! rank-0 member and the tail is the score-≥1 range. A self-loop stores
//! its single member at score 0 and reports it as the tail through the
//! empty-range fallback.
//!
//! Multi-key mutations go through one batch each. Compound operations
//! (cascading vertex deletion, merging) issue several sequential batches
//! and are not atomic end-to-end; every constituent step is idempotent, so
//! retrying a failed compound operation is safe.

use std::collections::HashSet;
use std::sync::Arc;

use weft_core::{c14n, ident, xsd, Ident, Kind, Literal, WeftError, WeftResult};
use weft_store::{Batch, Score, Store};

use crate::algebra::{GraphRead, GraphWrite};
use crate::keys;

/// Read-only handle onto one named graph.
pub struct GraphView<S> {
    store: Arc<S>,
    identifier: String,
    vertex_key: String,
    edge_key: String,
}

impl<S> Clone for GraphView<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            identifier: self.identifier.clone(),
            vertex_key: self.vertex_key.clone(),
            edge_key: self.edge_key.clone(),
        }
    }
}

impl<S: Store> GraphView<S> {
    pub(crate) fn new(store: Arc<S>, identifier: &str) -> Self {
        Self {
            vertex_key: keys::vertex_set_key(identifier),
            edge_key: keys::edge_set_key(identifier),
            identifier: identifier.to_owned(),
            store,
        }
    }

    /// Resolve a (value, datatype) pair to its per-graph literal
    /// identifier, the global value key, and the blob stored there.
    ///
    /// Catalog datatypes hash the canonical value alone. Non-catalog
    /// datatypes have no stable small id, so they use id 0 and fold the
    /// datatype IRI into both the hash and the blob (an IRI cannot contain
    /// a newline, so the separator is unambiguous).
    fn literal_id(&self, value: &str, datatype: &str) -> WeftResult<(Ident, String, String)> {
        let canonical = c14n::canonicalize(value, datatype)?;
        let (datatype_id, blob) = match xsd::datatype_id(datatype) {
            Some(id) => (id, canonical),
            None => (0, format!("{datatype}\n{canonical}")),
        };
        let hash = ident::value_hash(&blob);
        let value_key = ident::literal_value_key(datatype_id, &hash);
        let id = Ident::literal(datatype_id, &hash, &self.identifier);
        Ok((id, value_key, blob))
    }
}

impl<S: Store> GraphRead for GraphView<S> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn head(&self, edge: &Ident) -> WeftResult<Option<Ident>> {
        Ok(self
            .store
            .zset_range(edge.as_str(), 0, 0)?
            .into_iter()
            .next()
            .map(Ident::from))
    }

    fn tail(&self, edge: &Ident) -> WeftResult<Vec<Ident>> {
        let members = self.store.zset_range(edge.as_str(), 1, -1)?;
        if members.is_empty() {
            // the score-≥1 range is empty iff the edge is a loop (or gone);
            // a loop's head doubles as its tail
            return Ok(self.head(edge)?.into_iter().collect());
        }
        Ok(members.into_iter().map(Ident::from).collect())
    }

    fn ingoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        let index_keys: Vec<String> = ids.iter().map(|id| keys::ingoing_key(id.as_str())).collect();
        Ok(self
            .store
            .set_union(&index_keys)?
            .into_iter()
            .map(Ident::from)
            .collect())
    }

    fn outgoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        let index_keys: Vec<String> = ids.iter().map(|id| keys::outgoing_key(id.as_str())).collect();
        Ok(self
            .store
            .set_union(&index_keys)?
            .into_iter()
            .map(Ident::from)
            .collect())
    }

    fn vertices(&self) -> WeftResult<HashSet<Ident>> {
        Ok(self
            .store
            .set_members(&self.vertex_key)?
            .into_iter()
            .map(Ident::from)
            .collect())
    }

    fn edges(&self) -> WeftResult<HashSet<Ident>> {
        Ok(self
            .store
            .set_members(&self.edge_key)?
            .into_iter()
            .map(Ident::from)
            .collect())
    }

    fn literal(&self, id: &Ident) -> WeftResult<Option<Literal>> {
        let parts = match id.literal_parts() {
            Some(parts) => parts,
            None => return Ok(None),
        };
        let blob = match self.store.get(&parts.value_key())? {
            Some(blob) => blob,
            None => return Ok(None),
        };
        if parts.datatype_id == 0 {
            match blob.split_once('\n') {
                Some((datatype, value)) => Ok(Some(Literal::new(value, datatype))),
                None => Err(WeftError::store(format!(
                    "malformed literal blob at {}",
                    parts.value_key()
                ))),
            }
        } else {
            match xsd::datatype_by_id(parts.datatype_id) {
                Some(datatype) => Ok(Some(Literal::new(blob, datatype))),
                None => Ok(None),
            }
        }
    }

    fn find_vertex(&self, value: &str, datatype: Option<&str>) -> WeftResult<Option<Ident>> {
        let datatype = datatype.unwrap_or(xsd::STRING);
        let (id, _, _) = self.literal_id(value, datatype)?;
        if self.store.set_contains(&self.vertex_key, id.as_str())? {
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }

    fn contains(&self, id: &Ident) -> WeftResult<bool> {
        Ok(self.store.set_contains(&self.vertex_key, id.as_str())?
            || self.store.set_contains(&self.edge_key, id.as_str())?)
    }

    fn card(&self, edge: &Ident) -> WeftResult<u64> {
        // head and tail occupy the whole 0..=1 score range
        self.store.zset_count(edge.as_str(), 0, 1)
    }

    fn vertex_count(&self) -> WeftResult<u64> {
        self.store.set_card(&self.vertex_key)
    }
}

/// Read-write handle onto one named graph.
///
/// Composes the read-only [`GraphView`] rather than duplicating it; all
/// reads delegate to the inner view.
pub struct Graph<S> {
    view: GraphView<S>,
}

impl<S> Clone for Graph<S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<S: Store> Graph<S> {
    pub(crate) fn new(store: Arc<S>, identifier: &str) -> Self {
        Self {
            view: GraphView::new(store, identifier),
        }
    }

    /// The read-only view composed inside this handle.
    pub fn as_view(&self) -> &GraphView<S> {
        &self.view
    }

    fn next_id(&self) -> WeftResult<u64> {
        Ok(self.view.store.incr(keys::COUNTER_KEY)? as u64)
    }
}

impl<S: Store> GraphRead for Graph<S> {
    fn identifier(&self) -> &str {
        self.view.identifier()
    }

    fn head(&self, edge: &Ident) -> WeftResult<Option<Ident>> {
        self.view.head(edge)
    }

    fn tail(&self, edge: &Ident) -> WeftResult<Vec<Ident>> {
        self.view.tail(edge)
    }

    fn ingoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        self.view.ingoing_edges(ids)
    }

    fn outgoing_edges(&self, ids: &[&Ident]) -> WeftResult<HashSet<Ident>> {
        self.view.outgoing_edges(ids)
    }

    fn vertices(&self) -> WeftResult<HashSet<Ident>> {
        self.view.vertices()
    }

    fn edges(&self) -> WeftResult<HashSet<Ident>> {
        self.view.edges()
    }

    fn literal(&self, id: &Ident) -> WeftResult<Option<Literal>> {
        self.view.literal(id)
    }

    fn find_vertex(&self, value: &str, datatype: Option<&str>) -> WeftResult<Option<Ident>> {
        self.view.find_vertex(value, datatype)
    }

    fn contains(&self, id: &Ident) -> WeftResult<bool> {
        self.view.contains(id)
    }

    fn card(&self, edge: &Ident) -> WeftResult<u64> {
        self.view.card(edge)
    }

    fn vertex_count(&self) -> WeftResult<u64> {
        self.view.vertex_count()
    }
}

impl<S: Store> GraphWrite for Graph<S> {
    fn create_vertex(&self) -> WeftResult<Ident> {
        let id = Ident::vertex(self.next_id()?);
        self.view.store.set_add(&self.view.vertex_key, &[id.as_str()])?;
        Ok(id)
    }

    fn create_literal_vertex(&self, value: &str, datatype: Option<&str>) -> WeftResult<Ident> {
        let datatype = datatype.unwrap_or(xsd::STRING);
        let (id, value_key, blob) = self.view.literal_id(value, datatype)?;
        // set-if-absent keeps the global blob write idempotent and
        // race-tolerant; re-adding the membership is a no-op
        let mut batch = Batch::new();
        batch
            .set_if_absent(&value_key, &blob)
            .set_add(&self.view.vertex_key, &[id.as_str()]);
        self.view.store.apply(batch)?;
        Ok(id)
    }

    fn create_edge(&self, head: &Ident, tail: &[&Ident]) -> WeftResult<Ident> {
        if !head.is_vertex() {
            return Err(WeftError::IllegalEdgeHead(head.to_string()));
        }
        if tail.is_empty() {
            return Err(WeftError::EmptyTail(format!("new edge from {head}")));
        }
        for target in tail {
            if target.kind() == Kind::Unknown {
                return Err(WeftError::IllegalTailMember(target.to_string()));
            }
        }
        let edge = Ident::edge(self.next_id()?);
        // tail entries first, head last: for a pure self-loop the head's
        // score 0 wins, which is what the tail() fallback expects
        let mut entries: Vec<(&str, Score)> = Vec::with_capacity(tail.len() + 1);
        for target in tail {
            entries.push((target.as_str(), 1));
        }
        entries.push((head.as_str(), 0));

        let mut batch = Batch::new();
        batch
            .zset_add(edge.as_str(), &entries)
            .set_add(&keys::outgoing_key(head.as_str()), &[edge.as_str()]);
        for target in tail {
            batch.set_add(&keys::ingoing_key(target.as_str()), &[edge.as_str()]);
        }
        batch.set_add(&self.view.edge_key, &[edge.as_str()]);
        self.view.store.apply(batch)?;
        Ok(edge)
    }

    fn add_tail(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<()> {
        if !edge.is_edge() {
            return Err(WeftError::NotAnEdge(edge.to_string()));
        }
        let head = self
            .head(edge)?
            .ok_or_else(|| WeftError::NotAnEdge(edge.to_string()))?;
        for target in ids {
            if target.kind() == Kind::Unknown {
                return Err(WeftError::IllegalTailMember(target.to_string()));
            }
        }
        // the head must keep score 0; adding it as a target is already
        // covered by the loop convention
        let targets: Vec<&&Ident> = ids.iter().filter(|id| ***id != head).collect();
        if targets.is_empty() {
            return Ok(());
        }
        let entries: Vec<(&str, Score)> = targets.iter().map(|id| (id.as_str(), 1)).collect();
        let mut batch = Batch::new();
        batch.zset_add(edge.as_str(), &entries);
        for target in &targets {
            batch.set_add(&keys::ingoing_key(target.as_str()), &[edge.as_str()]);
        }
        self.view.store.apply(batch)?;
        Ok(())
    }

    fn remove_tail(&self, edge: &Ident, ids: &[&Ident]) -> WeftResult<()> {
        if !edge.is_edge() {
            return Err(WeftError::NotAnEdge(edge.to_string()));
        }
        if ids.is_empty() {
            return Ok(());
        }
        let head = self
            .head(edge)?
            .ok_or_else(|| WeftError::NotAnEdge(edge.to_string()))?;
        if ids.iter().any(|id| **id == head) {
            return Err(WeftError::HeadNotRemovable(edge.to_string()));
        }
        let current = self.view.store.zset_range(edge.as_str(), 1, -1)?;
        if !current.is_empty() {
            let removing: HashSet<&str> = ids.iter().map(|id| id.as_str()).collect();
            if current.iter().all(|member| removing.contains(member.as_str())) {
                return Err(WeftError::EmptyTail(edge.to_string()));
            }
        }
        let members: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        let mut batch = Batch::new();
        batch.zset_remove(edge.as_str(), &members);
        for member in &members {
            batch.set_remove(&keys::ingoing_key(member), &[edge.as_str()]);
        }
        self.view.store.apply(batch)?;
        Ok(())
    }

    fn delete_vertex(&self, id: &Ident) -> WeftResult<()> {
        if !id.is_vertex() {
            return Err(WeftError::NotAVertex(id.to_string()));
        }
        let ingoing = keys::ingoing_key(id.as_str());
        let outgoing = keys::outgoing_key(id.as_str());
        let incident = self
            .view
            .store
            .set_union(&[ingoing.clone(), outgoing.clone()])?;
        for edge in &incident {
            self.delete_edge(&Ident::from(edge.as_str()))?;
        }
        if !incident.is_empty() {
            tracing::debug!(vertex = %id, cascaded = incident.len(), "cascading vertex deletion");
        }
        let mut batch = Batch::new();
        batch
            .remove(&[ingoing, outgoing])
            .set_remove(&self.view.vertex_key, &[id.as_str()]);
        self.view.store.apply(batch)?;
        Ok(())
    }

    fn delete_edge(&self, id: &Ident) -> WeftResult<()> {
        if !id.is_edge() {
            return Err(WeftError::NotAnEdge(id.to_string()));
        }
        let incidents = self.view.store.zset_range(id.as_str(), 0, -1)?;
        if incidents.is_empty() {
            return Ok(());
        }
        let head = &incidents[0];
        let mut batch = Batch::new();
        batch
            .set_remove(&self.view.edge_key, &[id.as_str()])
            .set_remove(&keys::outgoing_key(head), &[id.as_str()]);
        // every incident may carry an ingoing entry: plain tail members
        // always do, and the head does when the edge is a loop
        for target in &incidents {
            batch.set_remove(&keys::ingoing_key(target), &[id.as_str()]);
        }
        batch.remove(&[id.as_str().to_owned(), keys::ingoing_key(id.as_str())]);
        self.view.store.apply(batch)?;
        Ok(())
    }

    fn clear(&self) -> WeftResult<()> {
        let vertices = self.view.store.set_members(&self.view.vertex_key)?;
        let edges = self.view.store.set_members(&self.view.edge_key)?;
        let mut doomed =
            Vec::with_capacity(vertices.len() * 2 + edges.len() * 2 + 2);
        for vertex in &vertices {
            doomed.push(keys::ingoing_key(vertex));
            doomed.push(keys::outgoing_key(vertex));
        }
        for edge in &edges {
            doomed.push(edge.clone());
            doomed.push(keys::ingoing_key(edge));
        }
        doomed.push(self.view.vertex_key.clone());
        doomed.push(self.view.edge_key.clone());

        let mut batch = Batch::new();
        batch.remove(&doomed);
        self.view.store.apply(batch)?;
        tracing::debug!(
            graph = %self.view.identifier,
            vertices = vertices.len(),
            edges = edges.len(),
            "cleared graph"
        );
        Ok(())
    }
}
