//! Graphspace registry.
//!
//! A [`Connection`] manages the namespace of independently addressable
//! graphs inside one store instance. It is a thin view over the store —
//! no cached state — so handles never go stale beyond the store's own
//! consistency window.

use std::collections::HashSet;
use std::sync::Arc;

use weft_core::{Ident, Kind, WeftError, WeftResult};
use weft_store::Store;

use crate::backend::{Graph, GraphView};
use crate::keys;

/// Options for opening a connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionOptions {
    /// Open the graphspace read-only: only views are handed out and every
    /// mutation fails with [`WeftError::ReadOnly`].
    pub readonly: bool,
}

impl ConnectionOptions {
    /// Set the read-only flag.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }
}

/// A graphspace over one store connection.
pub struct Connection<S> {
    store: Arc<S>,
    readonly: bool,
}

impl<S> Clone for Connection<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            readonly: self.readonly,
        }
    }
}

impl<S: Store> Connection<S> {
    /// Open a read-write graphspace over the given store.
    pub fn open(store: Arc<S>) -> Self {
        Self::with_options(store, ConnectionOptions::default())
    }

    /// Open a graphspace with explicit options.
    pub fn with_options(store: Arc<S>, options: ConnectionOptions) -> Self {
        Self {
            store,
            readonly: options.readonly,
        }
    }

    /// Whether this connection was opened read-only.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Kind of an identifier. Structural; never touches the store.
    pub fn kind(&self, id: &Ident) -> Kind {
        id.kind()
    }

    /// Whether a graph with this identifier is registered.
    pub fn contains(&self, id: &str) -> WeftResult<bool> {
        self.store.set_contains(keys::GRAPHS_KEY, id)
    }

    /// Identifiers of all registered graphs.
    pub fn identifiers(&self) -> WeftResult<HashSet<String>> {
        self.store.set_members(keys::GRAPHS_KEY)
    }

    /// Read-only view of a graph. Fails with [`WeftError::UnknownGraph`]
    /// if the identifier is not registered.
    pub fn view(&self, id: &str) -> WeftResult<GraphView<S>> {
        if !self.contains(id)? {
            return Err(WeftError::UnknownGraph(id.to_owned()));
        }
        Ok(GraphView::new(self.store.clone(), id))
    }

    /// Read-write handle of a graph. Fails with
    /// [`WeftError::UnknownGraph`] if the identifier is not registered.
    pub fn graph(&self, id: &str) -> WeftResult<Graph<S>> {
        self.ensure_writable()?;
        if !self.contains(id)? {
            return Err(WeftError::UnknownGraph(id.to_owned()));
        }
        Ok(Graph::new(self.store.clone(), id))
    }

    /// Read-write handle of a graph, or None if the identifier is not
    /// registered.
    pub fn get(&self, id: &str) -> WeftResult<Option<Graph<S>>> {
        self.ensure_writable()?;
        if self.contains(id)? {
            Ok(Some(Graph::new(self.store.clone(), id)))
        } else {
            Ok(None)
        }
    }

    /// Create a graph. Allocates an identifier from the store counter when
    /// none is given; fails with [`WeftError::GraphAlreadyExists`] for a
    /// registered identifier.
    pub fn create_graph(&self, id: Option<&str>) -> WeftResult<Graph<S>> {
        self.ensure_writable()?;
        let identifier = match id {
            Some(id) => {
                keys::validate_graph_id(id)?;
                if self.contains(id)? {
                    return Err(WeftError::GraphAlreadyExists(id.to_owned()));
                }
                id.to_owned()
            }
            None => self.store.incr(keys::COUNTER_KEY)?.to_string(),
        };
        self.store.set_add(keys::GRAPHS_KEY, &[&identifier])?;
        tracing::debug!(graph = %identifier, "created graph");
        Ok(Graph::new(self.store.clone(), &identifier))
    }

    /// Delete a graph and all its contents. A no-op for unregistered
    /// identifiers.
    pub fn delete_graph(&self, id: &str) -> WeftResult<()> {
        self.ensure_writable()?;
        if !self.contains(id)? {
            return Ok(());
        }
        use crate::algebra::GraphWrite as _;
        Graph::new(self.store.clone(), id).clear()?;
        self.store.set_remove(keys::GRAPHS_KEY, &[id])?;
        tracing::debug!(graph = %id, "deleted graph");
        Ok(())
    }

    /// Commit the current transaction (delegated to the store).
    pub fn commit(&self) -> WeftResult<()> {
        self.store.commit()
    }

    /// Roll back to the last commit (delegated to the store).
    pub fn rollback(&self) -> WeftResult<()> {
        self.store.rollback()
    }

    /// Close the underlying store connection. Uncommitted changes are
    /// dropped by stores that hold transactions open.
    pub fn close(&self) -> WeftResult<()> {
        self.store.close()
    }

    fn ensure_writable(&self) -> WeftResult<()> {
        if self.readonly {
            Err(WeftError::ReadOnly)
        } else {
            Ok(())
        }
    }
}
