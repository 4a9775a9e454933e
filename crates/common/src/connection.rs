//! Relay-style connections (`edges { node { ... } }`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A page of nodes as returned by a paginated platform field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Builds a connection from plain nodes.
    pub fn from_nodes(nodes: impl IntoIterator<Item = T>) -> Self {
        Self {
            edges: nodes.into_iter().map(|node| Edge { node }).collect(),
        }
    }

    /// Iterates over the nodes in page order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Returns the first node, if any.
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|e| &e.node)
    }

    /// Keeps only the nodes matching the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.edges.retain(|e| keep(&e.node));
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}
