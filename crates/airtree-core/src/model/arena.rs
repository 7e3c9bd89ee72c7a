use std::slice::Iter;

use crate::model::ids::NodeId;

/// Holds all nodes of a tree in one contiguous, cache friendly allocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Arena<T> {
    storage: Vec<T>,
}

impl<T> Arena<T> {
    /// Node stored under `node_id`, `None` past the end.
    pub fn get(&self, node_id: NodeId) -> Option<&T> {
        self.storage.get(node_id.index())
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Nodes in id order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.storage.iter()
    }
}

impl<T> From<Vec<T>> for Arena<T> {
    /// Adopt an already ordered node list; index `i` becomes `NodeId(i)`.
    fn from(storage: Vec<T>) -> Self {
        Arena { storage }
    }
}
