//! Rooted tree encoded as one parent index per node.
//!
//! The encoding is an array `parent` where `parent[i]` is the index of the
//! parent of node `i` and the root is its own parent. Children are numbered
//! strictly before their parent (which forces the root to be the last node)
//! and the leaves are exactly the prefix `0..num_leaves()`. This layout is
//! what lets the accumulation engine process nodes bottom-up in ascending
//! index order and top-down in descending order.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::graph::{AdjacencyGraph, Edge, EdgeListGraph, IncidenceGraph, VertexIndex, VertexListGraph};

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("parent {parent} of node {node} is not a valid vertex index (tree has {num_vertices} vertices)")]
    ParentOutOfRange {
        node: usize,
        parent: usize,
        num_vertices: usize,
    },
    #[error("value at position {node} is not representable as a vertex index")]
    InvalidParentIndex { node: usize },
    #[error("no root: exactly one node must be its own parent")]
    NoRoot,
    #[error("nodes {first} and {second} are both their own parent; a tree has a single root")]
    MultipleRoots { first: usize, second: usize },
    #[error("node {node} is numbered after its parent {parent}; children must precede their parent")]
    ChildAfterParent { node: usize, parent: usize },
    #[error("node {node} has no children but is numbered after an internal node; leaves must form a prefix")]
    LeavesNotPrefix { node: usize },
}

/// A validated parent-pointer tree. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    parents: Vec<usize>,
    root: usize,
    num_leaves: usize,
    /// CSR children adjacency: the children of `v` are
    /// `children[child_offsets[v]..child_offsets[v + 1]]`, ascending.
    child_offsets: Vec<usize>,
    children: Vec<usize>,
}

impl Tree {
    /// Builds a tree from a sequence of parent indices, one per node.
    ///
    /// Any integral index type is accepted; values that are negative or do
    /// not fit a `usize` are rejected. The encoding is validated in full and
    /// no tree is returned on failure.
    pub fn from_parents<T, I>(parents: I) -> Result<Self, TreeError>
    where
        T: ToPrimitive,
        I: IntoIterator<Item = T>,
    {
        let mut indices = Vec::new();
        for (node, value) in parents.into_iter().enumerate() {
            indices.push(
                value
                    .to_usize()
                    .ok_or(TreeError::InvalidParentIndex { node })?,
            );
        }
        Self::build(indices)
    }

    fn build(parents: Vec<usize>) -> Result<Self, TreeError> {
        let num_vertices = parents.len();

        let mut root = None;
        for (node, &parent) in parents.iter().enumerate() {
            if parent >= num_vertices {
                return Err(TreeError::ParentOutOfRange {
                    node,
                    parent,
                    num_vertices,
                });
            }
            if parent == node {
                match root {
                    Some(first) => {
                        return Err(TreeError::MultipleRoots {
                            first,
                            second: node,
                        });
                    }
                    None => root = Some(node),
                }
            } else if parent < node {
                return Err(TreeError::ChildAfterParent { node, parent });
            }
        }
        let root = root.ok_or(TreeError::NoRoot)?;

        let mut child_counts = vec![0usize; num_vertices];
        for (node, &parent) in parents.iter().enumerate() {
            if node != root {
                child_counts[parent] += 1;
            }
        }

        let num_leaves = child_counts.iter().filter(|&&count| count == 0).count();
        if let Some(node) = (num_leaves..num_vertices).find(|&v| child_counts[v] == 0) {
            return Err(TreeError::LeavesNotPrefix { node });
        }

        let mut child_offsets = vec![0usize; num_vertices + 1];
        for node in 0..num_vertices {
            child_offsets[node + 1] = child_offsets[node] + child_counts[node];
        }

        // Visiting nodes in ascending order keeps every children slice sorted.
        let mut cursor = child_offsets[..num_vertices].to_vec();
        let mut children = vec![0usize; num_vertices - 1];
        for (node, &parent) in parents.iter().enumerate() {
            if node != root {
                children[cursor[parent]] = node;
                cursor[parent] += 1;
            }
        }

        Ok(Self {
            parents,
            root,
            num_leaves,
            child_offsets,
            children,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.parents.len()
    }

    /// One edge per non-root node.
    pub fn num_edges(&self) -> usize {
        self.parents.len() - 1
    }

    pub fn root(&self) -> VertexIndex {
        self.root
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn parent(&self, v: VertexIndex) -> VertexIndex {
        self.parents[v]
    }

    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Children of `v` in ascending index order.
    pub fn children(&self, v: VertexIndex) -> &[VertexIndex] {
        &self.children[self.child_offsets[v]..self.child_offsets[v + 1]]
    }

    pub fn num_children(&self, v: VertexIndex) -> usize {
        self.child_offsets[v + 1] - self.child_offsets[v]
    }

    pub fn is_leaf(&self, v: VertexIndex) -> bool {
        v < self.num_leaves
    }

    /// The leaf prefix `0..num_leaves()`.
    pub fn leaves(&self) -> impl Iterator<Item = VertexIndex> {
        0..self.num_leaves
    }

    /// The internal nodes `num_leaves()..num_vertices()`, root last.
    pub fn internal_vertices(&self) -> impl Iterator<Item = VertexIndex> {
        self.num_leaves..self.parents.len()
    }

    /// Walks from `v` to the root, yielding each ancestor in turn
    /// (`v` itself excluded, the root included). Empty for the root.
    pub fn ancestors(&self, v: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        let mut current = v;
        std::iter::from_fn(move || {
            if current == self.root {
                None
            } else {
                current = self.parents[current];
                Some(current)
            }
        })
    }
}

impl VertexListGraph for Tree {
    fn num_vertices(&self) -> usize {
        self.parents.len()
    }
}

impl EdgeListGraph for Tree {
    fn num_edges(&self) -> usize {
        self.parents.len() - 1
    }

    /// One `(i, parent[i])` pair per non-root node, ascending `i`.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .filter(move |&v| v != self.root)
            .map(move |v| (v, self.parents[v]))
    }
}

impl AdjacencyGraph for Tree {
    /// Parent first (omitted for the root), then children in ascending
    /// index order. Callers diffing adjacency lists rely on this order.
    fn adjacent_vertices(&self, v: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        let parent = (v != self.root).then(|| self.parents[v]);
        parent.into_iter().chain(self.children(v).iter().copied())
    }

    fn degree(&self, v: VertexIndex) -> usize {
        self.num_children(v) + usize::from(v != self.root)
    }
}

impl IncidenceGraph for Tree {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_tree() {
        let tree = Tree::from_parents(vec![0usize]).unwrap();
        assert_eq!(tree.num_vertices(), 1);
        assert_eq!(tree.num_edges(), 0);
        assert_eq!(tree.root(), 0);
        assert_eq!(tree.num_leaves(), 1);
        assert!(tree.children(0).is_empty());
        assert_eq!(tree.ancestors(0).count(), 0);
    }

    #[test]
    fn empty_parent_array_has_no_root() {
        assert!(matches!(
            Tree::from_parents(Vec::<usize>::new()),
            Err(TreeError::NoRoot)
        ));
    }

    #[test]
    fn negative_parent_is_rejected() {
        assert!(matches!(
            Tree::from_parents(vec![2i64, 2, -1]),
            Err(TreeError::InvalidParentIndex { node: 2 })
        ));
    }

    #[test]
    fn ancestors_chain_to_root() {
        let tree = Tree::from_parents(vec![5u32, 5, 6, 6, 6, 7, 7, 7]).unwrap();
        assert_eq!(tree.ancestors(0).collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(tree.ancestors(2).collect::<Vec<_>>(), vec![6, 7]);
        assert_eq!(tree.ancestors(6).collect::<Vec<_>>(), vec![7]);
        assert_eq!(tree.ancestors(7).count(), 0);
    }
}
