//! Conventional mutable adjacency-list undirected graph.
//!
//! Not a performance-critical structure; it exists so that explicitly-built
//! graphs speak the same traversal protocol as the implicit ones, and serves
//! as the minimal fixture for generic algorithms. Edges are indexed in
//! insertion order, so edge-data arrays can be keyed by the index returned
//! from [`UndirectedGraph::add_edge`].

use serde::{Deserialize, Serialize};

use crate::graph::{AdjacencyGraph, Edge, EdgeListGraph, IncidenceGraph, VertexIndex, VertexListGraph};

pub type EdgeIndex = usize;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndirectedGraph {
    edges: Vec<Edge>,
    /// Incident edge indices per vertex, in insertion order.
    incidence: Vec<Vec<EdgeIndex>>,
}

impl UndirectedGraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); num_vertices],
        }
    }

    /// Appends an isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> VertexIndex {
        self.incidence.push(Vec::new());
        self.incidence.len() - 1
    }

    /// Inserts the edge `(source, target)` and returns its index.
    ///
    /// Parallel edges and self-loops are representable and not deduplicated;
    /// a self-loop contributes a single adjacency entry.
    ///
    /// # Panics
    /// Panics if either endpoint is out of bounds.
    pub fn add_edge(&mut self, source: VertexIndex, target: VertexIndex) -> EdgeIndex {
        let num_vertices = self.incidence.len();
        assert!(
            source < num_vertices && target < num_vertices,
            "edge ({source}, {target}) out of bounds for {num_vertices} vertices"
        );
        let index = self.edges.len();
        self.edges.push((source, target));
        self.incidence[source].push(index);
        if target != source {
            self.incidence[target].push(index);
        }
        index
    }

    pub fn edge(&self, e: EdgeIndex) -> Edge {
        self.edges[e]
    }

    /// Indices of the edges incident to `v`, in insertion order.
    pub fn incident_edges(&self, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.incidence[v].iter().copied()
    }
}

impl VertexListGraph for UndirectedGraph {
    fn num_vertices(&self) -> usize {
        self.incidence.len()
    }
}

impl EdgeListGraph for UndirectedGraph {
    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }
}

impl AdjacencyGraph for UndirectedGraph {
    /// Opposite endpoints of the incident edges, in insertion order.
    fn adjacent_vertices(&self, v: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.incidence[v].iter().map(move |&e| {
            let (source, target) = self.edges[e];
            if source == v { target } else { source }
        })
    }

    fn degree(&self, v: VertexIndex) -> usize {
        self.incidence[v].len()
    }
}

impl IncidenceGraph for UndirectedGraph {}
