//! Implicit graph over an n-dimensional grid.
//!
//! Adjacency is a fixed list of coordinate offsets, the same for every
//! vertex, filtered by the grid bounds. Nothing is materialized: neighbours
//! are computed on the fly from the embedding, so the structure is O(1) in
//! the grid size.

use crate::embedding::{Embedding2d, GridEmbedding};
use crate::graph::{AdjacencyGraph, IncidenceGraph, VertexIndex, VertexListGraph};

/// Undirected grid graph: vertices are the linear indices of
/// `embedding`, and `v` is adjacent to `lin2grid(v) + offset` for every
/// offset of the neighbour pattern that lands inside the grid.
///
/// The pattern is taken as given: offsets are not deduplicated, and a zero
/// offset would make every vertex its own neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularGraph<const D: usize> {
    embedding: GridEmbedding<D>,
    neighbours: Vec<[i64; D]>,
}

pub type RegularGraph1d = RegularGraph<1>;
pub type RegularGraph2d = RegularGraph<2>;
pub type RegularGraph3d = RegularGraph<3>;
pub type RegularGraph4d = RegularGraph<4>;

impl<const D: usize> RegularGraph<D> {
    pub fn new(embedding: GridEmbedding<D>, neighbours: Vec<[i64; D]>) -> Self {
        if neighbours.iter().any(|offset| offset.iter().all(|&c| c == 0)) {
            log::warn!("neighbour pattern contains a zero offset; every vertex will be its own neighbour");
        }
        Self {
            embedding,
            neighbours,
        }
    }

    pub fn embedding(&self) -> &GridEmbedding<D> {
        &self.embedding
    }

    pub fn neighbours(&self) -> &[[i64; D]] {
        &self.neighbours
    }
}

impl RegularGraph<2> {
    /// 4-connectivity.
    pub fn with_4_adjacency(embedding: Embedding2d) -> Self {
        Self::new(embedding, vec![[0, -1], [-1, 0], [1, 0], [0, 1]])
    }

    /// 8-connectivity (4-connectivity plus diagonals).
    pub fn with_8_adjacency(embedding: Embedding2d) -> Self {
        Self::new(
            embedding,
            vec![
                [-1, -1],
                [0, -1],
                [1, -1],
                [-1, 0],
                [1, 0],
                [-1, 1],
                [0, 1],
                [1, 1],
            ],
        )
    }
}

impl<const D: usize> VertexListGraph for RegularGraph<D> {
    fn num_vertices(&self) -> usize {
        self.embedding.size()
    }
}

impl<const D: usize> AdjacencyGraph for RegularGraph<D> {
    /// Offsets are visited in declaration order; those landing outside the
    /// grid are skipped, so boundary vertices see fewer neighbours.
    fn adjacent_vertices(&self, v: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        let source = self.embedding.lin2grid(v);
        self.neighbours.iter().filter_map(move |offset| {
            let mut candidate = source;
            for axis in 0..D {
                candidate[axis] += offset[axis];
            }
            self.embedding
                .contains(&candidate)
                .then(|| self.embedding.grid2lin(&candidate))
        })
    }
}

impl<const D: usize> IncidenceGraph for RegularGraph<D> {}
