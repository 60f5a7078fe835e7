//! Traversal of graphs and rooted trees encoded as flat index arrays, and
//! bottom-up / top-down accumulation of tensor-valued node data.
//!
//! Two implicit structures share one traversal protocol: [`RegularGraph`]
//! computes grid adjacency on the fly from an embedding and a neighbour
//! offset pattern, and [`Tree`] derives adjacency from an array of parent
//! indices. [`UndirectedGraph`] is the explicit adjacency-list counterpart,
//! interchangeable with both in generic code. The accumulation engine
//! reduces per-child values into per-parent values over `ndarray` data with
//! arbitrary trailing channel dimensions.

pub mod accumulator;
pub mod embedding;
pub mod graph;
pub mod regular_graph;
pub mod tree;
pub mod undirected_graph;

pub use accumulator::{
    AccumulateError, Accumulator, CombineOp, NumericValue, accumulate_and_add_sequential,
    accumulate_and_combine_sequential, accumulate_and_max_sequential,
    accumulate_and_min_sequential, accumulate_and_multiply_sequential, accumulate_parallel,
    accumulate_sequential, propagate_parallel, propagate_sequential,
};
pub use embedding::{Embedding1d, Embedding2d, Embedding3d, Embedding4d, GridEmbedding};
pub use graph::{
    AdjacencyGraph, Edge, EdgeListGraph, IncidenceGraph, VertexIndex, VertexListGraph,
};
pub use regular_graph::{
    RegularGraph, RegularGraph1d, RegularGraph2d, RegularGraph3d, RegularGraph4d,
};
pub use tree::{Tree, TreeError};
pub use undirected_graph::{EdgeIndex, UndirectedGraph};
