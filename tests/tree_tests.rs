use arbor_tensor::{
    AdjacencyGraph, EdgeListGraph, IncidenceGraph, Tree, TreeError, VertexListGraph,
};

fn fixture() -> Tree {
    Tree::from_parents(vec![5u64, 5, 6, 6, 6, 7, 7, 7]).unwrap()
}

#[test]
fn sizes() {
    let tree = fixture();
    assert_eq!(tree.root(), 7);
    assert_eq!(tree.num_vertices(), 8);
    assert_eq!(tree.num_edges(), 7);
    assert_eq!(tree.num_leaves(), 5);
    assert_eq!(tree.num_edges(), tree.num_vertices() - 1);
}

#[test]
fn vertex_iterator() {
    let tree = fixture();
    assert_eq!(tree.vertices().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
}

#[test]
fn degrees() {
    let tree = fixture();
    let reference = [1, 1, 1, 1, 1, 3, 4, 2];
    for v in tree.vertices() {
        assert_eq!(tree.degree(v), reference[v]);
        assert_eq!(tree.in_degree(v), reference[v]);
        assert_eq!(tree.out_degree(v), reference[v]);
        assert_eq!(tree.adjacent_vertices(v).count(), reference[v]);
    }
}

#[test]
fn invalid_parent_arrays_fail_construction() {
    assert!(matches!(
        Tree::from_parents(vec![5u64, 0, 6, 6, 6, 7, 7, 7]),
        Err(TreeError::ChildAfterParent { node: 1, parent: 0 })
    ));
    assert!(matches!(
        Tree::from_parents(vec![5u64, 1, 6, 6, 6, 7, 7, 7]),
        Err(TreeError::MultipleRoots { first: 1, second: 7 })
    ));
    assert!(matches!(
        Tree::from_parents(vec![5u64, 1, 6, 6, 6, 7, 7, 2]),
        Err(TreeError::ChildAfterParent { node: 7, parent: 2 })
    ));
    assert!(matches!(
        Tree::from_parents(vec![2u64, 2, 4, 4, 4]),
        Err(TreeError::LeavesNotPrefix { node: 3 })
    ));
    assert!(matches!(
        Tree::from_parents(vec![3u64, 2, 2]),
        Err(TreeError::ParentOutOfRange {
            node: 0,
            parent: 3,
            num_vertices: 3
        })
    ));
}

#[test]
fn edge_iterator() {
    let tree = fixture();
    let reference = vec![(0, 5), (1, 5), (2, 6), (3, 6), (4, 6), (5, 7), (6, 7)];
    assert_eq!(tree.edges().collect::<Vec<_>>(), reference);
    assert_eq!(tree.edges().count(), tree.num_edges());
}

#[test]
fn adjacent_vertex_iterator() {
    let tree = fixture();
    let reference: Vec<Vec<usize>> = vec![
        vec![5],
        vec![5],
        vec![6],
        vec![6],
        vec![6],
        vec![7, 0, 1],
        vec![7, 2, 3, 4],
        vec![5, 6],
    ];
    for v in tree.vertices() {
        assert_eq!(tree.adjacent_vertices(v).collect::<Vec<_>>(), reference[v]);
    }
}

#[test]
fn children_are_sorted_per_node() {
    let tree = fixture();
    assert_eq!(tree.children(5), &[0, 1]);
    assert_eq!(tree.children(6), &[2, 3, 4]);
    assert_eq!(tree.children(7), &[5, 6]);
    assert!(tree.children(0).is_empty());
    assert_eq!(tree.num_children(6), 3);
}

#[test]
fn leaf_and_internal_partitions() {
    let tree = fixture();
    assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(tree.internal_vertices().collect::<Vec<_>>(), vec![5, 6, 7]);
    for v in tree.vertices() {
        assert_eq!(tree.is_leaf(v), v < 5);
    }
}

#[test]
fn parents_accessor() {
    let tree = fixture();
    assert_eq!(tree.parents(), &[5, 5, 6, 6, 6, 7, 7, 7]);
    assert_eq!(tree.parent(0), 5);
    assert_eq!(tree.parent(tree.root()), tree.root());
}

#[test]
fn incident_edges_orientation() {
    let tree = fixture();
    assert_eq!(
        tree.out_edges(5).collect::<Vec<_>>(),
        vec![(5, 7), (5, 0), (5, 1)]
    );
    assert_eq!(
        tree.in_edges(5).collect::<Vec<_>>(),
        vec![(7, 5), (0, 5), (1, 5)]
    );
}

#[test]
fn construction_accepts_any_integral_index_type() {
    let from_i32 = Tree::from_parents(vec![5i32, 5, 6, 6, 6, 7, 7, 7]).unwrap();
    let from_u8 = Tree::from_parents(vec![5u8, 5, 6, 6, 6, 7, 7, 7]).unwrap();
    assert_eq!(from_i32.parents(), from_u8.parents());
}
