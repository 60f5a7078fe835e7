//! Bottom-up and top-down reductions over a parent-pointer tree.
//!
//! Inputs and outputs are dense arrays whose leading dimension is addressed
//! by vertex (or leaf) index; trailing dimensions are independent channels.
//! Every function validates shapes up front and returns a freshly allocated
//! output, so a failed call leaves nothing half-written.

use ndarray::{Array1, ArrayD, Axis, IxDyn};

use crate::accumulator::{Accumulator, CombineOp, NumericValue};
use crate::tree::Tree;

#[derive(Debug, thiserror::Error)]
pub enum AccumulateError {
    #[error("leading dimension of {what} is {actual}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("channel dimensions of input {input_channels:?} and leaf_data {leaf_channels:?} differ")]
    ChannelMismatch {
        input_channels: Vec<usize>,
        leaf_channels: Vec<usize>,
    },
}

fn check_leading<T>(
    array: &ArrayD<T>,
    expected: usize,
    what: &'static str,
) -> Result<(), AccumulateError> {
    let actual = array.shape().first().copied();
    if actual != Some(expected) {
        return Err(AccumulateError::ShapeMismatch {
            what,
            expected,
            actual: actual.unwrap_or(0),
        });
    }
    Ok(())
}

fn check_condition(condition: &Array1<bool>, tree: &Tree) -> Result<(), AccumulateError> {
    if condition.len() != tree.num_vertices() {
        return Err(AccumulateError::ShapeMismatch {
            what: "condition",
            expected: tree.num_vertices(),
            actual: condition.len(),
        });
    }
    Ok(())
}

/// Leading dimension `leading`, trailing dimensions of `trailing_of`.
fn output_shape<T>(leading: usize, trailing_of: &ArrayD<T>) -> IxDyn {
    let mut shape = Vec::with_capacity(trailing_of.ndim());
    shape.push(leading);
    shape.extend_from_slice(&trailing_of.shape()[1..]);
    IxDyn(&shape)
}

/// Flattened channel count of one row.
fn channels<T>(array: &ArrayD<T>) -> usize {
    array.shape()[1..].iter().product()
}

/// Reduces the rows of `source` addressed by the children of `node` into
/// `row`, one channel lane at a time.
fn reduce_children_row<T: NumericValue>(
    tree: &Tree,
    source: &ArrayD<T>,
    accumulator: Accumulator,
    node: usize,
    row: &mut [T],
) {
    row.fill(accumulator.initial());
    for &child in tree.children(node) {
        let child_row = source.index_axis(Axis(0), child);
        for (accumulated, &value) in row.iter_mut().zip(child_row.iter()) {
            *accumulated = accumulator.fold(*accumulated, value);
        }
    }
    match accumulator {
        Accumulator::Mean | Accumulator::Counter => {
            let count = tree.num_children(node);
            for accumulated in row.iter_mut() {
                *accumulated = accumulator.finish(*accumulated, count);
            }
        }
        _ => {}
    }
}

fn write_row<T: Copy>(output: &mut ArrayD<T>, node: usize, row: &[T]) {
    for (slot, &value) in output
        .index_axis_mut(Axis(0), node)
        .iter_mut()
        .zip(row.iter())
    {
        *slot = value;
    }
}

/// For each node `i`, reduces the values of the *children* of `i` in `input`:
/// `output[i] = accumulator(input[children(i)])`. Nodes without children get
/// the accumulator's empty-sequence result.
///
/// A single pass with no ordering dependency between nodes.
pub fn accumulate_parallel<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    check_leading(input, tree.num_vertices(), "input")?;
    let mut output = ArrayD::from_elem(output_shape(tree.num_vertices(), input), T::zero());
    let mut row = vec![T::zero(); channels(input)];
    for node in 0..tree.num_vertices() {
        reduce_children_row(tree, input, accumulator, node, &mut row);
        write_row(&mut output, node, &row);
    }
    Ok(output)
}

/// Sequential accumulation from the leaves to the root.
///
/// For each leaf `i`, `output[i] = leaf_data[i]`. For each internal node `i`
/// in ascending index order (all children precede their parent),
/// `output[i] = accumulator(output[children(i)])`: each node reduces its
/// children's already-computed outputs, not the raw leaf data.
pub fn accumulate_sequential<T: NumericValue>(
    tree: &Tree,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    check_leading(leaf_data, tree.num_leaves(), "leaf_data")?;
    let mut output = ArrayD::from_elem(output_shape(tree.num_vertices(), leaf_data), T::zero());
    for leaf in tree.leaves() {
        output
            .index_axis_mut(Axis(0), leaf)
            .assign(&leaf_data.index_axis(Axis(0), leaf));
    }
    let mut row = vec![T::zero(); channels(leaf_data)];
    for node in tree.internal_vertices() {
        reduce_children_row(tree, &output, accumulator, node, &mut row);
        write_row(&mut output, node, &row);
    }
    Ok(output)
}

/// Sequential accumulation that additionally merges each internal node's own
/// value into the result: `output[i] = combine(input[i],
/// accumulator(output[children(i)]))`. Leaves are plain copies of
/// `leaf_data`, with no combine step.
pub fn accumulate_and_combine_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
    combine: CombineOp,
) -> Result<ArrayD<T>, AccumulateError> {
    check_leading(input, tree.num_vertices(), "input")?;
    check_leading(leaf_data, tree.num_leaves(), "leaf_data")?;
    if input.shape()[1..] != leaf_data.shape()[1..] {
        return Err(AccumulateError::ChannelMismatch {
            input_channels: input.shape()[1..].to_vec(),
            leaf_channels: leaf_data.shape()[1..].to_vec(),
        });
    }
    let mut output = ArrayD::from_elem(output_shape(tree.num_vertices(), leaf_data), T::zero());
    for leaf in tree.leaves() {
        output
            .index_axis_mut(Axis(0), leaf)
            .assign(&leaf_data.index_axis(Axis(0), leaf));
    }
    let mut row = vec![T::zero(); channels(leaf_data)];
    for node in tree.internal_vertices() {
        reduce_children_row(tree, &output, accumulator, node, &mut row);
        let own_row = input.index_axis(Axis(0), node);
        for (accumulated, &own) in row.iter_mut().zip(own_row.iter()) {
            *accumulated = combine.apply(own, *accumulated);
        }
        write_row(&mut output, node, &row);
    }
    Ok(output)
}

/// [`accumulate_and_combine_sequential`] with [`CombineOp::Add`].
pub fn accumulate_and_add_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    accumulate_and_combine_sequential(tree, input, leaf_data, accumulator, CombineOp::Add)
}

/// [`accumulate_and_combine_sequential`] with [`CombineOp::Multiply`].
pub fn accumulate_and_multiply_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    accumulate_and_combine_sequential(tree, input, leaf_data, accumulator, CombineOp::Multiply)
}

/// [`accumulate_and_combine_sequential`] with [`CombineOp::Min`].
pub fn accumulate_and_min_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    accumulate_and_combine_sequential(tree, input, leaf_data, accumulator, CombineOp::Min)
}

/// [`accumulate_and_combine_sequential`] with [`CombineOp::Max`].
pub fn accumulate_and_max_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    leaf_data: &ArrayD<T>,
    accumulator: Accumulator,
) -> Result<ArrayD<T>, AccumulateError> {
    accumulate_and_combine_sequential(tree, input, leaf_data, accumulator, CombineOp::Max)
}

/// Conditionally copies parent values to children, one generation deep:
/// `output[i] = input[parent(i)]` if `condition[i]`, else `input[i]`.
/// The root reads its own value. Order-independent single pass.
pub fn propagate_parallel<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    condition: &Array1<bool>,
) -> Result<ArrayD<T>, AccumulateError> {
    check_leading(input, tree.num_vertices(), "input")?;
    check_condition(condition, tree)?;
    let mut output = input.clone();
    for node in 0..tree.num_vertices() {
        if condition[node] {
            let parent = tree.parent(node);
            if parent != node {
                output
                    .index_axis_mut(Axis(0), node)
                    .assign(&input.index_axis(Axis(0), parent));
            }
        }
    }
    Ok(output)
}

/// Conditionally propagates values from the root towards the leaves:
/// `output[i] = output[parent(i)]` if `condition[i]`, else `input[i]`.
///
/// Nodes are visited in descending index order, so a node's parent output is
/// final before the node is reached and propagated values chain across
/// consecutive flagged generations.
pub fn propagate_sequential<T: NumericValue>(
    tree: &Tree,
    input: &ArrayD<T>,
    condition: &Array1<bool>,
) -> Result<ArrayD<T>, AccumulateError> {
    check_leading(input, tree.num_vertices(), "input")?;
    check_condition(condition, tree)?;
    let mut output = input.clone();
    let mut row = vec![T::zero(); channels(input)];
    for node in (0..tree.num_vertices()).rev() {
        if condition[node] {
            let parent = tree.parent(node);
            if parent != node {
                for (slot, &value) in row.iter_mut().zip(output.index_axis(Axis(0), parent).iter())
                {
                    *slot = value;
                }
                write_row(&mut output, node, &row);
            }
        }
    }
    Ok(output)
}
