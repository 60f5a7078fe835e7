//! Reduction and combine operators for tree accumulation.
//!
//! The operator sets are closed: they mirror the fixed catalogue the engine
//! is calibrated against, so selection is a plain enum match rather than a
//! registry, and an unknown selector cannot be expressed.

mod tree;

pub use tree::{
    AccumulateError, accumulate_and_add_sequential, accumulate_and_combine_sequential,
    accumulate_and_max_sequential, accumulate_and_min_sequential,
    accumulate_and_multiply_sequential, accumulate_parallel, accumulate_sequential,
    propagate_parallel, propagate_sequential,
};

use std::ops::Div;

use num_traits::{Bounded, FromPrimitive, One, Zero};
use serde::{Deserialize, Serialize};

/// Scalar values the accumulation engine can reduce.
///
/// Satisfied by the primitive integer and float types. Blanket-implemented;
/// not meant to be implemented by hand.
pub trait NumericValue:
    Copy + PartialOrd + Zero + One + Div<Output = Self> + Bounded + FromPrimitive
{
}

impl<T> NumericValue for T where
    T: Copy + PartialOrd + Zero + One + Div<Output = T> + Bounded + FromPrimitive
{
}

/// Child counts that do not fit `T` saturate to `T::max_value()`.
fn count_as<T: NumericValue>(count: usize) -> T {
    T::from_usize(count).unwrap_or_else(T::max_value)
}

/// Associative reduction of a node's children values into one value.
///
/// Reductions are applied per channel when values carry trailing dimensions.
/// Each variant documents its result for an empty sequence (a node with no
/// children).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Accumulator {
    /// Sum of the values; `0` for an empty sequence.
    Sum,
    /// Product of the values; `1` for an empty sequence.
    Prod,
    /// Smallest value; saturates to `T::max_value()` for an empty sequence.
    Min,
    /// Largest value; saturates to `T::min_value()` for an empty sequence.
    Max,
    /// Sum divided by the observed count; `0` for an empty sequence
    /// (never a division by zero).
    Mean,
    /// Number of values; the values themselves are ignored.
    Counter,
}

impl Accumulator {
    /// Identity the reduction starts from.
    pub(crate) fn initial<T: NumericValue>(&self) -> T {
        match self {
            Accumulator::Sum | Accumulator::Mean | Accumulator::Counter => T::zero(),
            Accumulator::Prod => T::one(),
            Accumulator::Min => T::max_value(),
            Accumulator::Max => T::min_value(),
        }
    }

    pub(crate) fn fold<T: NumericValue>(&self, accumulated: T, value: T) -> T {
        match self {
            Accumulator::Sum | Accumulator::Mean => accumulated + value,
            Accumulator::Prod => accumulated * value,
            Accumulator::Min => {
                if value < accumulated {
                    value
                } else {
                    accumulated
                }
            }
            Accumulator::Max => {
                if value > accumulated {
                    value
                } else {
                    accumulated
                }
            }
            Accumulator::Counter => accumulated,
        }
    }

    /// Applied once after all values are folded; `count` is the number of
    /// values seen. Only `Mean` and `Counter` depend on it.
    pub(crate) fn finish<T: NumericValue>(&self, accumulated: T, count: usize) -> T {
        match self {
            Accumulator::Mean => {
                if count == 0 {
                    T::zero()
                } else {
                    accumulated / count_as(count)
                }
            }
            Accumulator::Counter => count_as(count),
            _ => accumulated,
        }
    }

    /// Reduces a finite sequence of values.
    pub fn reduce<T: NumericValue>(&self, values: impl IntoIterator<Item = T>) -> T {
        let mut accumulated = self.initial();
        let mut count = 0usize;
        for value in values {
            accumulated = self.fold(accumulated, value);
            count += 1;
        }
        self.finish(accumulated, count)
    }
}

/// Binary elementwise operator merging a node's own input value with its
/// reduced children value. Applied exactly once per node; not required to be
/// associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum CombineOp {
    Add,
    Multiply,
    Min,
    Max,
}

impl CombineOp {
    pub fn apply<T: NumericValue>(&self, own: T, reduced: T) -> T {
        match self {
            CombineOp::Add => own + reduced,
            CombineOp::Multiply => own * reduced,
            CombineOp::Min => {
                if reduced < own {
                    reduced
                } else {
                    own
                }
            }
            CombineOp::Max => {
                if reduced > own {
                    reduced
                } else {
                    own
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reductions_use_documented_identities() {
        assert_eq!(Accumulator::Sum.reduce(Vec::<u64>::new()), 0);
        assert_eq!(Accumulator::Counter.reduce(Vec::<u64>::new()), 0);
        assert_eq!(Accumulator::Prod.reduce(Vec::<u64>::new()), 1);
        assert_eq!(Accumulator::Mean.reduce(Vec::<f64>::new()), 0.0);
        assert_eq!(Accumulator::Min.reduce(Vec::<i32>::new()), i32::MAX);
        assert_eq!(Accumulator::Max.reduce(Vec::<i32>::new()), i32::MIN);
    }

    #[test]
    fn reductions_over_values() {
        assert_eq!(Accumulator::Sum.reduce(vec![1u64, 2, 3]), 6);
        assert_eq!(Accumulator::Prod.reduce(vec![2u64, 3, 4]), 24);
        assert_eq!(Accumulator::Min.reduce(vec![5i32, -2, 7]), -2);
        assert_eq!(Accumulator::Max.reduce(vec![5i32, -2, 7]), 7);
        assert_eq!(Accumulator::Mean.reduce(vec![2.0f64, 4.0]), 3.0);
        assert_eq!(Accumulator::Counter.reduce(vec![9u64, 9, 9, 9]), 4);
    }

    #[test]
    fn integer_mean_truncates() {
        assert_eq!(Accumulator::Mean.reduce(vec![1u64, 2]), 1);
    }

    #[test]
    fn combine_ops() {
        assert_eq!(CombineOp::Add.apply(2u64, 3), 5);
        assert_eq!(CombineOp::Multiply.apply(2u64, 3), 6);
        assert_eq!(CombineOp::Min.apply(2u64, 3), 2);
        assert_eq!(CombineOp::Max.apply(2u64, 3), 3);
    }
}
