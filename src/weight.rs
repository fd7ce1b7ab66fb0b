/*!
# Edge Weights

The basis algorithms are generic over the weight type: any ordered, summable
numeric type works (`u32`, `u64`, `i64`, `f64`, ...). Weights enter the crate
as a slice aligned with an [`EdgeNumbering`](crate::numbering::EdgeNumbering),
i.e. `weights[i]` is the weight of the edge with numbering index `i`.
*/

use std::{cmp::Ordering, fmt::Debug, ops::Add};

use num::Zero;

/// Numeric requirements on edge weights.
///
/// Implemented for every `Copy` type that is partially ordered, has a zero,
/// and supports addition. Floating point types are allowed; the caller accepts
/// the usual rounding risk. NaN weights are caller misuse and abort via
/// [`Weight::cmp_weight`].
pub trait Weight: Copy + PartialOrd + Zero + Add<Output = Self> + Debug {
    /// Total-order comparison of two weights.
    /// ** Panics if the weights are incomparable (e.g. NaN) **
    fn cmp_weight(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .expect("edge weights must be totally ordered")
    }

    /// Returns *true* if the weight is negative
    fn is_negative(&self) -> bool {
        matches!(self.cmp_weight(&Self::zero()), Ordering::Less)
    }

    /// Returns *true* if the weight is strictly positive. The shortest-path
    /// based oracles require strictly positive weights: with zero-weight
    /// edges a minimum closed walk may traverse an edge twice in the same
    /// direction, which breaks the `{-1, 0, 1}` normalization of directed
    /// cycles.
    fn is_positive(&self) -> bool {
        matches!(self.cmp_weight(&Self::zero()), Ordering::Greater)
    }
}

impl<T> Weight for T where T: Copy + PartialOrd + Zero + Add<Output = Self> + Debug {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert_eq!(3u64.cmp_weight(&5), Ordering::Less);
        assert_eq!(2.5f64.cmp_weight(&2.5), Ordering::Equal);
        assert!((-1i64).is_negative());
        assert!(!0u32.is_negative());
        assert!(1u64.is_positive());
        assert!(!0u32.is_positive());
        assert!(!(-2.5f64).is_positive());
    }

    #[test]
    #[should_panic]
    fn nan_is_rejected() {
        let _ = f64::NAN.cmp_weight(&1.0);
    }
}
