/*!
# Shortest Non-Orthogonal Cycle Oracles

The support-vector engine in [`crate::engine`] is generic over one oracle
contract: given a support vector `S`, return the minimum-weight cycle whose
inner product with `S` is non-zero. For GF(2) this means a cycle with **odd
intersection** with the support; for `F_p` a cycle with non-zero field
pairing.

Two implementations ship with this crate:

- [`SignedGraphOracle`] — undirected graphs over GF(2), via a doubled
  ("signed") graph and repeated shortest-path searches,
- [`LevelGraphOracle`] — directed graphs over `F_p`, via an exploded
  shortest-path search over `p` levels per node.

Further strategies from the literature — a Horton superset oracle that
pre-enumerates candidate cycles and scans them per query, a
shortest-path-tree hybrid, or a sparse-spanner approximation that trades
exactness for speed — are alternative implementors of the same
[`CycleOracle`] trait and can be swapped in without touching the engine.
An oracle exhausting its candidate set without finding a required cycle is a
bug in its construction and must panic rather than return.
*/

mod level;
mod signed;

pub use level::*;
pub use signed::*;

use crate::{NumEdges, vectors::*, weight::Weight};

/// Vector operations the support-vector engine needs from its witnesses,
/// shared between the GF(2) and the `F_p` instantiation.
pub trait BasisVector: Clone {
    /// Returns the number of non-zero entries
    fn support_size(&self) -> usize;

    /// Returns *true* if the inner product of the two vectors is zero
    fn orthogonal_to(&self, other: &Self) -> bool;

    /// Restores `<ck, self> == 0` by subtracting the right multiple of `sk`,
    /// given that `<ck, sk> != 0`
    fn eliminate_with(&mut self, ck: &Self, sk: &Self);
}

impl BasisVector for CycleVector {
    fn support_size(&self) -> usize {
        self.support_size()
    }

    fn orthogonal_to(&self, other: &Self) -> bool {
        !self.inner_product(other)
    }

    fn eliminate_with(&mut self, _ck: &Self, sk: &Self) {
        // Over GF(2) the eliminating coefficient is always 1
        *self = self.sum(sk);
    }
}

impl BasisVector for FpVector {
    fn support_size(&self) -> usize {
        self.support_size()
    }

    fn orthogonal_to(&self, other: &Self) -> bool {
        self.inner_product(other) == 0
    }

    fn eliminate_with(&mut self, ck: &Self, sk: &Self) {
        let p = self.prime();
        let factor = mul_mod(
            ck.inner_product(self),
            inv_mod(ck.inner_product(sk), p),
            p,
        );
        *self = self.sub(&sk.scalar_mul(factor));
    }
}

/// The oracle contract the support-vector engine depends on.
///
/// Implementations own all mutable search state; the caller's graph is only
/// read. `shortest_nonorthogonal_cycle` takes `&mut self` because oracles
/// keep incremental state (e.g. the sign set of the signed graph) and
/// per-call scratch buffers between queries.
pub trait CycleOracle<W: Weight> {
    type Vector: BasisVector;

    /// Returns the dimension of the cycle space, i.e. the number of queries
    /// the engine will pose
    fn dim(&self) -> NumEdges;

    /// Returns the standard unit support vector for coordinate `i < dim`
    fn unit_support(&self, i: NumEdges) -> Self::Vector;

    /// Returns the minimum-weight cycle with non-zero inner product with
    /// `support`, breaking weight ties by preferring fewer edges.
    /// ** Panics if no such cycle exists — the engine maintains the
    /// invariant that one always does **
    fn shortest_nonorthogonal_cycle(&mut self, support: &Self::Vector) -> (W, Self::Vector);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gf2_elimination() {
        let ck = CycleVector::from_indices([0, 2]);
        let sk = CycleVector::from_indices([0, 1]);

        let mut sl = CycleVector::from_indices([2, 3]);
        assert!(!sl.orthogonal_to(&ck));

        sl.eliminate_with(&ck, &sk);
        assert!(sl.orthogonal_to(&ck));
        assert_eq!(sl, CycleVector::from_indices([0, 1, 2, 3]));
    }

    #[test]
    fn fp_elimination() {
        let p = 13;
        let mut ck = FpVector::new(p);
        ck.append(0, 2);
        ck.append(1, 5);

        let sk = FpVector::unit(p, 0);
        let mut sl = FpVector::unit(p, 1);
        assert!(!sl.orthogonal_to(&ck));

        sl.eliminate_with(&ck, &sk);
        assert!(sl.orthogonal_to(&ck));
    }
}
