/*!
# Support-Vector Basis Engine

The greedy exchange algorithm shared by all basis-construction strategies:
maintain support vectors `S[0..dim]` (initially the standard basis of the
non-tree coordinates), and per iteration `k` ask the oracle for the
minimum-weight cycle `C[k]` non-orthogonal to `S[k]`, then update all later
supports to be orthogonal to `C[k]`.

Greedily picking the shortest cycle compatible with the remaining
orthogonality constraints yields a basis of minimum total weight (an exchange
argument over the cycle-space vector space). Oracle ties are broken by
preferring fewer edges, which keeps the certificate's predecessor structure
acyclic when multiple minimum-weight candidates exist.

The emitted pair `(C, S)` satisfies `C[i]·S[j] == 0` for `i < j` and
`C[i]·S[i] != 0` for all `i` — the lower-triangular, non-zero-diagonal shape
that certifies linear independence and optimality.
*/

use tracing::trace;

use crate::{
    oracle::{BasisVector, CycleOracle},
    weight::Weight,
};

/// A computed cycle basis together with its optimality certificate.
/// `cycles[k]` and `certificate[k]` are co-indexed by iteration.
#[derive(Clone, Debug)]
pub struct CycleBasis<W, V> {
    /// Sum of the weights of all basis cycles
    pub total_weight: W,
    /// The basis cycles in iteration order (not sorted by weight)
    pub cycles: Vec<V>,
    /// The support vector each cycle was queried with
    pub certificate: Vec<V>,
}

impl<W, V> CycleBasis<W, V> {
    /// Returns the dimension of the computed basis
    pub fn dim(&self) -> usize {
        self.cycles.len()
    }
}

/// Configuration of the support-vector engine
#[derive(Clone, Copy, Debug)]
pub struct SupportVectorEngine {
    exchange: bool,
}

impl Default for SupportVectorEngine {
    fn default() -> Self {
        Self { exchange: true }
    }
}

impl SupportVectorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables the smallest-support-first exchange heuristic.
    /// A performance heuristic only: it reduces oracle cost but does not
    /// change correctness.
    pub fn exchange(mut self, exchange: bool) -> Self {
        self.exchange = exchange;
        self
    }

    /// Drives `dim` oracle queries and maintains the orthogonal witness
    /// basis. Total cost is dominated by the oracle.
    pub fn compute<W, O>(&self, oracle: &mut O) -> CycleBasis<W, O::Vector>
    where
        W: Weight,
        O: CycleOracle<W>,
    {
        let dim = oracle.dim() as usize;

        let mut supports: Vec<O::Vector> =
            (0..dim).map(|i| oracle.unit_support(i as u32)).collect();
        let mut cycles = Vec::with_capacity(dim);
        let mut total_weight = W::zero();

        for k in 0..dim {
            if self.exchange {
                // Querying the sparsest remaining support is cheapest
                let j = (k..dim)
                    .min_by_key(|&j| supports[j].support_size())
                    .unwrap();
                supports.swap(k, j);
            }

            let (weight, ck) = oracle.shortest_nonorthogonal_cycle(&supports[k]);
            trace!(iteration = k, weight = ?weight, "basis cycle found");
            total_weight = total_weight + weight;

            let (head, tail) = supports.split_at_mut(k + 1);
            let sk = &head[k];
            for sl in tail.iter_mut() {
                if !ck.orthogonal_to(sl) {
                    sl.eliminate_with(&ck, sk);
                }
            }

            cycles.push(ck);
        }

        CycleBasis {
            total_weight,
            cycles,
            certificate: supports,
        }
    }
}
