/*!
# Undirected Minimum Cycle Bases

Entry point for the undirected computation: the cycle space lives over GF(2),
the oracle is the signed-graph shortest-odd-cycle search, and the result is
exact and deterministic (no randomization is needed).

For the common case there is also the sugar trait [`MinimumCycleBasis`] that
builds the numbering, the weight vector, and the basis in one call:

```
use cyclebases::{undirected::MinimumCycleBasis, ops::*, repr::AdjArrayUndir};

let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
let (numbering, basis) = graph.minimum_cycle_basis_unit();

assert_eq!(basis.dim(), 1);
assert_eq!(basis.total_weight, 4);
# let _ = numbering;
```
*/

use crate::{
    engine::{CycleBasis, SupportVectorEngine},
    numbering::EdgeNumbering,
    ops::*,
    oracle::{SignedGraphOracle, SignedSearchStrategy},
    vectors::CycleVector,
    weight::Weight,
    *,
};

/// Configurable driver for undirected minimum cycle bases
#[derive(Clone, Copy, Debug)]
pub struct UndirectedMcb {
    exchange: bool,
    strategy: SignedSearchStrategy,
}

impl Default for UndirectedMcb {
    fn default() -> Self {
        Self {
            exchange: true,
            strategy: SignedSearchStrategy::Auto,
        }
    }
}

impl UndirectedMcb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables the engine's exchange heuristic
    pub fn exchange(mut self, exchange: bool) -> Self {
        self.exchange = exchange;
        self
    }

    /// Overrides the oracle's search strategy
    pub fn strategy(mut self, strategy: SignedSearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Computes a minimum cycle basis for the numbered graph.
    /// `weights[i]` must be the weight of edge `numbering.edge(i)`.
    /// ** Panics if the numbering is directed, weights are misaligned, or
    /// any weight is not strictly positive **
    pub fn run<W: Weight>(
        &self,
        numbering: &EdgeNumbering,
        weights: &[W],
    ) -> CycleBasis<W, CycleVector> {
        assert!(
            numbering.is_undirected(),
            "undirected driver requires an undirected numbering"
        );

        let mut oracle = SignedGraphOracle::new(numbering, weights).strategy(self.strategy);
        SupportVectorEngine::new()
            .exchange(self.exchange)
            .compute(&mut oracle)
    }
}

/// One-call minimum cycle basis for undirected graph types
pub trait MinimumCycleBasis: AdjacencyList + GraphType<Dir = Undirected> + Sized {
    /// Numbers the edges and computes a minimum cycle basis with the
    /// weights produced by `weight_of`
    fn minimum_cycle_basis<W, F>(&self, weight_of: F) -> (EdgeNumbering, CycleBasis<W, CycleVector>)
    where
        W: Weight,
        F: FnMut(Edge) -> W,
    {
        let numbering = EdgeNumbering::build(self);
        let weights = numbering.weights_with(weight_of);
        let basis = UndirectedMcb::new().run(&numbering, &weights);
        (numbering, basis)
    }

    /// [`MinimumCycleBasis::minimum_cycle_basis`] with unit weights
    fn minimum_cycle_basis_unit(&self) -> (EdgeNumbering, CycleBasis<u64, CycleVector>) {
        self.minimum_cycle_basis(|_| 1)
    }
}

impl<G: AdjacencyList + GraphType<Dir = Undirected> + Sized> MinimumCycleBasis for G {}
