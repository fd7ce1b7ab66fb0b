/*!
`cyclebases` computes **minimum cycle bases** of edge-weighted graphs:

- **undirected** graphs over GF(2), exactly and deterministically,
- **directed** graphs over a random prime field, as a Monte-Carlo computation
  with a configurable error probability.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
As most common graphs do not exceed `2^32` nodes, this should normally suffice and save space as compared to `u64/usize`.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`; in an **undirected** graph `Edge(u, v)` is treated as equivalent to `Edge(v, u)`, in a **directed** graph the orientation matters.

Cycle-space coordinates are fixed by an [`EdgeNumbering`](crate::numbering::EdgeNumbering): a stable edge indexing in which the non-tree edges of a BFS spanning forest come first.
Cycles are sparse vectors over these indices, either [`CycleVector`](crate::vectors::CycleVector) (GF(2)) or [`FpVector`](crate::vectors::FpVector) (prime field).

# Design

The computation is split into three exchangeable layers:

- the [`engine`] runs the support-vector greedy exchange algorithm and is
  oblivious to the field and the graph,
- an [`oracle`](crate::oracle::CycleOracle) answers "minimum-weight cycle
  non-orthogonal to this support" — the [signed-graph
  search](crate::oracle::SignedGraphOracle) for undirected graphs, the
  [level-graph search](crate::oracle::LevelGraphOracle) for directed ones,
- the drivers [`UndirectedMcb`](crate::undirected::UndirectedMcb) and
  [`DirectedMcb`](crate::directed::DirectedMcb) wire both together (the
  directed one adding prime sampling and probability amplification).

All drivers are configurable structs using the *Builder* / *Setter* pattern before calling the configured computation on a numbered graph.
For the undirected common case, the sugar trait [`MinimumCycleBasis`](crate::undirected::MinimumCycleBasis) is implemented on the graph itself.

# Usage

```
use cyclebases::prelude::*;

let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
let (numbering, basis) = graph.minimum_cycle_basis(|Edge(u, v)| 1 + (u + v) as u64);

assert_eq!(basis.dim() as u32, numbering.dim());
assert!(verify_undirected_basis(&numbering, &basis.cycles, &basis.certificate));
```

Every result carries a *certificate*: the support vectors witnessing that the
returned cycles are linearly independent (lower-triangular with non-zero
diagonal against the cycles). [`verify`] re-checks a basis independently of
the construction.

In most use-cases, `use cyclebases::prelude::*;` suffices for your needs.
*/

pub mod directed;
pub mod edge;
pub mod engine;
pub mod error;
pub mod node;
pub mod numbering;
pub mod ops;
pub mod oracle;
pub mod primes;
pub mod repr;
pub mod undirected;
pub mod vectors;
pub mod verify;
pub mod weight;

pub use edge::*;
pub use node::*;

/// `cyclebases::prelude` includes definitions for nodes and edges, all basic graph operation traits and representations, as well as the basis drivers and their result types.
pub mod prelude {
    pub use super::{
        directed::*,
        edge::*,
        engine::{CycleBasis, SupportVectorEngine},
        error::McbError,
        node::*,
        numbering::EdgeNumbering,
        ops::*,
        oracle::*,
        repr::*,
        undirected::*,
        vectors::{CycleVector, FpVector},
        verify::*,
        weight::Weight,
    };
}
