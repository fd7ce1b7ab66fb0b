/*!
# Level-Graph Oracle

Answers "minimum-weight directed cycle whose inner product with a support
vector `X` is non-zero mod p" by an exploded shortest-path search: every node
conceptually gets `p` levels `0..p`, and traversing an edge `e` forward moves
up by `X[e]` levels (backward by `-X[e]`, both mod p). A walk from `(v, 0)`
back to `(v, l)` with `l != 0` is then exactly a closed walk with field
pairing `l != 0`.

The `p * n` states are never materialized: the search creates them lazily in
a hash map keyed by `(node, level)`.
*/

use std::collections::BinaryHeap;

use fxhash::FxHashMap;

use crate::{numbering::EdgeNumbering, oracle::CycleOracle, vectors::FpVector, weight::Weight, *};

struct LevelHeapItem<W> {
    dist: W,
    node: Node,
    level: u64,
}

impl<W: Weight> PartialEq for LevelHeapItem<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<W: Weight> Eq for LevelHeapItem<W> {}

impl<W: Weight> PartialOrd for LevelHeapItem<W> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for LevelHeapItem<W> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .dist
            .cmp_weight(&self.dist)
            .then_with(|| (other.node, other.level).cmp(&(self.node, self.level)))
    }
}

/// Lazily created per-state search data
struct LevelState<W> {
    dist: W,
    settled: bool,
    pred_node: Node,
    pred_level: u64,
    pred_edge: NumEdges,
    pred_forward: bool,
}

/// The directed "shortest non-orthogonal cycle" oracle over a fixed prime
/// field `F_p`. Directed cycles may traverse edges against their orientation
/// (with coefficient `-1`); the oracle therefore searches the underlying
/// undirected shape and tracks traversal directions.
pub struct LevelGraphOracle<'a, W> {
    numbering: &'a EdgeNumbering,
    weights: &'a [W],
    prime: u64,
    /// CSR incidence over the undirected shape with a forward flag
    first_out: Vec<NumEdges>,
    inc_edge: Vec<NumEdges>,
    inc_other: Vec<Node>,
    inc_forward: Vec<bool>,
    /// Dense projection of the current support onto the edges
    residues: Vec<u64>,
    touched_residues: Vec<NumEdges>,
    states: FxHashMap<(Node, u64), LevelState<W>>,
    heap: BinaryHeap<LevelHeapItem<W>>,
}

impl<'a, W: Weight> LevelGraphOracle<'a, W> {
    /// Creates the oracle for a directed numbering snapshot and a fixed
    /// prime `p`.
    /// ** Panics if the numbering is undirected, `p < 2`, or any weight is
    /// not strictly positive or missing. Strict positivity guarantees that a
    /// minimum closed walk never traverses an edge twice in the same
    /// direction, which keeps all cycle residues in `{1, p - 1}` **
    pub fn new(numbering: &'a EdgeNumbering, weights: &'a [W], prime: u64) -> Self {
        assert!(
            !numbering.is_undirected(),
            "level-graph oracle requires a directed graph"
        );
        assert!(prime >= 2, "prime must be at least 2, got {prime}");
        let n = numbering.number_of_nodes();
        let m = numbering.number_of_edges();
        assert_eq!(weights.len(), m as usize, "weights must be index-aligned");
        assert!(
            weights.iter().all(|w| w.is_positive()),
            "edge weights must be strictly positive"
        );

        let mut degree = vec![0 as NumEdges; n as usize];
        for &Edge(u, v) in numbering.edges() {
            degree[u as usize] += 1;
            if u != v {
                degree[v as usize] += 1;
            }
        }

        let mut first_out = Vec::with_capacity(n as usize + 1);
        let mut acc = 0;
        first_out.push(0);
        for &d in &degree {
            acc += d;
            first_out.push(acc);
        }

        let mut slot = first_out.clone();
        let slots = acc as usize;
        let mut inc_edge = vec![INVALID_EDGE; slots];
        let mut inc_other = vec![INVALID_NODE; slots];
        let mut inc_forward = vec![false; slots];
        for (i, &Edge(u, v)) in numbering.edges().iter().enumerate() {
            inc_edge[slot[u as usize] as usize] = i as NumEdges;
            inc_other[slot[u as usize] as usize] = v;
            inc_forward[slot[u as usize] as usize] = true;
            slot[u as usize] += 1;

            if u != v {
                inc_edge[slot[v as usize] as usize] = i as NumEdges;
                inc_other[slot[v as usize] as usize] = u;
                inc_forward[slot[v as usize] as usize] = false;
                slot[v as usize] += 1;
            }
        }

        Self {
            numbering,
            weights,
            prime,
            first_out,
            inc_edge,
            inc_other,
            inc_forward,
            residues: vec![0; m as usize],
            touched_residues: Vec::new(),
            states: FxHashMap::default(),
            heap: BinaryHeap::new(),
        }
    }

    /// Returns the prime of the field the oracle works over
    pub fn prime(&self) -> u64 {
        self.prime
    }

    fn project_support(&mut self, support: &FpVector) {
        for &e in &self.touched_residues {
            self.residues[e as usize] = 0;
        }
        self.touched_residues.clear();

        for (e, r) in support.iter() {
            self.residues[e as usize] = r;
            self.touched_residues.push(e);
        }
    }

    /// Lazy Dijkstra from `(v, 0)` to the first settled `(v, l)` with
    /// `l != 0`. Returns the round-trip weight and the traversed
    /// `(edge, forward)` steps. Never relaxes into a distance worse than
    /// `bound`.
    fn search_from(&mut self, v: Node, bound: Option<W>) -> Option<(W, Vec<(NumEdges, bool)>)> {
        let p = self.prime;
        self.states.clear();
        self.heap.clear();

        self.states.insert(
            (v, 0),
            LevelState {
                dist: W::zero(),
                settled: false,
                pred_node: INVALID_NODE,
                pred_level: 0,
                pred_edge: INVALID_EDGE,
                pred_forward: false,
            },
        );
        self.heap.push(LevelHeapItem {
            dist: W::zero(),
            node: v,
            level: 0,
        });

        while let Some(LevelHeapItem { dist, node, level }) = self.heap.pop() {
            {
                let state = self.states.get_mut(&(node, level)).unwrap();
                if state.settled {
                    continue;
                }
                state.settled = true;
            }

            if node == v && level != 0 {
                // First re-discovered image of the source: minimum round trip
                let mut steps = Vec::new();
                let (mut cu, mut cl) = (node, level);
                loop {
                    let state = &self.states[&(cu, cl)];
                    if state.pred_edge == INVALID_EDGE {
                        break;
                    }
                    steps.push((state.pred_edge, state.pred_forward));
                    (cu, cl) = (state.pred_node, state.pred_level);
                }
                return Some((dist, steps));
            }

            for slot in self.first_out[node as usize]..self.first_out[node as usize + 1] {
                let e = self.inc_edge[slot as usize] as usize;
                let forward = self.inc_forward[slot as usize];
                let other = self.inc_other[slot as usize];

                let delta = if forward {
                    self.residues[e]
                } else {
                    (p - self.residues[e]) % p
                };
                let nlevel = (level + delta) % p;

                let ndist = dist + self.weights[e];
                assert!(!ndist.is_negative(), "relaxed distance became negative");
                if let Some(b) = bound {
                    if ndist.cmp_weight(&b) == std::cmp::Ordering::Greater {
                        continue;
                    }
                }

                let improved = match self.states.get(&(other, nlevel)) {
                    Some(state) => {
                        !state.settled
                            && ndist.cmp_weight(&state.dist) == std::cmp::Ordering::Less
                    }
                    None => true,
                };
                if improved {
                    self.states.insert(
                        (other, nlevel),
                        LevelState {
                            dist: ndist,
                            settled: false,
                            pred_node: node,
                            pred_level: level,
                            pred_edge: e as NumEdges,
                            pred_forward: forward,
                        },
                    );
                    self.heap.push(LevelHeapItem {
                        dist: ndist,
                        node: other,
                        level: nlevel,
                    });
                }
            }
        }

        None
    }

    /// Accumulates the ±1 traversal coefficients of a closed walk into a
    /// sorted `F_p` vector
    fn steps_to_vector(&self, steps: &[(NumEdges, bool)]) -> FpVector {
        let p = self.prime;
        let mut coeffs: FxHashMap<NumEdges, u64> = FxHashMap::default();
        for &(e, forward) in steps {
            let delta = if forward { 1 } else { p - 1 };
            let c = coeffs.entry(e).or_insert(0);
            *c = (*c + delta) % p;
        }

        let mut vector = FpVector::new(p);
        for (e, r) in coeffs {
            vector.append(e, r);
        }
        vector.sort();
        vector
    }
}

impl<W: Weight> CycleOracle<W> for LevelGraphOracle<'_, W> {
    type Vector = FpVector;

    fn dim(&self) -> NumEdges {
        self.numbering.dim()
    }

    fn unit_support(&self, i: NumEdges) -> FpVector {
        debug_assert!(i < self.dim());
        FpVector::unit(self.prime, i)
    }

    fn shortest_nonorthogonal_cycle(&mut self, support: &FpVector) -> (W, FpVector) {
        assert_eq!(
            support.prime(),
            self.prime,
            "support vector must share the oracle's prime"
        );
        self.project_support(support);

        let mut best: Option<(W, Vec<(NumEdges, bool)>)> = None;
        for v in 0..self.numbering.number_of_nodes() {
            let bound = best.as_ref().map(|(w, _)| *w);
            if let Some((weight, steps)) = self.search_from(v, bound) {
                let better = match &best {
                    None => true,
                    Some((bw, bs)) => match weight.cmp_weight(bw) {
                        std::cmp::Ordering::Less => true,
                        std::cmp::Ordering::Equal => steps.len() < bs.len(),
                        std::cmp::Ordering::Greater => false,
                    },
                };
                if better {
                    best = Some((weight, steps));
                }
            }
        }

        let (weight, steps) = best
            .expect("support vector admits no non-orthogonal cycle — oracle invariant violated");
        let cycle = self.steps_to_vector(&steps);
        debug_assert_ne!(cycle.inner_product(support), 0);
        (weight, cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ops::*, repr::AdjArrayDir};

    #[test]
    fn directed_square() {
        let graph = AdjArrayDir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 4];

        let mut oracle = LevelGraphOracle::new(&numbering, &weights, 11);
        let support = oracle.unit_support(0);
        let (weight, cycle) = oracle.shortest_nonorthogonal_cycle(&support);

        assert_eq!(weight, 4);
        assert_eq!(cycle.support_size(), 4);
        // All edges are traversed in a consistent orientation
        let signs = cycle.signed_entries();
        assert!(signs.iter().all(|&(_, s)| s == signs[0].1));
    }

    #[test]
    fn opposing_orientation_uses_negative_coefficients() {
        // A "square" where one edge points against the cycle direction
        let graph = AdjArrayDir::from_edges(4, [(0, 1), (1, 2), (3, 2), (3, 0)]);
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 4];

        let mut oracle = LevelGraphOracle::new(&numbering, &weights, 13);
        let support = oracle.unit_support(0);
        let (weight, cycle) = oracle.shortest_nonorthogonal_cycle(&support);

        assert_eq!(weight, 4);
        let signs = cycle.signed_entries();
        assert_eq!(signs.len(), 4);
        assert!(signs.iter().any(|&(_, s)| s == 1));
        assert!(signs.iter().any(|&(_, s)| s == -1));
    }

    #[test]
    fn prefers_the_cheaper_triangle() {
        // Two directed triangles sharing the node 0
        let graph = AdjArrayDir::from_edges(
            5,
            [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)],
        );
        let numbering = EdgeNumbering::build(&graph);
        let weights =
            numbering.weights_with(|e| if e.0 <= 2 && e.1 <= 2 { 10u64 } else { 1 });

        let mut oracle = LevelGraphOracle::new(&numbering, &weights, 7);
        // Non-orthogonal to every cycle: both triangles qualify; the cheap
        // one wins
        let mut support = FpVector::new(7);
        support.append(0, 1);
        support.append(1, 1);
        support.sort();

        let (weight, cycle) = oracle.shortest_nonorthogonal_cycle(&support);
        assert_eq!(weight, 3);
        assert_eq!(cycle.support_size(), 3);
    }

    #[test]
    #[should_panic]
    fn zero_weights_are_rejected() {
        let graph = AdjArrayDir::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64, 0, 1];
        let _ = LevelGraphOracle::new(&numbering, &weights, 11);
    }
}
