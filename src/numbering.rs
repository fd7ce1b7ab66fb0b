/*!
# Edge Numbering

The cycle space of a graph with `m` edges, `n` nodes, and `k` (weakly)
connected components has dimension `dim = m - n + k` (the circuit rank).
[`EdgeNumbering`] fixes a coordinate system for this space: it assigns every
edge a stable index in `[0, m)` such that the `dim` **non-tree** edges of a
BFS spanning forest occupy the indices `0..dim` (in discovery order) and the
forest edges the indices `dim..m`.

Every cycle is then uniquely determined by its restriction onto the non-tree
coordinates, which is what the support-vector machinery in
[`engine`](crate::engine) exploits.

The numbering is an immutable snapshot: any structural change to the graph
invalidates it and requires a rebuild.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::{ops::*, *};

/// A stable edge indexing separating spanning-forest edges from the free
/// generators of the cycle space. Built once from a graph snapshot via
/// [`EdgeNumbering::build`].
#[derive(Clone, Debug)]
pub struct EdgeNumbering {
    /// Position `i` holds the edge with numbering index `i`
    edges: Vec<Edge>,
    /// Inverse of `edges`; keyed by normalized edges for undirected graphs
    ranks: FxHashMap<Edge, NumEdges>,
    num_nodes: NumNodes,
    num_components: NumNodes,
    undirected: bool,
}

impl EdgeNumbering {
    /// Runs a BFS spanning forest over the underlying undirected shape of
    /// `graph` and numbers all edges. O(n + m) time and O(m) space.
    ///
    /// Defined for every graph, including the empty one (`dim() == 0`).
    pub fn build<G>(graph: &G) -> Self
    where
        G: AdjacencyList + GraphType,
    {
        let n = graph.number_of_nodes();
        let undirected = G::is_undirected();

        let all_edges: Vec<Edge> = graph.edges(undirected).collect();
        let m = all_edges.len();

        // Incidence over the undirected shape; each entry remembers the
        // position of its edge in `all_edges`
        let mut incidence: Vec<Vec<(Node, NumEdges)>> = vec![Vec::new(); n as usize];
        for (pos, &Edge(u, v)) in all_edges.iter().enumerate() {
            incidence[u as usize].push((v, pos as NumEdges));
            if u != v {
                incidence[v as usize].push((u, pos as NumEdges));
            }
        }

        let mut visited = NodeBitSet::new(n);
        let mut seen_edge = vec![false; m];
        let mut non_tree: Vec<NumEdges> = Vec::new();
        let mut tree: Vec<NumEdges> = Vec::new();
        let mut queue = VecDeque::new();
        let mut num_components = 0;

        for root in graph.vertices_range() {
            if visited.set_bit(root) {
                continue;
            }
            num_components += 1;

            queue.push_back(root);
            while let Some(u) = queue.pop_front() {
                for &(v, pos) in &incidence[u as usize] {
                    if seen_edge[pos as usize] {
                        continue;
                    }
                    seen_edge[pos as usize] = true;

                    if visited.set_bit(v) {
                        // Already discovered endpoint: free generator
                        non_tree.push(pos);
                    } else {
                        tree.push(pos);
                        queue.push_back(v);
                    }
                }
            }
        }

        let mut edges = Vec::with_capacity(m);
        edges.extend(non_tree.iter().map(|&pos| all_edges[pos as usize]));
        edges.extend(tree.iter().map(|&pos| all_edges[pos as usize]));

        let ranks = edges
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                let key = if undirected { e.normalized() } else { e };
                (key, i as NumEdges)
            })
            .collect();

        Self {
            edges,
            ranks,
            num_nodes: n,
            num_components,
            undirected,
        }
    }

    /// Returns the number of nodes of the underlying graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    /// Returns the number of edges of the underlying graph
    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Returns the number of (weakly) connected components
    pub fn num_components(&self) -> NumNodes {
        self.num_components
    }

    /// Returns the dimension of the cycle space, i.e. `m - n + k`.
    /// This is the exact number of basis cycles to produce.
    pub fn dim(&self) -> NumEdges {
        self.number_of_edges() + self.num_components - self.num_nodes
    }

    /// Returns *true* if the numbering was built from an undirected graph
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Returns the edge with numbering index `i`.
    /// ** Panics if `i >= m` **
    pub fn edge(&self, i: NumEdges) -> Edge {
        self.edges[i as usize]
    }

    /// Returns all edges ordered by numbering index
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the numbering index of `e` (looked up normalized for
    /// undirected graphs), or `None` if the edge is not part of the snapshot
    pub fn rank_of(&self, e: Edge) -> Option<NumEdges> {
        let key = if self.undirected { e.normalized() } else { e };
        self.ranks.get(&key).copied()
    }

    /// Returns *true* if the edge with index `i` belongs to the spanning forest
    pub fn is_tree_edge(&self, i: NumEdges) -> bool {
        i >= self.dim()
    }

    /// Produces the index-aligned weight vector from a per-edge accessor
    pub fn weights_with<W, F>(&self, mut weight_of: F) -> Vec<W>
    where
        F: FnMut(Edge) -> W,
    {
        self.edges.iter().map(|&e| weight_of(e)).collect()
    }
}
