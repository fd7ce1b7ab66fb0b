/*!
# Graph Representations

Adjacency-array backed graph storage for simple graphs:

- [`AdjArrayUndir`] for undirected graphs (each edge is stored in the
  neighborhoods of both endpoints),
- [`AdjArrayDir`] for directed graphs (only out-neighbors are stored).

Both are intentionally minimal: the cycle-basis algorithms in this crate only
read graphs through the traits in [`crate::ops`] and build their own derived
incidence structures keyed by an [`EdgeNumbering`](crate::numbering::EdgeNumbering).
*/

use crate::{ops::*, *};

macro_rules! impl_common_graph_ops {
    ($struct:ident, $dir:ident) => {
        impl GraphType for $struct {
            type Dir = $dir;
        }

        impl GraphNodeOrder for $struct {
            fn number_of_nodes(&self) -> NumNodes {
                self.nbs.len() as NumNodes
            }

            fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
                self.vertices_range()
            }
        }

        impl GraphEdgeOrder for $struct {
            fn number_of_edges(&self) -> NumEdges {
                self.num_edges
            }
        }

        impl AdjacencyList for $struct {
            fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
                self.nbs[u as usize].iter().copied()
            }

            fn degree_of(&self, u: Node) -> NumNodes {
                self.nbs[u as usize].len() as NumNodes
            }
        }

        impl AdjacencyTest for $struct {
            fn has_edge(&self, u: Node, v: Node) -> bool {
                assert!(v < self.number_of_nodes());
                self.nbs[u as usize].contains(&v)
            }
        }

        impl GraphNew for $struct {
            fn new(n: NumNodes) -> Self {
                Self {
                    nbs: vec![Vec::new(); n as usize],
                    num_edges: 0,
                }
            }
        }
    };
}

/// An undirected graph representation using an Adjacency-Array
#[derive(Clone, Default)]
pub struct AdjArrayUndir {
    nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

impl_common_graph_ops!(AdjArrayUndir, Undirected);

impl GraphEdgeEditing for AdjArrayUndir {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        if self.has_edge(u, v) {
            return true;
        }

        self.nbs[u as usize].push(v);
        if u != v {
            self.nbs[v as usize].push(u);
        }
        self.num_edges += 1;
        false
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        let pos = self.nbs[u as usize].iter().position(|&w| w == v);
        if let Some(pos) = pos {
            self.nbs[u as usize].swap_remove(pos);
            if u != v {
                let pos = self.nbs[v as usize].iter().position(|&w| w == u).unwrap();
                self.nbs[v as usize].swap_remove(pos);
            }
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

/// A directed graph representation using an Adjacency-Array over out-neighbors
#[derive(Clone, Default)]
pub struct AdjArrayDir {
    nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

impl_common_graph_ops!(AdjArrayDir, Directed);

impl GraphEdgeEditing for AdjArrayDir {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        if self.has_edge(u, v) {
            return true;
        }

        self.nbs[u as usize].push(v);
        self.num_edges += 1;
        false
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        let pos = self.nbs[u as usize].iter().position(|&w| w == v);
        if let Some(pos) = pos {
            self.nbs[u as usize].swap_remove(pos);
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Creates a list of at most `m_ub` random edges for nodes `0..n`
    fn random_edges<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        m_ub: NumEdges,
        undirected: bool,
    ) -> Vec<Edge> {
        let mut edges: Vec<Edge> = (0..m_ub)
            .map(|_| {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);

                if undirected {
                    Edge(u, v).normalized()
                } else {
                    Edge(u, v)
                }
            })
            .collect_vec();
        edges.sort_unstable();
        edges.dedup();

        edges
    }

    #[test]
    fn graph_new() {
        for n in 1..50 {
            let graph = AdjArrayUndir::new(n);

            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(graph.number_of_nodes(), n);
            assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
        }
    }

    #[test]
    fn undirected_adjacency() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [10 as NumNodes, 20, 50] {
            for _ in 0..10 {
                let edges = random_edges(rng, n, n * 4, true);
                let graph = AdjArrayUndir::from_edges(n, edges.clone());

                assert_eq!(graph.number_of_edges(), edges.len() as NumEdges);
                assert_eq!(edges, graph.ordered_edges(true).collect_vec());

                for &Edge(u, v) in &edges {
                    assert!(graph.has_edge(u, v));
                    assert!(graph.has_edge(v, u));
                }
            }
        }
    }

    #[test]
    fn directed_adjacency() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);

        for n in [10 as NumNodes, 20, 50] {
            for _ in 0..10 {
                let edges = random_edges(rng, n, n * 4, false);
                let graph = AdjArrayDir::from_edges(n, edges.clone());

                assert_eq!(graph.number_of_edges(), edges.len() as NumEdges);
                assert_eq!(edges, graph.ordered_edges(false).collect_vec());

                for &Edge(u, v) in &edges {
                    assert!(graph.has_edge(u, v));
                    assert!(graph.has_edge(v, u) == edges.contains(&Edge(v, u)));
                }
            }
        }
    }

    #[test]
    fn edge_editing() {
        let mut graph = AdjArrayUndir::new(4);
        graph.add_edges([(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.number_of_edges(), 3);

        assert!(graph.try_add_edge(0, 1));
        assert_eq!(graph.number_of_edges(), 3);

        graph.remove_edge(1, 2);
        assert_eq!(graph.number_of_edges(), 2);
        assert!(!graph.has_edge(1, 2));
        assert!(!graph.try_remove_edge(1, 2));
    }
}
