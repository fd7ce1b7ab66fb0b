/*!
# Basis Verification

Independent checkers for computed cycle bases. They re-derive everything from
the edge numbering and the claimed `(cycles, certificate)` pair and share no
code with the construction, so a bug in an oracle or the engine cannot hide
in its own verifier.

A basis is accepted iff
- it has exactly `dim` cycles and `dim` certificate vectors,
- every cycle is a genuine element of the cycle space (even induced degrees
  for undirected graphs, a modular circulation for directed ones),
- the pair is lower-triangular with non-zero diagonal, i.e.
  `C[i]·S[j] == 0` for `i < j` and `C[i]·S[i] != 0`.

The triangular shape certifies linear independence; minimality itself is not
re-checked (that would require re-solving the problem).
*/

use crate::{
    numbering::EdgeNumbering,
    vectors::{CycleVector, FpVector},
    *,
};

/// Checks an undirected basis over GF(2) against its numbering
pub fn verify_undirected_basis(
    numbering: &EdgeNumbering,
    cycles: &[CycleVector],
    certificate: &[CycleVector],
) -> bool {
    let dim = numbering.dim() as usize;
    if !numbering.is_undirected() || cycles.len() != dim || certificate.len() != dim {
        return false;
    }

    let m = numbering.number_of_edges();
    let mut degree = vec![0u32; numbering.number_of_nodes() as usize];

    for cycle in cycles {
        if cycle.is_empty() {
            return false;
        }
        for i in cycle.iter() {
            if i >= m {
                return false;
            }
            let Edge(u, v) = numbering.edge(i);
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }

        let even = cycle.iter().all(|i| {
            let Edge(u, v) = numbering.edge(i);
            degree[u as usize] % 2 == 0 && degree[v as usize] % 2 == 0
        });
        for i in cycle.iter() {
            let Edge(u, v) = numbering.edge(i);
            degree[u as usize] = 0;
            degree[v as usize] = 0;
        }
        if !even {
            return false;
        }
    }

    cycles.iter().enumerate().all(|(i, c)| {
        certificate.iter().enumerate().all(|(j, s)| match i.cmp(&j) {
            std::cmp::Ordering::Less => !c.inner_product(s),
            std::cmp::Ordering::Equal => c.inner_product(s),
            std::cmp::Ordering::Greater => true,
        })
    })
}

/// Checks a directed basis over a common prime field against its numbering.
///
/// Cycle-space membership is checked as flow conservation: a coefficient `r`
/// on edge `(u, v)` sends `r` units out of `u` and into `v`; per cycle every
/// node must balance modulo the prime.
pub fn verify_directed_basis(
    numbering: &EdgeNumbering,
    cycles: &[FpVector],
    certificate: &[FpVector],
) -> bool {
    let dim = numbering.dim() as usize;
    if numbering.is_undirected() || cycles.len() != dim || certificate.len() != dim {
        return false;
    }
    let Some(p) = cycles.first().map(|c| c.prime()) else {
        return true;
    };
    if cycles.iter().chain(certificate).any(|v| v.prime() != p) {
        return false;
    }

    let m = numbering.number_of_edges();
    let mut balance = vec![0u64; numbering.number_of_nodes() as usize];

    for cycle in cycles {
        if cycle.is_empty() {
            return false;
        }
        for (i, r) in cycle.iter() {
            if i >= m || r == 0 || r >= p {
                return false;
            }
            let Edge(u, v) = numbering.edge(i);
            balance[u as usize] = (balance[u as usize] + r) % p;
            balance[v as usize] = (balance[v as usize] + p - r) % p;
        }

        let conserved = cycle.iter().all(|(i, _)| {
            let Edge(u, v) = numbering.edge(i);
            balance[u as usize] == 0 && balance[v as usize] == 0
        });
        for (i, _) in cycle.iter() {
            let Edge(u, v) = numbering.edge(i);
            balance[u as usize] = 0;
            balance[v as usize] = 0;
        }
        if !conserved {
            return false;
        }
    }

    cycles.iter().enumerate().all(|(i, c)| {
        certificate.iter().enumerate().all(|(j, s)| match i.cmp(&j) {
            std::cmp::Ordering::Less => c.inner_product(s) == 0,
            std::cmp::Ordering::Equal => c.inner_product(s) != 0,
            std::cmp::Ordering::Greater => true,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        directed::DirectedMcb,
        numbering::EdgeNumbering,
        ops::*,
        repr::{AdjArrayDir, AdjArrayUndir},
        undirected::UndirectedMcb,
    };

    #[test]
    fn accepts_and_rejects_undirected() {
        let graph = AdjArrayUndir::from_edges(
            5,
            [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)],
        );
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 6];
        let basis = UndirectedMcb::new().run(&numbering, &weights);

        assert!(verify_undirected_basis(
            &numbering,
            &basis.cycles,
            &basis.certificate
        ));

        // Wrong cardinality
        assert!(!verify_undirected_basis(
            &numbering,
            &basis.cycles[..1],
            &basis.certificate
        ));

        // A path is not a cycle
        let mut broken = basis.cycles.clone();
        broken[0] = CycleVector::from_indices([0, 1]);
        if broken[0] == basis.cycles[0] {
            broken[0] = CycleVector::from_indices([0, 2]);
        }
        assert!(!verify_undirected_basis(
            &numbering,
            &broken,
            &basis.certificate
        ));

        // Reversing the iteration order breaks the triangular shape
        let mut cycles = basis.cycles.clone();
        cycles.reverse();
        assert!(!verify_undirected_basis(
            &numbering,
            &cycles,
            &basis.certificate
        ));
    }

    #[test]
    fn accepts_and_rejects_directed() {
        let graph = AdjArrayDir::from_edges(
            4,
            [(0, 1), (1, 2), (2, 0), (2, 3), (3, 0)],
        );
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 5];
        let result = DirectedMcb::new()
            .fixed_prime(101)
            .run(&numbering, &weights)
            .unwrap();

        assert!(verify_directed_basis(
            &numbering,
            &result.basis.cycles,
            &result.basis.certificate
        ));

        // Corrupting a residue violates flow conservation
        let mut broken = result.basis.cycles.clone();
        let mut tampered = FpVector::new(101);
        for (k, (i, r)) in broken[0].iter().enumerate() {
            tampered.append(i, if k == 0 { (r + 1) % 101 } else { r });
        }
        tampered.sort();
        broken[0] = tampered;
        assert!(!verify_directed_basis(
            &numbering,
            &broken,
            &result.basis.certificate
        ));

        // A mismatched prime is rejected outright
        let foreign: Vec<_> = result
            .basis
            .certificate
            .iter()
            .map(|s| {
                let mut v = FpVector::new(103);
                for (i, r) in s.iter() {
                    v.append(i, r % 103);
                }
                v.sort();
                v
            })
            .collect();
        assert!(!verify_directed_basis(
            &numbering,
            &result.basis.cycles,
            &foreign
        ));
    }

    #[test]
    fn empty_bases_are_trivially_valid() {
        let undirected = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
        let directed = AdjArrayDir::from_edges(3, [(0, 1), (1, 2)]);

        assert!(verify_undirected_basis(
            &EdgeNumbering::build(&undirected),
            &[],
            &[]
        ));
        assert!(verify_directed_basis(
            &EdgeNumbering::build(&directed),
            &[],
            &[]
        ));
    }
}
