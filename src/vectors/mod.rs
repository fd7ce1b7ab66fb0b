/*!
# Sparse Cycle Vectors

Cycles and support vectors are sparse vectors over the edge coordinates fixed
by an [`EdgeNumbering`](crate::numbering::EdgeNumbering):

- [`CycleVector`] lives over GF(2) — an index-sorted set of edge indices with
  implicit entries `1`, used for undirected cycles and their witnesses,
- [`FpVector`] lives over a prime field `F_p` — index-sorted
  `(index, residue)` pairs sharing one prime, used for directed cycles and
  certificates.

Both follow the same `append`/`sort` discipline: [`CycleVector::append`] and
[`FpVector::append`] are O(1) but do not preserve sortedness, and every binary
operator requires both operands sorted by index. Binary operators on
[`FpVector`]s additionally require both operands to share the same prime;
violating either is a programmer error and panics.
*/

mod fp;
mod gf2;

pub use fp::*;
pub use gf2::*;
