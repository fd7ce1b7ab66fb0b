use crate::{EdgeBitSet, NumEdges};

/// A sparse vector over GF(2): the index-sorted set of edge indices with a
/// non-zero (i.e. `1`) entry. Represents either an undirected cycle or a
/// support/witness vector.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CycleVector {
    entries: Vec<NumEdges>,
}

impl CycleVector {
    /// Creates the zero vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard unit vector for coordinate `i`
    pub fn unit(i: NumEdges) -> Self {
        Self { entries: vec![i] }
    }

    /// Creates a vector from arbitrary-order indices. Sorts and asserts
    /// that no index repeats.
    pub fn from_indices(indices: impl IntoIterator<Item = NumEdges>) -> Self {
        let mut entries: Vec<NumEdges> = indices.into_iter().collect();
        entries.sort_unstable();
        assert!(entries.windows(2).all(|w| w[0] < w[1]));
        Self { entries }
    }

    /// Appends an index without re-establishing sortedness. Callers must
    /// [`CycleVector::sort`] before using any binary operator if entries were
    /// appended out of order.
    pub fn append(&mut self, i: NumEdges) {
        self.entries.push(i);
    }

    /// Restores the sortedness required by all binary operators
    pub fn sort(&mut self) {
        self.entries.sort_unstable();
        debug_assert!(self.entries.windows(2).all(|w| w[0] < w[1]));
    }

    /// Returns the number of non-zero entries
    pub fn support_size(&self) -> usize {
        self.entries.len()
    }

    /// Returns *true* if this is the zero vector
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sorted indices of all non-zero entries
    pub fn indices(&self) -> &[NumEdges] {
        &self.entries
    }

    /// Returns an iterator over the sorted non-zero indices
    pub fn iter(&self) -> impl Iterator<Item = NumEdges> + '_ {
        self.entries.iter().copied()
    }

    /// Returns *true* if coordinate `i` is non-zero
    pub fn contains(&self, i: NumEdges) -> bool {
        self.entries.binary_search(&i).is_ok()
    }

    /// Mod-2 addition. Since subtraction equals addition in GF(2), this is
    /// at the same time the symmetric difference of the two index sets.
    /// O(size), both operands must be sorted.
    pub fn sum(&self, other: &Self) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + other.entries.len());

        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            match self.entries[i].cmp(&other.entries[j]) {
                std::cmp::Ordering::Less => {
                    entries.push(self.entries[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    entries.push(other.entries[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        entries.extend_from_slice(&self.entries[i..]);
        entries.extend_from_slice(&other.entries[j..]);

        Self { entries }
    }

    /// Alias of [`CycleVector::sum`]
    #[inline]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.sum(other)
    }

    /// Intersection of the two index sets. O(size), both operands must be sorted.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut entries = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            match self.entries[i].cmp(&other.entries[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    entries.push(self.entries[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        Self { entries }
    }

    /// Inner product over GF(2): the parity of the intersection size.
    /// Returns *true* for an odd intersection.
    pub fn inner_product(&self, other: &Self) -> bool {
        let mut parity = false;

        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            match self.entries[i].cmp(&other.entries[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    parity = !parity;
                    i += 1;
                    j += 1;
                }
            }
        }

        parity
    }

    /// Converts into a dense edge-index set of universe size `m`
    pub fn to_bitset(&self, m: NumEdges) -> EdgeBitSet {
        let mut bits = EdgeBitSet::new(m);
        bits.set_bits(self.iter());
        bits
    }

    /// Converts a dense edge-index set into a sorted sparse vector
    pub fn from_bitset(bits: &EdgeBitSet) -> Self {
        Self {
            entries: bits.iter_set_bits().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn random_vector<R: Rng>(rng: &mut R, m: NumEdges) -> CycleVector {
        let mut v = CycleVector::new();
        for i in 0..m {
            if rng.random_bool(0.3) {
                v.append(i);
            }
        }
        v.sort();
        v
    }

    #[test]
    fn self_sum_is_zero() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for _ in 0..50 {
            let a = random_vector(rng, 64);
            assert!(a.sum(&a).is_empty());
        }
    }

    #[test]
    fn sum_is_commutative_and_associative() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for _ in 0..50 {
            let (a, b, c) = (
                random_vector(rng, 48),
                random_vector(rng, 48),
                random_vector(rng, 48),
            );

            assert_eq!(a.sum(&b), b.sum(&a));
            assert_eq!(a.sum(&b).sum(&c), a.sum(&b.sum(&c)));
        }
    }

    #[test]
    fn inner_product_is_intersection_parity() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..100 {
            let (a, b) = (random_vector(rng, 48), random_vector(rng, 48));
            assert_eq!(a.inner_product(&b), a.intersection(&b).support_size() % 2 == 1);
        }
    }

    #[test]
    fn bitset_round_trip() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);

        for _ in 0..20 {
            let a = random_vector(rng, 48);
            assert_eq!(CycleVector::from_bitset(&a.to_bitset(48)), a);
        }
    }

    #[test]
    fn append_sort_discipline() {
        let mut v = CycleVector::new();
        for i in [5 as NumEdges, 1, 3] {
            v.append(i);
        }
        v.sort();

        assert_eq!(v.indices(), &[1, 3, 5]);
        assert_eq!(v, CycleVector::from_indices([3, 5, 1]));
        assert!(v.contains(3) && !v.contains(2));
        assert_eq!(
            v.intersection(&CycleVector::from_indices([1, 2, 3])).indices(),
            &[1, 3]
        );
        assert_eq!(
            v.sum(&CycleVector::unit(1)).iter().collect_vec(),
            vec![3, 5]
        );
    }
}
