use crate::NumEdges;

/// Modular multiplication with a `u128` intermediate
#[inline]
pub fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 * b as u128) % p as u128) as u64
}

/// Modular exponentiation by squaring
pub fn pow_mod(mut base: u64, mut exp: u64, p: u64) -> u64 {
    let mut res = 1 % p;
    base %= p;
    while exp > 0 {
        if exp & 1 == 1 {
            res = mul_mod(res, base, p);
        }
        base = mul_mod(base, base, p);
        exp >>= 1;
    }
    res
}

/// Multiplicative inverse mod a prime `p` via Fermat's little theorem.
/// ** Panics if `k == 0 mod p` **
pub fn inv_mod(k: u64, p: u64) -> u64 {
    let k = k % p;
    assert_ne!(k, 0, "zero has no inverse mod {p}");
    pow_mod(k, p - 2, p)
}

/// A sparse vector over the prime field `F_p`: index-sorted
/// `(index, residue)` pairs with residues in `[1, p)` and a shared prime.
/// Represents either an oriented directed cycle or a support/certificate
/// vector.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FpVector {
    prime: u64,
    entries: Vec<(NumEdges, u64)>,
}

impl FpVector {
    /// Creates the zero vector over `F_p`.
    /// ** Panics if `p < 2` **
    pub fn new(prime: u64) -> Self {
        assert!(prime >= 2, "prime must be at least 2, got {prime}");
        Self {
            prime,
            entries: Vec::new(),
        }
    }

    /// Creates the standard unit vector for coordinate `i`
    pub fn unit(prime: u64, i: NumEdges) -> Self {
        let mut v = Self::new(prime);
        v.entries.push((i, 1));
        v
    }

    /// Returns the shared prime
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Returns the number of non-zero entries
    pub fn support_size(&self) -> usize {
        self.entries.len()
    }

    /// Returns *true* if this is the zero vector
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the sorted `(index, residue)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NumEdges, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the residue at coordinate `i` (`0` if absent)
    pub fn residue_of(&self, i: NumEdges) -> u64 {
        match self.entries.binary_search_by_key(&i, |&(j, _)| j) {
            Ok(pos) => self.entries[pos].1,
            Err(_) => 0,
        }
    }

    /// Appends an entry without re-establishing sortedness. Callers must
    /// [`FpVector::sort`] before using any binary operator if entries were
    /// appended out of order. Zero residues are dropped.
    pub fn append(&mut self, i: NumEdges, residue: u64) {
        let residue = residue % self.prime;
        if residue != 0 {
            self.entries.push((i, residue));
        }
    }

    /// Restores the sortedness required by all binary operators
    pub fn sort(&mut self) {
        self.entries.sort_unstable_by_key(|&(i, _)| i);
        debug_assert!(self.entries.windows(2).all(|w| w[0].0 < w[1].0));
    }

    fn assert_same_field(&self, other: &Self) {
        assert_eq!(
            self.prime, other.prime,
            "operands must share the same prime"
        );
    }

    /// Merges two sorted vectors, combining residues with `f` where indices
    /// collide and dropping resulting zeros
    fn merge_with(&self, other: &Self, f: impl Fn(u64, u64) -> u64, map_rhs: impl Fn(u64) -> u64) -> Self {
        self.assert_same_field(other);
        let p = self.prime;

        let mut entries = Vec::with_capacity(self.entries.len() + other.entries.len());
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (li, lr) = self.entries[i];
            let (ri, rr) = other.entries[j];
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => {
                    entries.push((li, lr));
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    entries.push((ri, map_rhs(rr)));
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let r = f(lr, rr) % p;
                    if r != 0 {
                        entries.push((li, r));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        entries.extend_from_slice(&self.entries[i..]);
        entries.extend(other.entries[j..].iter().map(|&(k, r)| (k, map_rhs(r))));

        Self { prime: p, entries }
    }

    /// Component-wise addition mod p. O(size), both operands must be sorted
    /// and share the same prime.
    pub fn add(&self, other: &Self) -> Self {
        self.merge_with(other, |a, b| a + b, |b| b)
    }

    /// Component-wise subtraction mod p. O(size), both operands must be
    /// sorted and share the same prime.
    pub fn sub(&self, other: &Self) -> Self {
        let p = self.prime;
        self.merge_with(other, move |a, b| a + p - b, move |b| p - b)
    }

    /// Component-wise negation mod p
    pub fn negate(&self) -> Self {
        let p = self.prime;
        Self {
            prime: p,
            entries: self.entries.iter().map(|&(i, r)| (i, p - r)).collect(),
        }
    }

    /// Scalar multiplication mod p. Multiplying by `0 mod p` yields the zero
    /// vector.
    pub fn scalar_mul(&self, k: u64) -> Self {
        let p = self.prime;
        let k = k % p;
        Self {
            prime: p,
            entries: self
                .entries
                .iter()
                .filter_map(|&(i, r)| {
                    let r = mul_mod(r, k, p);
                    (r != 0).then_some((i, r))
                })
                .collect(),
        }
    }

    /// Inner product mod p. O(size), both operands must be sorted and share
    /// the same prime.
    pub fn inner_product(&self, other: &Self) -> u64 {
        self.assert_same_field(other);
        let p = self.prime;

        let mut acc = 0u64;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (li, lr) = self.entries[i];
            let (ri, rr) = other.entries[j];
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc = (acc + mul_mod(lr, rr, p)) % p;
                    i += 1;
                    j += 1;
                }
            }
        }

        acc
    }

    /// Normalizes a cycle vector of a correct run back to `{-1, 0, 1}`
    /// integer coefficients by checking each residue against `{1, p - 1}`.
    /// ** Panics on any other residue — this signals a bug in the oracle,
    /// not a data problem **
    pub fn signed_entries(&self) -> Vec<(NumEdges, i8)> {
        self.entries
            .iter()
            .map(|&(i, r)| {
                let sign = if r == 1 {
                    1
                } else if r == self.prime - 1 {
                    -1
                } else {
                    panic!("residue {r} at coordinate {i} is not in {{1, p - 1}}");
                };
                (i, sign)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    const P: u64 = 1_000_003;

    fn random_vector<R: Rng>(rng: &mut R, m: NumEdges, p: u64) -> FpVector {
        let mut v = FpVector::new(p);
        for i in 0..m {
            if rng.random_bool(0.3) {
                v.append(i, rng.random_range(1..p));
            }
        }
        v
    }

    #[test]
    fn add_sub_are_inverse() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for _ in 0..50 {
            let (a, b) = (random_vector(rng, 40, P), random_vector(rng, 40, P));

            assert_eq!(a.add(&b).sub(&b), a);
            assert_eq!(a.sub(&b).add(&b), a);
            assert!(a.sub(&a).is_empty());
            assert_eq!(a.negate().negate(), a);
            assert_eq!(a.sub(&b), a.add(&b.negate()));
        }
    }

    #[test]
    fn scalar_mul_with_inverse() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);

        for _ in 0..50 {
            let a = random_vector(rng, 40, P);
            let k = rng.random_range(1..P);

            assert_eq!(a.scalar_mul(k).scalar_mul(inv_mod(k, P)), a);
            assert!(a.scalar_mul(0).is_empty());
        }
    }

    #[test]
    fn inner_product_is_bilinear() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for _ in 0..50 {
            let (a, b, c) = (
                random_vector(rng, 30, P),
                random_vector(rng, 30, P),
                random_vector(rng, 30, P),
            );
            let k = rng.random_range(0..P);

            assert_eq!(
                a.add(&b).inner_product(&c),
                (a.inner_product(&c) + b.inner_product(&c)) % P
            );
            assert_eq!(
                a.scalar_mul(k).inner_product(&b),
                mul_mod(k, a.inner_product(&b), P)
            );
        }
    }

    #[test]
    fn signed_normalization() {
        let mut v = FpVector::new(7);
        v.append(3, 1);
        v.append(5, 6);
        v.sort();

        assert_eq!(v.signed_entries(), vec![(3, 1), (5, -1)]);
    }

    #[test]
    #[should_panic]
    fn signed_normalization_rejects_other_residues() {
        let mut v = FpVector::new(7);
        v.append(0, 3);
        let _ = v.signed_entries();
    }

    #[test]
    #[should_panic]
    fn mismatched_primes_are_rejected() {
        let a = FpVector::unit(7, 0);
        let b = FpVector::unit(11, 0);
        let _ = a.add(&b);
    }

    #[test]
    fn modular_helpers() {
        assert_eq!(pow_mod(2, 10, 1_000_000_007), 1024);
        for k in 1..7 {
            assert_eq!(mul_mod(k, inv_mod(k, 7), 7), 1);
        }
    }
}
