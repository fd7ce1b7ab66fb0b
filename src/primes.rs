/*!
# Prime Sampling

The randomized directed driver re-seeds its level-graph oracle with fresh
random primes. Primality is checked with a Miller–Rabin test that is
deterministic over the full `u64` range; sampling follows a bounded
resampling policy that widens the candidate bit-length on repeated failure
instead of looping indefinitely.
*/

use rand::Rng;

use crate::{error::McbError, vectors::{mul_mod, pow_mod}};

/// Witnesses making Miller–Rabin deterministic for all `u64` inputs
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic primality test for `u64`
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &w in &WITNESSES {
        if n == w {
            return true;
        }
        if n % w == 0 {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for &w in &WITNESSES {
        let mut x = pow_mod(w, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Samples a random prime of (at least) `bits` bits.
///
/// Tests at most `max_attempts` odd candidates, widening the candidate
/// bit-length by one every 64 failed attempts (up to 62 bits) so that thin
/// prime ranges cannot stall the driver. Returns
/// [`McbError::PrimeSampling`] once the attempt budget is exhausted.
/// ** Panics if `bits` is not in `[2, 62]` **
pub fn sample_prime<R: Rng>(rng: &mut R, bits: u32, max_attempts: u32) -> Result<u64, McbError> {
    assert!(
        (2..=62).contains(&bits),
        "prime bit-length must be in [2, 62], got {bits}"
    );

    let mut bits = bits;
    for attempt in 1..=max_attempts {
        let lo = 1u64 << (bits - 1);
        let candidate = rng.random_range(lo..(lo << 1)) | 1;
        if is_prime(candidate) {
            return Ok(candidate);
        }

        if attempt % 64 == 0 && bits < 62 {
            bits += 1;
        }
    }

    Err(McbError::PrimeSampling {
        bits,
        attempts: max_attempts,
    })
}
