/*!
# Directed Minimum Cycle Bases

Directed cycles need oriented bookkeeping that GF(2) parity cannot express,
so the directed computation works over a prime field `F_p` via the
[`LevelGraphOracle`](crate::oracle::LevelGraphOracle). A single prime does
not guarantee minimality: each run returns a truly minimum basis only with a
base success probability (taken as `5/8` from the original analysis, kept
configurable rather than re-derived). The driver therefore repeats the whole
support-vector computation with independently sampled primes and keeps the
lightest run, pushing the overall error probability below a caller-supplied
threshold.
*/

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use crate::{
    engine::{CycleBasis, SupportVectorEngine},
    error::McbError,
    numbering::EdgeNumbering,
    oracle::LevelGraphOracle,
    primes::{is_prime, sample_prime},
    vectors::FpVector,
    weight::Weight,
    NumEdges,
};

/// A directed cycle basis over a prime field, together with the prime the
/// winning run used
#[derive(Clone, Debug)]
pub struct DirectedCycleBasis<W> {
    pub prime: u64,
    pub basis: CycleBasis<W, FpVector>,
}

impl<W> DirectedCycleBasis<W> {
    /// Normalizes the basis cycles back to `{-1, 0, 1}` integer
    /// coefficients.
    /// ** Panics if any residue lies outside `{0, 1, p - 1}` — after a
    /// correct run this is an internal invariant violation **
    pub fn signed_cycles(&self) -> Vec<Vec<(NumEdges, i8)>> {
        self.basis
            .cycles
            .iter()
            .map(|c| c.signed_entries())
            .collect()
    }
}

/// Configurable driver for directed minimum cycle bases.
///
/// Two modes:
/// - **randomized** (default): repeats the computation with fresh random
///   primes until the Monte-Carlo error probability drops below
///   [`DirectedMcb::error_probability`],
/// - **fixed prime**: a single run over a caller-chosen prime; faster, but
///   the result is only "possibly minimum".
#[derive(Clone, Copy, Debug)]
pub struct DirectedMcb {
    error_probability: f64,
    base_failure_probability: f64,
    fixed_prime: Option<u64>,
    prime_bits: Option<u32>,
    max_prime_attempts: u32,
    seed: Option<u64>,
    exchange: bool,
}

impl Default for DirectedMcb {
    fn default() -> Self {
        Self {
            error_probability: 0.01,
            base_failure_probability: 0.375,
            fixed_prime: None,
            prime_bits: None,
            max_prime_attempts: 512,
            seed: None,
            exchange: true,
        }
    }
}

impl DirectedMcb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the acceptable probability that the returned basis is not
    /// minimum. Must be in `(0, 1)`. Ignored in fixed-prime mode.
    pub fn error_probability(mut self, error: f64) -> Self {
        self.error_probability = error;
        self
    }

    /// Overrides the per-run failure probability bound used to derive the
    /// number of repetitions
    pub fn base_failure_probability(mut self, failure: f64) -> Self {
        self.base_failure_probability = failure;
        self
    }

    /// Switches to the non-randomized single run over `p`
    pub fn fixed_prime(mut self, p: u64) -> Self {
        self.fixed_prime = Some(p);
        self
    }

    /// Overrides the sampled prime bit-length derived from the dimension
    pub fn prime_bits(mut self, bits: u32) -> Self {
        self.prime_bits = Some(bits);
        self
    }

    /// Fixes the random seed, making the sampled prime sequence (and hence
    /// the result) deterministic
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables/disables the engine's exchange heuristic
    pub fn exchange(mut self, exchange: bool) -> Self {
        self.exchange = exchange;
        self
    }

    /// Bit-length of sampled primes: large enough that two random linear
    /// forms collide with probability bounded by `1/dim`
    fn default_prime_bits(dim: NumEdges) -> u32 {
        let log_dim = u64::BITS - (dim as u64 + 4).leading_zeros();
        (2 * log_dim).clamp(16, 62)
    }

    /// Computes a directed minimum cycle basis for the numbered graph.
    /// `weights[i]` must be the weight of edge `numbering.edge(i)`.
    /// ** Panics if the numbering is undirected, weights are misaligned, or
    /// any weight is not strictly positive **
    pub fn run<W: Weight>(
        &self,
        numbering: &EdgeNumbering,
        weights: &[W],
    ) -> Result<DirectedCycleBasis<W>, McbError> {
        let engine = SupportVectorEngine::new().exchange(self.exchange);

        if let Some(p) = self.fixed_prime {
            if !is_prime(p) {
                return Err(McbError::NotAPrime(p));
            }
            let mut oracle = LevelGraphOracle::new(numbering, weights, p);
            let basis = engine.compute(&mut oracle);
            return Ok(DirectedCycleBasis { prime: p, basis });
        }

        if !(self.error_probability > 0.0 && self.error_probability < 1.0) {
            return Err(McbError::InvalidErrorProbability(self.error_probability));
        }

        let repeats = (self.error_probability.ln() / self.base_failure_probability.ln())
            .ceil()
            .max(1.0) as u32;
        let bits = self
            .prime_bits
            .unwrap_or_else(|| Self::default_prime_bits(numbering.dim()));

        let mut rng = match self.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_rng(&mut rand::rng()),
        };

        let mut best: Option<DirectedCycleBasis<W>> = None;
        for run in 0..repeats {
            let prime = sample_prime(&mut rng, bits, self.max_prime_attempts)?;
            let mut oracle = LevelGraphOracle::new(numbering, weights, prime);
            let basis = engine.compute(&mut oracle);
            debug!(run, prime, total_weight = ?basis.total_weight, "randomized run finished");

            let better = match &best {
                None => true,
                Some(b) => {
                    basis.total_weight.cmp_weight(&b.basis.total_weight)
                        == std::cmp::Ordering::Less
                }
            };
            if better {
                best = Some(DirectedCycleBasis { prime, basis });
            }
        }

        // repeats >= 1, so a basis always exists here
        Ok(best.unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, ops::*, repr::AdjArrayDir, verify::verify_directed_basis};

    fn directed_square() -> (AdjArrayDir, EdgeNumbering) {
        let graph = AdjArrayDir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
        let numbering = EdgeNumbering::build(&graph);
        (graph, numbering)
    }

    #[test]
    fn fixed_prime_square() {
        let (_, numbering) = directed_square();
        let weights = vec![1u64; 4];

        let result = DirectedMcb::new()
            .fixed_prime(13)
            .run(&numbering, &weights)
            .unwrap();

        assert_eq!(result.prime, 13);
        assert_eq!(result.basis.dim(), 1);
        assert_eq!(result.basis.total_weight, 4);
        assert_eq!(result.signed_cycles()[0].len(), 4);
        assert!(verify_directed_basis(
            &numbering,
            &result.basis.cycles,
            &result.basis.certificate
        ));
    }

    #[test]
    fn rejects_bad_configuration() {
        let (_, numbering) = directed_square();
        let weights = vec![1u64; 4];

        assert_eq!(
            DirectedMcb::new()
                .fixed_prime(9)
                .run(&numbering, &weights)
                .unwrap_err(),
            McbError::NotAPrime(9)
        );
        assert_eq!(
            DirectedMcb::new()
                .error_probability(1.5)
                .run(&numbering, &weights)
                .unwrap_err(),
            McbError::InvalidErrorProbability(1.5)
        );
    }

    #[test]
    fn randomized_two_triangles() {
        // Two directed triangles sharing node 0; the unique minimum basis
        // consists of both triangles
        let graph = AdjArrayDir::from_edges(
            5,
            [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)],
        );
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 6];

        let result = DirectedMcb::new()
            .seed(42)
            .error_probability(0.01)
            .run(&numbering, &weights)
            .unwrap();

        assert_eq!(result.basis.dim(), 2);
        assert_eq!(result.basis.total_weight, 6);
        assert!(verify_directed_basis(
            &numbering,
            &result.basis.cycles,
            &result.basis.certificate
        ));
    }

    #[test]
    fn amplification_over_many_seeds() {
        // With error = 0.01 almost every seeded run must return the optimum
        let graph = AdjArrayDir::from_edges(
            4,
            [(0, 1), (1, 2), (2, 0), (2, 3), (3, 0), (1, 3)],
        );
        let numbering = EdgeNumbering::build(&graph);
        let weights = numbering.weights_with(|Edge(u, v)| 1 + ((u * 3 + v) % 4) as u64);

        let optimum = DirectedMcb::new()
            .seed(0)
            .error_probability(1e-9)
            .run(&numbering, &weights)
            .unwrap()
            .basis
            .total_weight;

        let trials = 1000;
        let correct = (0..trials)
            .filter(|&seed| {
                DirectedMcb::new()
                    .seed(seed)
                    .error_probability(0.01)
                    .run(&numbering, &weights)
                    .unwrap()
                    .basis
                    .total_weight
                    == optimum
            })
            .count();

        assert!(correct * 100 >= trials as usize * 99, "{correct}/{trials}");
    }

    #[test]
    fn empty_cycle_space() {
        let graph = AdjArrayDir::from_edges(3, [(0, 1), (1, 2)]);
        let numbering = EdgeNumbering::build(&graph);
        let weights = vec![1u64; 2];

        let result = DirectedMcb::new().seed(1).run(&numbering, &weights).unwrap();
        assert_eq!(result.basis.dim(), 0);
        assert_eq!(result.basis.total_weight, 0);
    }
}
