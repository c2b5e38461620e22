//! Parent selection strategies.
//!
//! A [`Deme`](super::Deme) holds one [`Selection`] value and asks it for a
//! parent index each time it needs one. Fitness is "larger is better"
//! throughout, see [`FitnessParams`].
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::chromosome::{Chromosome, FitnessParams};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_tspga::ga::Selection;
///
/// // Tournament over 4 sampled candidates
/// let sel = Selection::Tournament(4);
///
/// // Fitness-proportionate
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection over `T` candidates.
    ///
    /// `T` candidates are sampled uniformly with replacement into a pool.
    /// The pool is then reduced in rounds: members are paired off in pool
    /// order and the fitter of each pair survives (the first on a tie).
    /// Pairs are compared with [`Chromosome::is_fitter_than`], so the outcome
    /// never depends on `K` or `P`. With an odd pool the unpaired last member
    /// advances to the next round unchanged. The last survivor wins.
    ///
    /// When `T` is at least the population size, sampling is skipped: the
    /// whole population enters the pool once, without replacement, so the
    /// fittest candidate always wins. This departs from plain
    /// with-replacement sampling on purpose, to make full-size tournaments
    /// deterministic.
    ///
    /// `T` must be at least 2.
    ///
    /// # Complexity
    /// O(T) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// The selection exponent of [`FitnessParams::pressure`] shapes the
    /// probabilities here; the scale constant does not.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty or a tournament size is below 2.
    pub fn select<R: Rng + ?Sized>(
        &self,
        population: &[Chromosome],
        params: &FitnessParams,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, params, rng),
        }
    }
}

fn tournament<R: Rng + ?Sized>(
    population: &[Chromosome],
    k: usize,
    rng: &mut R,
) -> usize {
    assert!(k >= 2, "tournament size must be at least 2, got {k}");
    let n = population.len();

    let mut pool: Vec<usize> = if k >= n {
        (0..n).collect()
    } else {
        (0..k).map(|_| rng.random_range(0..n)).collect()
    };

    while pool.len() > 1 {
        pool = pool
            .chunks(2)
            .map(|pair| match *pair {
                [a, b] => {
                    if population[b].is_fitter_than(&population[a]) {
                        b
                    } else {
                        a
                    }
                }
                // odd one out advances
                _ => pair[0],
            })
            .collect();
    }
    pool[0]
}

/// Roulette wheel over fitness.
///
/// Weights are taken relative to the best member, `(shortest / length)^P`,
/// which is proportional to `(K / length)^P` but cannot overflow for large
/// `K`.
fn roulette<R: Rng + ?Sized>(
    population: &[Chromosome],
    params: &FitnessParams,
    rng: &mut R,
) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let shortest = population
        .iter()
        .map(Chromosome::tour_length)
        .fold(f64::INFINITY, f64::min);
    if shortest <= 0.0 {
        // Every tour has zero length: all equally fit.
        return rng.random_range(0..n);
    }

    let weights: Vec<f64> = population
        .iter()
        .map(|c| (shortest / c.tour_length()).powf(params.pressure))
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::Cities;
    use crate::random::create_rng;
    use std::sync::Arc;

    /// Unit square: index 0 walks the perimeter (length 4), every other
    /// member crosses itself (length 2 + 2√2).
    fn population(size: usize) -> Vec<Chromosome> {
        let cities = Arc::new(Cities::new([(0, 0), (0, 1), (1, 1), (1, 0)]).unwrap());
        let crossing = [vec![0, 2, 1, 3], vec![0, 1, 3, 2]];
        let mut pop = vec![Chromosome::from_order(&cities, vec![0, 1, 2, 3]).unwrap()];
        for i in 1..size {
            pop.push(Chromosome::from_order(&cities, crossing[i % 2].clone()).unwrap());
        }
        pop
    }

    fn count_wins(sel: Selection, pop: &[Chromosome], trials: usize, seed: u64) -> Vec<usize> {
        let params = FitnessParams::default();
        let mut rng = create_rng(seed);
        let mut counts = vec![0usize; pop.len()];
        for _ in 0..trials {
            counts[sel.select(pop, &params, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = population(8);
        let counts = count_wins(Selection::Tournament(3), &pop, 10_000, 42);
        // Chance level is 1/8; the best wins whenever it is sampled (~33%).
        assert!(
            counts[0] > 2_500,
            "expected best well above chance, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_full_size_is_deterministic() {
        let pop = population(6);
        for k in [6, 7, 50] {
            let counts = count_wins(Selection::Tournament(k), &pop, 500, 42);
            assert_eq!(counts[0], 500, "k={k}: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_odd_sizes() {
        let pop = population(10);
        for k in [3, 5, 7, 9] {
            let counts = count_wins(Selection::Tournament(k), &pop, 4_000, 7);
            assert!(counts[0] > 4_000 / 10, "k={k}: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_bias_grows_with_size() {
        let pop = population(10);
        let small = count_wins(Selection::Tournament(2), &pop, 10_000, 1)[0];
        let large = count_wins(Selection::Tournament(6), &pop, 10_000, 1)[0];
        assert!(large > small, "T=6 won {large}, T=2 won {small}");
    }

    #[test]
    fn test_tournament_ignores_extreme_fitness_params() {
        let pop = population(3);
        // [long, short, long]
        let pop = vec![pop[1].clone(), pop[0].clone(), pop[2].clone()];
        for params in [FitnessParams::new(1000.0, 200.0), FitnessParams::new(1e80, 4.0)] {
            let mut rng = create_rng(42);
            let wins = (0..1_000)
                .filter(|_| Selection::Tournament(3).select(&pop, &params, &mut rng) == 1)
                .count();
            assert_eq!(wins, 1_000, "params {params:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = population(4);
        let counts = count_wins(Selection::Roulette, &pop, 10_000, 42);
        assert!(
            counts[0] > counts[1] && counts[0] > counts[2],
            "best should be selected most often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_pressure_sharpens_bias() {
        let pop = population(4);
        let mut rng = create_rng(42);
        let mut wins = |pressure: f64| {
            let params = FitnessParams::new(1000.0, pressure);
            (0..10_000)
                .filter(|_| Selection::Roulette.select(&pop, &params, &mut rng) == 0)
                .count()
        };
        let mild = wins(1.0);
        let sharp = wins(16.0);
        assert!(sharp > mild, "P=16 won {sharp}, P=1 won {mild}");
    }

    #[test]
    fn test_single_individual() {
        let pop = population(1);
        let params = FitnessParams::default();
        let mut rng = create_rng(42);
        assert_eq!(Selection::Tournament(3).select(&pop, &params, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &params, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&[], &FitnessParams::default(), &mut rng);
    }

    #[test]
    #[should_panic(expected = "tournament size must be at least 2")]
    fn test_tournament_size_one_panics() {
        let pop = population(4);
        let mut rng = create_rng(42);
        Selection::Tournament(1).select(&pop, &FitnessParams::default(), &mut rng);
    }
}
