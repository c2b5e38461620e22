//! A population of chromosomes evolved together.
//!
//! [`Deme`] owns its chromosomes, its random generator and the
//! [`Selection`] strategy it breeds with. One call to
//! [`compute_next_generation`](Deme::compute_next_generation) replaces the
//! population: elites are carried over, then parent pairs are selected,
//! recombined with OX and mutated until the population is full again.

use super::chromosome::{Chromosome, FitnessParams};
use super::config::GaConfig;
use super::selection::Selection;
use crate::cities::Cities;
use crate::error::Result;
use crate::random::rng_from_seed;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;

/// A fixed-size population on one distance model.
#[derive(Debug, Clone)]
pub struct Deme {
    cities: Arc<Cities>,
    population: Vec<Chromosome>,
    selection: Selection,
    mutation_rate: f64,
    elite_count: usize,
    fitness: FitnessParams,
    generation: usize,
    rng: StdRng,
}

impl Deme {
    /// Creates a population of `config.population_size` random chromosomes.
    ///
    /// Fails with [`TspError::InvalidConfig`](crate::TspError::InvalidConfig)
    /// if `config` does not validate.
    pub fn new(cities: Arc<Cities>, config: &GaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);

        let population: Vec<Chromosome> = (0..config.population_size)
            .map(|_| Chromosome::random(&cities, &mut rng))
            .collect();

        let deme = Self {
            cities,
            population,
            selection: config.selection,
            mutation_rate: config.mutation_rate,
            elite_count: config.elite_count(),
            fitness: config.fitness,
            generation: 0,
            rng,
        };

        debug!(
            "deme created: {} cities, {} chromosomes, selection {:?}",
            deme.cities.size(),
            deme.population.len(),
            deme.selection
        );
        if deme.best().tour_length() == 0.0 {
            warn!("all cities coincide; every tour has length zero");
        }
        Ok(deme)
    }

    /// Returns a parent chosen by the configured selection strategy.
    pub fn select_parent(&mut self) -> &Chromosome {
        let idx = self
            .selection
            .select(&self.population, &self.fitness, &mut self.rng);
        &self.population[idx]
    }

    /// Replaces the population with the next generation.
    pub fn compute_next_generation(&mut self) -> Result<()> {
        let size = self.population.len();
        let mut next: Vec<Chromosome> = Vec::with_capacity(size);

        if self.elite_count > 0 {
            let mut ranked: Vec<&Chromosome> = self.population.iter().collect();
            ranked.sort_by(|a, b| by_length(a, b));
            next.extend(ranked.into_iter().take(self.elite_count).cloned());
        }

        while next.len() < size {
            let p1 = self
                .selection
                .select(&self.population, &self.fitness, &mut self.rng);
            let p2 = self
                .selection
                .select(&self.population, &self.fitness, &mut self.rng);

            let (c1, c2) = self.population[p1].recombine(&self.population[p2], &mut self.rng)?;

            for mut child in [c1, c2] {
                if next.len() >= size {
                    break;
                }
                if self.rng.random_bool(self.mutation_rate) {
                    child.mutate(&mut self.rng);
                }
                next.push(child);
            }
        }

        self.population = next;
        self.generation += 1;
        debug!(
            "generation {}: best length {:.3}",
            self.generation,
            self.best().tour_length()
        );
        Ok(())
    }

    /// The fittest (shortest) chromosome.
    pub fn best(&self) -> &Chromosome {
        self.population
            .iter()
            .min_by(|a, b| by_length(a, b))
            .expect("population is never empty")
    }

    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    pub fn cities(&self) -> &Arc<Cities> {
        &self.cities
    }

    /// Number of generational steps taken so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }
}

/// Shorter tour first.
fn by_length(a: &Chromosome, b: &Chromosome) -> Ordering {
    a.tour_length()
        .partial_cmp(&b.tour_length())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;

    fn ring(n: usize) -> Arc<Cities> {
        let coords = (0..n).map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            (
                (1000.0 * angle.cos()).round() as i32,
                (1000.0 * angle.sin()).round() as i32,
            )
        });
        Arc::new(Cities::new(coords).unwrap())
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(40)
            .with_mutation_rate(0.3)
            .with_seed(42)
    }

    #[test]
    fn test_new_population() {
        let deme = Deme::new(ring(12), &config()).unwrap();
        assert_eq!(deme.len(), 40);
        assert_eq!(deme.generation(), 0);
        assert!(deme.population().iter().all(Chromosome::is_valid));
        assert!(deme
            .population()
            .iter()
            .all(|c| Arc::ptr_eq(c.cities(), deme.cities())));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Deme::new(ring(5), &config().with_tournament_size(1));
        assert!(matches!(result, Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_size_constant_across_generations() {
        for size in [2, 3, 7, 40] {
            let mut deme = Deme::new(ring(10), &config().with_population_size(size)).unwrap();
            for _ in 0..10 {
                deme.compute_next_generation().unwrap();
                assert_eq!(deme.len(), size);
                assert!(deme.population().iter().all(Chromosome::is_valid));
            }
            assert_eq!(deme.generation(), 10);
        }
    }

    #[test]
    fn test_select_parent_returns_member() {
        let mut deme = Deme::new(ring(8), &config()).unwrap();
        let order = deme.select_parent().order().to_vec();
        assert!(deme.population().iter().any(|c| c.order() == &order[..]));
    }

    #[test]
    fn test_best_is_shortest() {
        let deme = Deme::new(ring(9), &config()).unwrap();
        let best = deme.best().tour_length();
        assert!(deme.population().iter().all(|c| c.tour_length() >= best));
    }

    #[test]
    fn test_elites_survive() {
        let mut deme = Deme::new(ring(15), &config().with_elite_ratio(0.1)).unwrap();
        let mut previous = deme.best().tour_length();
        for _ in 0..30 {
            deme.compute_next_generation().unwrap();
            let current = deme.best().tour_length();
            assert!(current <= previous, "{current} > {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_evolution_shortens_tours() {
        let mut deme = Deme::new(ring(12), &config().with_elite_ratio(0.05)).unwrap();
        let initial = deme.best().tour_length();
        for _ in 0..200 {
            deme.compute_next_generation().unwrap();
        }
        assert!(deme.best().tour_length() < initial);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut deme = Deme::new(ring(10), &config()).unwrap();
            for _ in 0..20 {
                deme.compute_next_generation().unwrap();
            }
            deme.best().order().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_degenerate_instance_runs() {
        let cities = Arc::new(Cities::new([(3, 3); 5]).unwrap());
        for selection in [Selection::Tournament(3), Selection::Roulette] {
            let mut deme =
                Deme::new(Arc::clone(&cities), &config().with_selection(selection)).unwrap();
            for _ in 0..10 {
                deme.compute_next_generation().unwrap();
                assert_eq!(deme.len(), 40);
                assert!(deme.population().iter().all(Chromosome::is_valid));
            }
            assert_eq!(deme.best().tour_length(), 0.0);
            assert_eq!(
                deme.best().fitness_with(&FitnessParams::default()),
                crate::ga::DEGENERATE_FITNESS
            );
        }
    }

    #[test]
    fn test_roulette_deme_runs() {
        let mut deme = Deme::new(ring(10), &config().with_selection(Selection::Roulette)).unwrap();
        for _ in 0..10 {
            deme.compute_next_generation().unwrap();
        }
        assert_eq!(deme.len(), 40);
    }
}
