//! Permutation chromosome for the TSP.

use super::operators::{crossover_window, is_permutation, order_crossover_child, swap_mutation};
use crate::cities::Cities;
use crate::error::{Result, TspError};
use rand::Rng;
use std::sync::Arc;

/// Fitness returned for a zero-length tour, where `(K / length)^P` is
/// undefined. Also the ceiling that [`FitnessParams::evaluate`] saturates to.
pub const DEGENERATE_FITNESS: f64 = f64::MAX;

/// Parameters of the fitness transform `(scale / tour_length) ^ pressure`.
///
/// - `scale` (K) only rescales the numeric range. It never changes which of
///   two tours is fitter.
/// - `pressure` (P) sharpens the gap between short and long tours. It matters
///   for fitness-proportionate selection; tournament selection only compares
///   and is unaffected by it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessParams {
    pub scale: f64,
    pub pressure: f64,
}

impl Default for FitnessParams {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            pressure: 4.0,
        }
    }
}

impl FitnessParams {
    pub fn new(scale: f64, pressure: f64) -> Self {
        Self { scale, pressure }
    }

    /// Converts a tour length into a fitness (larger is better).
    ///
    /// Large `scale` or `pressure` can push `(K / length)^P` past `f64::MAX`;
    /// the result saturates at [`DEGENERATE_FITNESS`] instead of becoming
    /// infinite. Saturated values tie, so ranking code should use
    /// [`Chromosome::is_fitter_than`], which compares tour lengths.
    ///
    /// Fails with [`TspError::DegenerateInput`] for a zero-length tour.
    pub fn evaluate(&self, tour_length: f64) -> Result<f64> {
        if tour_length <= 0.0 {
            return Err(TspError::degenerate(
                "tour length is zero; all cities coincide",
            ));
        }
        Ok((self.scale / tour_length)
            .powf(self.pressure)
            .min(DEGENERATE_FITNESS))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TspError::invalid_config(format!(
                "fitness scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if !(self.pressure.is_finite() && self.pressure > 0.0) {
            return Err(TspError::invalid_config(format!(
                "fitness pressure must be finite and positive, got {}",
                self.pressure
            )));
        }
        Ok(())
    }
}

/// A candidate tour: a permutation of city indices plus a shared handle to
/// the distance model it is measured against.
///
/// The tour length is cached and kept current by every operation, so
/// fitness queries during selection do not walk the tour again.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tspga::{Cities, Chromosome};
///
/// let cities = Arc::new(Cities::new([(0, 0), (0, 1), (1, 1), (1, 0)]).unwrap());
/// let square = Chromosome::from_order(&cities, vec![0, 1, 2, 3]).unwrap();
/// let crossed = Chromosome::from_order(&cities, vec![0, 2, 1, 3]).unwrap();
/// assert_eq!(square.tour_length(), 4.0);
/// assert!(square.fitness() > crossed.fitness());
/// ```
#[derive(Debug, Clone)]
pub struct Chromosome {
    cities: Arc<Cities>,
    order: Vec<usize>,
    length: f64,
}

impl Chromosome {
    /// Creates a chromosome with a uniformly random order.
    pub fn random<R: Rng + ?Sized>(cities: &Arc<Cities>, rng: &mut R) -> Self {
        let order = cities.random_permutation(cities.size(), rng);
        let chromosome = Self::with_order(cities, order);
        debug_assert!(chromosome.is_valid());
        chromosome
    }

    /// Creates a chromosome with a given order.
    ///
    /// Fails with [`TspError::InvalidArgument`] if `order` is not a
    /// permutation of `0..cities.size()`.
    pub fn from_order(cities: &Arc<Cities>, order: Vec<usize>) -> Result<Self> {
        if !is_permutation(&order, cities.size()) {
            return Err(TspError::invalid_argument(format!(
                "order {:?} is not a permutation of 0..{}",
                order,
                cities.size()
            )));
        }
        Ok(Self::with_order(cities, order))
    }

    fn with_order(cities: &Arc<Cities>, order: Vec<usize>) -> Self {
        let length = cities.tour_length(&order);
        Self {
            cities: Arc::clone(cities),
            order,
            length,
        }
    }

    pub fn cities(&self) -> &Arc<Cities> {
        &self.cities
    }

    /// The visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Closed tour length of this order.
    pub fn tour_length(&self) -> f64 {
        self.length
    }

    /// Swaps the cities at two distinct random positions.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if swap_mutation(&mut self.order, rng).is_some() {
            self.length = self.cities.tour_length(&self.order);
        }
        debug_assert!(self.is_valid());
    }

    /// Fitness under the default [`FitnessParams`].
    pub fn fitness(&self) -> f64 {
        self.fitness_with(&FitnessParams::default())
    }

    /// Fitness under `params`; a zero-length tour yields
    /// [`DEGENERATE_FITNESS`].
    pub fn fitness_with(&self, params: &FitnessParams) -> f64 {
        params.evaluate(self.length).unwrap_or(DEGENERATE_FITNESS)
    }

    /// Fitness under `params`, reporting a zero-length tour as
    /// [`TspError::DegenerateInput`].
    pub fn try_fitness(&self, params: &FitnessParams) -> Result<f64> {
        params.evaluate(self.length)
    }

    /// Returns `true` if `self` is strictly fitter than `other`.
    ///
    /// Fitness falls strictly with tour length for every positive `K` and
    /// `P`, so this compares lengths and holds even where the fitness values
    /// themselves saturate.
    pub fn is_fitter_than(&self, other: &Chromosome) -> bool {
        self.length < other.length
    }

    /// Returns `true` if both chromosomes point at the same distance model.
    pub fn shares_cities(&self, other: &Chromosome) -> bool {
        Arc::ptr_eq(&self.cities, &other.cities)
    }

    /// Ordered crossover with a random window. Returns two new children; the
    /// parents are not modified.
    ///
    /// Fails with [`TspError::InvalidArgument`] if `other` uses a different
    /// distance model.
    pub fn recombine<R: Rng + ?Sized>(
        &self,
        other: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        debug_assert!(self.is_valid());
        debug_assert!(other.is_valid());
        self.check_compatible(other)?;

        let (begin, end) = crossover_window(self.len(), rng);
        let child1 = Self::crossover_child(self, other, begin, end)?;
        let child2 = Self::crossover_child(other, self, begin, end)?;
        Ok((child1, child2))
    }

    /// Builds the OX child that keeps `p1`'s cities in `[begin, end)` and
    /// takes the rest in `p2`'s order.
    pub fn crossover_child(
        p1: &Chromosome,
        p2: &Chromosome,
        begin: usize,
        end: usize,
    ) -> Result<Chromosome> {
        p1.check_compatible(p2)?;
        if begin > end || end > p1.len() {
            return Err(TspError::invalid_argument(format!(
                "crossover window [{begin}, {end}) out of range 0..={}",
                p1.len()
            )));
        }
        let order = order_crossover_child(&p1.order, &p2.order, begin, end);
        let child = Self::with_order(&p1.cities, order);
        debug_assert!(child.is_valid());
        Ok(child)
    }

    /// Returns `true` if the order is a permutation of `0..cities.size()`.
    pub fn is_valid(&self) -> bool {
        is_permutation(&self.order, self.cities.size())
    }

    fn check_compatible(&self, other: &Chromosome) -> Result<()> {
        if !self.shares_cities(other) {
            return Err(TspError::invalid_argument(
                "chromosomes refer to different distance models",
            ));
        }
        if self.len() != other.len() {
            return Err(TspError::invalid_argument(format!(
                "chromosome lengths differ: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }
}
