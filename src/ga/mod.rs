//! Genetic algorithm for the TSP.
//!
//! A candidate tour is a [`Chromosome`]: a permutation of city indices bound
//! to a shared [`Cities`](crate::Cities) distance model. A [`Deme`] evolves a
//! fixed-size population of them with a pluggable [`Selection`] strategy,
//! Order Crossover and swap mutation. [`GaRunner`] drives a deme until a
//! termination condition fires.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, selection, rates, fitness constants, limits
//! - [`Deme`]: one population and its generational step
//! - [`GaRunner`] / [`GaResult`]: the driver loop and its outcome
//!
//! # Submodules
//!
//! - [`operators`]: slice-level OX and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod chromosome;
mod config;
mod deme;
pub mod operators;
mod runner;
mod selection;

pub use chromosome::{Chromosome, FitnessParams, DEGENERATE_FITNESS};
pub use config::GaConfig;
pub use deme::Deme;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
