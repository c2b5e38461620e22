//! Genetic-algorithm heuristic solver for the Traveling Salesperson Problem.
//!
//! Given integer city coordinates on a plane, the solver evolves a
//! population of visiting orders toward shorter closed tours.
//!
//! - [`Cities`]: immutable coordinates and tour length queries
//! - [`ga`]: chromosomes, operators, selection, populations and the driver loop
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_tspga::{Cities, GaConfig, GaRunner};
//!
//! let cities = Arc::new(Cities::new([(0, 0), (0, 10), (10, 10), (10, 0), (5, 12)]).unwrap());
//! let config = GaConfig::fast().with_seed(7);
//! let result = GaRunner::run(Arc::clone(&cities), &config).unwrap();
//!
//! let tour = cities.reorder(result.best.order()).unwrap();
//! assert_eq!(tour.size(), 5);
//! ```
//!
//! The solver is a heuristic: it returns a good tour, not a proven optimum.

pub mod cities;
pub mod error;
pub mod ga;
pub mod random;

pub use cities::{Cities, Coord};
pub use error::{Result, TspError};
pub use ga::{Chromosome, Deme, FitnessParams, GaConfig, GaResult, GaRunner, Selection};
