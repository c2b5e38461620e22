//! GA driver loop.
//!
//! [`GaRunner`] builds a [`Deme`] and steps it generation by generation until
//! one of the termination conditions in [`GaConfig`] fires, tracking the
//! shortest tour seen over the whole run.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::deme::Deme;
use crate::cities::Cities;
use crate::error::Result;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The shortest tour found during the entire run.
    pub best: Chromosome,

    /// Length of the best tour (same as `best.tour_length()`).
    pub best_length: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped because the best tour stopped improving.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on the wall-clock limit.
    pub timed_out: bool,

    /// Best length so far, recorded after initialization and after each
    /// generation.
    pub length_history: Vec<f64>,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_tspga::{Cities, GaConfig, GaRunner};
///
/// let cities = Arc::new("0 0 0 5 5 5 5 0 2 7".parse::<Cities>().unwrap());
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::run(cities, &config).unwrap();
/// assert!(result.best.is_valid());
/// assert_eq!(result.generations, 50);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// Fails with [`TspError::InvalidConfig`](crate::TspError::InvalidConfig)
    /// if `config` does not validate.
    pub fn run(cities: Arc<Cities>, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(cities, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best tour found so far.
    pub fn run_with_cancel(
        cities: Arc<Cities>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let start = Instant::now();
        let deadline = config.time_limit_ms.map(Duration::from_millis);

        let mut deme = Deme::new(cities, config)?;
        let mut best = deme.best().clone();
        let mut length_history = Vec::with_capacity(config.max_generations.min(1 << 16) + 1);
        length_history.push(best.tour_length());
        info!("initial best length {:.3}", best.tour_length());

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = deadline {
                if start.elapsed() >= limit {
                    timed_out = true;
                    break;
                }
            }

            deme.compute_next_generation()?;

            let gen_best = deme.best();
            if gen_best.tour_length() < best.tour_length() {
                best = gen_best.clone();
                stagnation_counter = 0;
                info!(
                    "generation {}: new best length {:.3}",
                    gen + 1,
                    best.tour_length()
                );
            } else {
                stagnation_counter += 1;
            }
            length_history.push(best.tour_length());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let generations = deme.generation();
        debug!(
            "run finished after {generations} generations in {:?}",
            start.elapsed()
        );

        Ok(GaResult {
            best_length: best.tour_length(),
            best,
            generations,
            stagnated,
            cancelled,
            timed_out,
            length_history,
        })
    }
}
