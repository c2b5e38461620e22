use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use u_tspga::{Cities, FitnessParams, GaConfig, GaRunner, Selection};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionKind {
    Tournament,
    Roulette,
}

/// Evolve a short closed tour through the cities in a coordinate file.
///
/// The file holds whitespace-separated integer pairs, one `x y` per city.
#[derive(Parser)]
#[command(name = "tspga", version)]
struct Args {
    /// city coordinate file
    cities: PathBuf,

    /// population size (default: picked from the number of cities)
    #[arg(long)]
    pop_size: Option<usize>,

    /// maximum number of generations (default: picked from the number of cities)
    #[arg(long)]
    generations: Option<usize>,

    /// parent selection strategy
    #[arg(long, value_enum, default_value_t = SelectionKind::Tournament)]
    selection: SelectionKind,

    /// tournament size (default: picked from the number of cities)
    #[arg(long)]
    tournament_size: Option<usize>,

    /// mutation probability per child
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    /// fraction of the fittest tours kept unchanged each generation
    #[arg(long)]
    elite_ratio: Option<f64>,

    /// fitness scale constant K in (K / length)^P
    #[arg(long, default_value_t = 1000.0)]
    fitness_scale: f64,

    /// fitness exponent P in (K / length)^P
    #[arg(long, default_value_t = 4.0)]
    fitness_pressure: f64,

    /// stop after this many generations without improvement (0 disables)
    #[arg(long)]
    stagnation: Option<usize>,

    /// wall-clock limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// write the cities reordered along the best tour to this file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

impl Args {
    fn config(&self, city_count: usize) -> GaConfig {
        let mut config = GaConfig::auto_select(city_count)
            .with_mutation_rate(self.mutation_rate)
            .with_fitness(FitnessParams::new(self.fitness_scale, self.fitness_pressure));
        match (self.selection, self.tournament_size) {
            (SelectionKind::Roulette, _) => config = config.with_selection(Selection::Roulette),
            (SelectionKind::Tournament, Some(k)) => config = config.with_tournament_size(k),
            (SelectionKind::Tournament, None) => {}
        }
        if let Some(n) = self.pop_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_max_generations(n);
        }
        if let Some(r) = self.elite_ratio {
            config = config.with_elite_ratio(r);
        }
        if let Some(n) = self.stagnation {
            config = config.with_stagnation_limit(n);
        }
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter(None, level)
        .init();
}

fn run(args: &Args) -> u_tspga::Result<()> {
    let cities = Arc::new(Cities::from_path(&args.cities)?);
    let config = args.config(cities.size());
    let result = GaRunner::run(Arc::clone(&cities), &config)?;

    let order: Vec<String> = result.best.order().iter().map(usize::to_string).collect();
    println!("{}", order.join(" "));
    println!(
        "length {:.3} after {} generations{}",
        result.best_length,
        result.generations,
        if result.stagnated {
            " (stagnated)"
        } else if result.timed_out {
            " (time limit)"
        } else {
            ""
        }
    );

    if let Some(path) = &args.output {
        let tour = cities.reorder(result.best.order())?;
        std::fs::write(path, tour.to_string())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
