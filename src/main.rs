mod clients;
mod error;
mod genetic;
mod registry;
mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::SolverError;
use crate::genetic::GeneticAlgorithm;
use crate::registry::DEFAULT_ACCESS_POINTS;

#[derive(Parser)]
struct Args {
    /// Client file (`id;x;y` per line, first line is a header); the
    /// built-in demo client set is used when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// number of generations
    #[arg(long, default_value_t = 100)]
    generations: usize,

    /// population size
    #[arg(long, default_value_t = 50)]
    pop_size: usize,

    /// per-gene mutation probability
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    /// tournament size
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SolverError> {
    let clients = match &args.input {
        Some(path) => clients::load_clients(path)?,
        None => clients::demo_clients(),
    };

    let registry = &*DEFAULT_ACCESS_POINTS;
    let ga = GeneticAlgorithm {
        registry,
        population_size: args.pop_size,
        generations: args.generations,
        mutation_rate: args.mutation_rate,
        tournament_size: args.tournament_size,
    };

    let best = ga.run(&clients, args.seed)?;
    print!("{}", report::render(&best, registry));
    Ok(())
}
