use anyhow::{Context, Result};
use clap::Parser;
use genexpr::config::ConfigManager;
use genexpr::engines::generation::ConsoleProgressCallback;
use genexpr::{EvolutionEngine, RunOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Evolve an arithmetic expression that evaluates to a target number
#[derive(Parser, Debug)]
#[command(name = "genexpr")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target number (prompted for on stdin when omitted)
    #[arg(allow_negative_numbers = true)]
    target: Option<f64>,

    /// TOML config file; GENEXPR__EVOLUTION__* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn read_target() -> Result<f64> {
    println!("Enter a target number: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", line.trim()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let manager = ConfigManager::new();
    manager
        .load_layered(args.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(seed) = args.seed {
        manager.update(|c| c.evolution.seed = Some(seed))?;
    }

    let target = match args.target {
        Some(target) => target,
        None => read_target()?,
    };

    let mut engine = EvolutionEngine::new(manager.get().evolution, target)?;
    let outcome = engine.run(ConsoleProgressCallback::default())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        RunOutcome::Solved {
            generation,
            solution,
        } => {
            println!("Solution found! Number of generations till solution = {}", generation);
            println!();
            println!("{}", solution.expression);
        }
        RunOutcome::GenerationLimitExceeded { limit, .. } => {
            println!("Exiting run, no solutions found in {} generations.", limit);
        }
    }

    Ok(())
}
