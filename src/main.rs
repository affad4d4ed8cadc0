//! Bitgrid Evo CLI - Evolve a population toward a goal pattern file.

use std::fs;
use std::path::PathBuf;

use bitgrid_evo::{
    compute::{evolution::EvolutionEngine, load_goal},
    report,
    schema::EvolutionConfig,
};

fn print_usage(program: &str) {
    eprintln!("Usage: {} <goal.txt> [config.json] [--seed N]", program);
    eprintln!();
    eprintln!("Evolve a population of bit-matrices toward a goal pattern.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  goal.txt     One row per line, each character '0' or '1'");
    eprintln!("  config.json  Run configuration (default: built-in settings)");
    eprintln!("  --seed N     Random seed, overrides the configuration");
    eprintln!();
    eprintln!("Print the default configuration with --example.");
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("bitgrid-evo", String::as_str);

    if args.iter().skip(1).any(|a| a == "--example") {
        print_example_config();
        return;
    }

    let mut positional = Vec::new();
    let mut seed_override = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--seed" {
            let seed = rest.next().and_then(|s| s.parse::<u64>().ok());
            if seed.is_none() {
                eprintln!("--seed expects an unsigned integer");
                std::process::exit(1);
            }
            seed_override = seed;
        } else {
            positional.push(arg.as_str());
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        print_usage(program);
        std::process::exit(1);
    }

    let goal_path = PathBuf::from(positional[0]);

    // Load configuration
    let mut config: EvolutionConfig = match positional.get(1) {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => EvolutionConfig::default(),
    };
    if seed_override.is_some() {
        config.random_seed = seed_override;
    }

    let goal = load_goal(&goal_path).unwrap_or_else(|e| {
        eprintln!("Error loading goal: {}", e);
        std::process::exit(1);
    });

    let mut engine = EvolutionEngine::new(config, goal).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    print!("{}", report::banner(&engine));

    let result = engine.run_with_callback(|progress| {
        println!("{}", report::generation_line(progress));
    });

    print!("{}", report::final_report(&result));
}
