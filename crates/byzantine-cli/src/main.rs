//! Byzantine Generals CLI - run OM(F) trials from the command line

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use byzantine_sim::{
    validate_parameters, AdversaryKind, Order, Simulation, SimulationConfig,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "byzantine")]
#[command(about = "Byzantine Generals - Oral-Messages consensus simulator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run one trial and print roles and decisions
    Run {
        #[command(flatten)]
        army: ArmyArgs,
        /// Commander's order (attack or retreat); random if omitted
        #[arg(short, long)]
        order: Option<Order>,
    },
    /// Run many trials and verify every one
    Trials {
        #[command(flatten)]
        army: ArmyArgs,
        /// Number of trials (default from config)
        #[arg(short = 't', long)]
        count: Option<usize>,
    },
    /// Check whether N generals can tolerate F traitors
    Check {
        #[command(flatten)]
        army: ArmyArgs,
    },
}

#[derive(clap::Args)]
struct ArmyArgs {
    /// Number of generals (prompted if not given here or in the config)
    #[arg(short = 'n', long)]
    generals: Option<usize>,
    /// Number of traitors (prompted if not given here or in the config)
    #[arg(short = 'f', long)]
    traitors: Option<usize>,
    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
    /// Traitor strategy: random, inverting or split-brain
    #[arg(short, long)]
    adversary: Option<AdversaryKind>,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Run { army, order }) => {
            let config = resolve_config(&army)?;
            require_tolerable(&config)?;
            let mut sim = Simulation::new(&config)?;
            let order = order.unwrap_or_else(|| sim.random_order());

            let outcome = sim.run_once(order)?;
            println!("{}", outcome);
            let consensus = outcome.verify().context("trial broke consensus")?;
            println!(
                "consensus: {} ({} commander, {} messages)",
                consensus.order,
                if consensus.loyal_commander { "loyal" } else { "traitor" },
                outcome.messages
            );
        }
        Some(Commands::Trials { army, count }) => {
            let mut config = resolve_config(&army)?;
            if let Some(count) = count {
                config = config.with_trials(count);
            }
            require_tolerable(&config)?;
            let mut sim = Simulation::new(&config)?;
            info!(trials = config.trials, adversary = sim.adversary(), "starting batch");

            let summary = sim.run_batch().context("batch aborted")?;
            println!("{}", summary);
            println!("all loyal generals reached consensus");
        }
        Some(Commands::Check { army }) => {
            let config = resolve_config(&army)?;
            println!("{}", check_report(&config)?);
        }
        None => {
            println!("Byzantine Generals v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the configuration: file (or defaults), then flags, then stdin
/// for any army size still unknown.
fn resolve_config(army: &ArmyArgs) -> anyhow::Result<SimulationConfig> {
    let (mut config, from_file) = match &army.config {
        Some(path) => {
            let config = SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            (config, true)
        }
        None => (SimulationConfig::default(), false),
    };

    let generals = match army.generals {
        Some(n) => n,
        None if from_file => config.generals,
        None => prompt("Enter number of generals: ")?,
    };
    let traitors = match army.traitors {
        Some(f) => f,
        None if from_file => config.traitors,
        None => prompt("Enter number of traitors: ")?,
    };
    config = config.with_parameters(generals, traitors);

    if let Some(seed) = army.seed {
        config = config.with_seed(seed);
    }
    if let Some(adversary) = army.adversary {
        config = config.with_adversary(adversary);
    }
    Ok(config)
}

fn require_tolerable(config: &SimulationConfig) -> anyhow::Result<()> {
    if !validate_parameters(config.generals, config.traitors) {
        bail!(
            "{} generals cannot tolerate {} traitors: need both positive and N > 3F",
            config.generals,
            config.traitors
        );
    }
    Ok(())
}

fn check_report(config: &SimulationConfig) -> anyhow::Result<String> {
    require_tolerable(config)?;
    let params = config.validate()?;
    Ok(format!("{}: OK ({} message rounds)", params, params.message_rounds()))
}

fn prompt(label: &str) -> anyhow::Result<usize> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("expected a positive integer, got '{}'", line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "byzantine", "run", "-n", "7", "-f", "2", "--order", "retreat", "--adversary", "split",
        ]);
        match cli.command {
            Some(Commands::Run { army, order }) => {
                assert_eq!(army.generals, Some(7));
                assert_eq!(army.traitors, Some(2));
                assert_eq!(army.adversary, Some(AdversaryKind::SplitBrain));
                assert_eq!(order, Some(Order::Retreat));
            }
            _ => panic!("Expected run subcommand"),
        }
    }

    #[test]
    fn test_resolve_config_from_flags() {
        let army = ArmyArgs {
            generals: Some(10),
            traitors: Some(3),
            seed: Some(4),
            adversary: Some(AdversaryKind::Inverting),
            config: None,
        };
        let config = resolve_config(&army).unwrap();
        assert_eq!((config.generals, config.traitors), (10, 3));
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.adversary, AdversaryKind::Inverting);
        assert!(require_tolerable(&config).is_ok());
    }

    #[test]
    fn test_check_report() {
        let config = SimulationConfig::new().with_parameters(7, 2);
        assert_eq!(check_report(&config).unwrap(), "N=7, F=2: OK (3 message rounds)");
        assert!(check_report(&SimulationConfig::new().with_parameters(6, 2)).is_err());
    }

    #[test]
    fn test_require_tolerable_rejects_boundary() {
        let config = SimulationConfig::new().with_parameters(3, 1);
        assert!(require_tolerable(&config).is_err());
    }
}
