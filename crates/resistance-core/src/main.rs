//! Resistance opinion simulator
//!
//! Plays one seeded game between reference agents and prints the result.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use resistance_core::config::{default_config_toml, GameConfig, DEFAULT_CONFIG_PATH};
use resistance_core::events::EventLogger;
use resistance_core::output::format_beliefs;
use resistance_core::systems::opinion::DEFAULT_EPSILON;
use resistance_core::systems::{ConsensusProtocol, DiscussionMode, Moderator, TargetSelection};
use resistance_events::{Event, EventKind, GameRecord};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProtocolArg {
    Pairwise,
    Vector,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetsArg {
    Uniform,
    Shuffled,
}

/// Command line arguments. Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(name = "resistance_sim")]
#[command(about = "Simulate a game of The Resistance between opinion-driven agents")]
struct Args {
    /// TOML config file (defaults to ./resistance.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of players, 5 to 10
    #[arg(long)]
    players: Option<usize>,

    /// Bounded-confidence threshold
    #[arg(long)]
    delta: Option<f64>,

    /// Fixed number of rounds per discussion phase
    #[arg(long, conflicts_with = "until_convergence")]
    rounds: Option<usize>,

    /// Discuss until beliefs stop moving instead of a fixed round count
    #[arg(long)]
    until_convergence: bool,

    /// Convergence tolerance
    #[arg(long, requires = "until_convergence")]
    epsilon: Option<f64>,

    /// Round cap when discussing until convergence
    #[arg(long)]
    max_rounds: Option<usize>,

    #[arg(long, value_enum)]
    protocol: Option<ProtocolArg>,

    /// Target choice for pairwise discussion
    #[arg(long, value_enum)]
    targets: Option<TargetsArg>,

    /// Write every game event to this JSONL file
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Print every agent's beliefs after each phase
    #[arg(long)]
    snapshots: bool,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.game.seed = seed;
        }
        if let Some(players) = self.players {
            config.game.player_count = players;
        }
        if let Some(delta) = self.delta {
            config.opinion.confidence_threshold = delta;
        }
        if let Some(rounds) = self.rounds {
            config.opinion.mode = DiscussionMode::FixedRounds { rounds };
        }
        if self.until_convergence {
            let epsilon = self.epsilon.unwrap_or(match config.opinion.mode {
                DiscussionMode::UntilConvergence { epsilon } => epsilon,
                DiscussionMode::FixedRounds { .. } => DEFAULT_EPSILON,
            });
            config.opinion.mode = DiscussionMode::UntilConvergence { epsilon };
        }
        if let Some(max_rounds) = self.max_rounds {
            config.opinion.max_rounds = max_rounds;
        }
        if let Some(protocol) = self.protocol {
            config.opinion.protocol = match protocol {
                ProtocolArg::Pairwise => ConsensusProtocol::Pairwise,
                ProtocolArg::Vector => ConsensusProtocol::Vector,
            };
        }
        if let Some(targets) = self.targets {
            config.opinion.targets = match targets {
                TargetsArg::Uniform => TargetSelection::Uniform,
                TargetsArg::Shuffled => TargetSelection::Shuffled,
            };
        }
        if self.snapshots {
            config.game.record_snapshots = true;
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("RESISTANCE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = GameConfig::resolve(args.config.as_deref(), DEFAULT_CONFIG_PATH)?;
    args.apply(&mut config);
    Ok(config)
}

fn print_summary(record: &GameRecord) {
    println!("Resistance Simulation");
    println!("=====================");
    println!("Seed: {}", record.seed);
    println!("Players: {}", record.player_count);
    println!("Spies: {:?}", record.spies);
    println!("Proposals: {}", record.proposals.len());
    println!();

    for mission in &record.missions {
        let result = if mission.passed { "PASS" } else { "FAIL" };
        if mission.vote_limit_reached {
            println!(
                "Mission {}: {} (no team approved)",
                mission.mission + 1,
                result
            );
        } else {
            println!(
                "Mission {}: {} team {:?}, {} fail(s)",
                mission.mission + 1,
                result,
                mission.team,
                mission.fails
            );
        }
    }

    if let Some(outcome) = record.outcome {
        println!();
        println!(
            "Winner: {} ({} passed, {} failed)",
            outcome.winner, outcome.missions_passed, outcome.missions_failed
        );
    }
}

fn print_snapshots(events: &[Event]) {
    for event in events {
        if let EventKind::BeliefsSnapshot(snapshot) = &event.kind {
            println!("{}", format_beliefs(snapshot));
            println!();
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    let record_snapshots = config.game.record_snapshots;

    let mut moderator = Moderator::with_basic_agents(config)?;
    moderator.run()?;
    let events = moderator.drain_events();

    if record_snapshots {
        print_snapshots(&events);
    }
    print_summary(moderator.record());

    if let Some(path) = &args.events_out {
        let mut logger = EventLogger::new(path)?;
        logger.log_batch(&events)?;
        logger.flush()?;
        info!(events = logger.event_count(), path = %path.display(), "events written");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
