//! Janggi CLI
//!
//! Play against the engine in the terminal, or let two engines play each
//! other and optionally write the game record as JSON.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use janggi_cli::{
    create_engine, describe_outcome, play_game, CliConfig, EngineKind, Overrides, SelfPlayConfig,
    Session,
};
use janggi_core::{Formation, Side};

#[derive(Parser, Debug)]
#[command(name = "janggi", author, version, about = "Janggi against a minimax engine", long_about = None)]
struct Cli {
    /// Log moves and search statistics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play against the engine
    Play(GameArgs),

    /// Let two engines play each other
    Selfplay {
        #[command(flatten)]
        game: GameArgs,

        /// Engine for the First side
        #[arg(long, value_enum, default_value_t = EngineKind::Classical)]
        first: EngineKind,

        /// Engine for the Second side
        #[arg(long, value_enum, default_value_t = EngineKind::Random)]
        second: EngineKind,

        /// Seed for random engines
        #[arg(long)]
        seed: Option<u64>,

        /// Write the game record to this JSON file
        #[arg(long)]
        record: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct GameArgs {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side you play: first (cho) or second (han)
    #[arg(long)]
    side: Option<Side>,

    /// Difficulty 1-9
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
    level: Option<u8>,

    /// Engine you play against
    #[arg(short, long, value_enum)]
    engine: Option<EngineKind>,

    /// First side's formation 0-3
    #[arg(long, value_parser = parse_formation)]
    first_formation: Option<Formation>,

    /// Second side's formation 0-3
    #[arg(long, value_parser = parse_formation)]
    second_formation: Option<Formation>,
}

impl GameArgs {
    fn load_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        config.apply(&Overrides {
            player_side: self.side,
            level: self.level,
            engine: self.engine,
            first_formation: self.first_formation,
            second_formation: self.second_formation,
        });
        Ok(config)
    }
}

fn parse_formation(s: &str) -> Result<Formation, String> {
    let index: u8 = s.parse().map_err(|_| format!("`{s}` is not a formation index"))?;
    Formation::try_from(index).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_play(args: &GameArgs) -> Result<()> {
    let config = args.load_config()?;
    let mut engine = create_engine(config.engine, None);

    println!(
        "You play {} against {} at level {}. Type `help` for commands.",
        config.player_side,
        engine.name(),
        config.level
    );

    let mut session = Session::new(&config, engine.as_mut());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if session.run(stdin.lock(), &mut stdout)?.is_none() {
        println!("Game abandoned.");
    }
    Ok(())
}

fn run_selfplay(
    args: &GameArgs,
    first: EngineKind,
    second: EngineKind,
    seed: Option<u64>,
    record_path: Option<PathBuf>,
) -> Result<()> {
    let config = args.load_config()?;
    let mut first_engine = create_engine(first, seed);
    let mut second_engine = create_engine(second, seed.map(|s| s.wrapping_add(1)));

    println!(
        "=== Self-play: {} vs {} (depth {}) ===",
        first_engine.name(),
        second_engine.name(),
        config.depth()
    );

    let selfplay = SelfPlayConfig {
        depth: config.depth(),
        formations: config.formations,
        rules: config.rules,
        ..SelfPlayConfig::default()
    };
    let record = play_game(first_engine.as_mut(), second_engine.as_mut(), &selfplay)?;

    println!("Actions played: {}", record.move_count());
    match record.outcome {
        Some(outcome) => println!("{}", describe_outcome(outcome)),
        None => println!("Stopped after {} actions without a result", record.move_count()),
    }
    println!("Final position: {}", record.final_position);

    if let Some(path) = record_path {
        record.save(&path)?;
        println!("Record written to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => run_play(&args),
        Commands::Selfplay {
            game,
            first,
            second,
            seed,
            record,
        } => run_selfplay(&game, first, second, seed, record),
    }
}
