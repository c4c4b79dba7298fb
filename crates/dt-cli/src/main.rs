//! CLI frontend for the DiceTales dice and turn engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dt_dice::DieType;

#[derive(Parser)]
#[command(
    name = "dicetales",
    about = "DiceTales: turn-gated dice rolls for AI-narrated adventures",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer which die a piece of narration asks for
    Infer {
        /// Narrator text to scan
        text: String,

        /// Also print the rule that decided the result
        #[arg(short, long)]
        explain: bool,
    },

    /// Roll a die and classify the result
    Roll {
        /// Die to roll (d4, d6, d8, d10, d12, d20, d100)
        die: DieType,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Classify a result against a die's maximum
    Classify {
        /// The rolled value
        result: u32,

        /// Sides on the die
        sides: u32,

        /// Treat the roll as a critical regardless of value
        #[arg(long)]
        critical: bool,

        /// Treat the roll as a fumble regardless of value
        #[arg(long)]
        fumble: bool,
    },

    /// Roll a die many times and show how often each face came up
    Stats {
        /// Die to roll
        die: DieType,

        /// Number of rolls
        #[arg(short, long, default_value = "10000")]
        count: u32,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Play through a narrator script, reading actions from stdin
    Play {
        /// Narrator script: narration blocks separated by blank lines
        #[arg(long)]
        script: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file (debounce_ms, allow_reroll_override, seed)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "dt_turn=debug,dt_dice=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Infer { text, explain } => commands::infer::run(&text, explain),
        Commands::Roll { die, seed } => commands::roll::run(die, seed),
        Commands::Classify {
            result,
            sides,
            critical,
            fumble,
        } => commands::classify::run(result, sides, critical, fumble),
        Commands::Stats { die, count, seed } => commands::stats::run(die, count, seed),
        Commands::Play {
            script,
            seed,
            config,
        } => commands::play::run(&script, seed, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
