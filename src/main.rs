use std::net::SocketAddr;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use holdem_advisor::advisor::{AdvisorConfig, Situation, advise};
use holdem_advisor::cards::parse_cards;
use holdem_advisor::console::{Console, ConsoleConfig, print_advice};
use holdem_advisor::equity::{DEFAULT_SEED, DEFAULT_TRIALS};
use holdem_advisor::opponent::default_fold_prob;
use holdem_advisor::web;

#[derive(Debug, Parser)]
#[command(
    name = "holdem-advisor",
    version,
    about = "Heads-up NLHE decision assistant",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Monte Carlo trials per equity estimate
    #[arg(long, global = true, default_value_t = DEFAULT_TRIALS)]
    trials: u32,

    /// RNG seed for the equity estimator
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Disable ANSI colors in CLI output
    #[arg(long = "no-color", global = true, default_value_t = false)]
    no_color: bool,

    /// Starting bankroll for the interactive session ledger
    #[arg(long, default_value_t = 0.0)]
    bankroll: f32,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute a one-shot recommendation for a single spot
    Advise(AdviseArgs),
    /// Run the web server
    Serve {
        /// Address to bind (HOST:PORT)
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,
    },
}

#[derive(Debug, Args)]
struct AdviseArgs {
    /// Hero hole cards, e.g. "As Ks"
    #[arg(long)]
    hero: String,

    /// Board cards, e.g. "Qh 7d 2c" (empty for preflop)
    #[arg(long, default_value = "")]
    board: String,

    /// Current pot, including the rival's wager
    #[arg(long, default_value_t = 10.0)]
    pot: f32,

    /// Amount to call
    #[arg(long = "call", default_value_t = 5.0)]
    call_amount: f32,

    /// Additional amount risked by raising
    #[arg(long = "raise", default_value_t = 15.0)]
    raise_amount: f32,

    /// Rival fold probability (defaults to the opponent-model prior)
    #[arg(long = "fold-prob")]
    fold_prob: Option<f32>,

    /// Emit the advice as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = color_eyre::install();
    let Cli {
        command,
        trials,
        seed,
        no_color,
        bankroll,
    } = Cli::parse();

    match command {
        Some(Commands::Serve { addr }) => run_server(addr).await?,
        Some(Commands::Advise(args)) => run_advise(args, trials, seed, no_color)?,
        None => run_session(trials, seed, no_color, bankroll)?,
    }

    Ok(())
}

fn run_advise(args: AdviseArgs, trials: u32, seed: u64, no_color: bool) -> Result<()> {
    let situation = Situation {
        hero: parse_cards(&args.hero)?,
        board: parse_cards(&args.board)?,
        pot: args.pot,
        call_amount: args.call_amount,
        raise_amount: args.raise_amount,
        fold_prob: args.fold_prob.unwrap_or_else(default_fold_prob),
    };
    let config = AdvisorConfig { trials, seed };

    let advice = advise(&situation, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
    } else {
        print_advice(&situation, &advice, no_color);
    }
    Ok(())
}

fn run_session(trials: u32, seed: u64, no_color: bool, bankroll: f32) -> Result<()> {
    let config = ConsoleConfig {
        trials,
        seed,
        no_color,
        starting_bankroll: bankroll,
    };
    Console::new(config).run()
}

async fn run_server(addr: String) -> Result<()> {
    let addr: SocketAddr = addr.parse()?;
    web::serve(addr).await
}
