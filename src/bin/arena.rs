//! Arena CLI — compare strategies on seeded random boards.
//!
//! Usage:
//!   cargo run --release --bin arena -- --boards 1000 --bot greedy --bot ojama_score
//!   cargo run --release --bin arena -- --boards 200 --profiles bot_profiles.toml --bot sample --bot breaker --json

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ojama_game_engine::engine::arena::run_arena;
use ojama_game_engine::engine::bot_profiles::{load_default_profiles, load_profiles};
use ojama_game_engine::engine::bot_strategy::BotStrategy;
use ojama_game_engine::games::puyo::generate::BoardGenParams;
use ojama_game_engine::games::puyo::scoring::ScoreWeights;
use ojama_game_engine::games::puyo::BoardConfig;

#[derive(Parser)]
#[command(name = "arena", about = "Run strategy-vs-strategy arena experiments on random boards")]
struct Cli {
    /// Number of boards to play
    #[arg(long, default_value = "100")]
    boards: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Board width
    #[arg(long, default_value = "10")]
    width: usize,

    /// Board height
    #[arg(long, default_value = "10")]
    height: usize,

    /// Minimum lump size for an erasure to take effect
    #[arg(long, default_value = "3")]
    threshold: usize,

    /// Number of ball colors
    #[arg(long, default_value = "4")]
    colors: i32,

    /// Share of cells that are hard ojama
    #[arg(long)]
    hard_rate: Option<f64>,

    /// Share of cells that are normal ojama
    #[arg(long)]
    normal_rate: Option<f64>,

    /// Balls queued per column
    #[arg(long)]
    rain_depth: Option<usize>,

    /// Path to bot_profiles.toml
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Profile name or strategy type; repeat for each contestant
    #[arg(long = "bot", default_values = ["greedy", "ojama_score"])]
    bots: Vec<String>,

    /// Print the result as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let mut strategies: HashMap<String, Box<dyn BotStrategy>> = HashMap::new();
    for bot in &cli.bots {
        let profile = profiles.resolve(bot)?;
        if strategies.insert(bot.clone(), profile.build_strategy()?).is_some() {
            return Err(format!("bot '{}' listed twice", bot).into());
        }
    }

    let config = BoardConfig::new(cli.width, cli.height, cli.threshold, cli.colors);
    let d = BoardGenParams::default();
    let gen_params = BoardGenParams {
        hard_ojama_rate: cli.hard_rate.unwrap_or(d.hard_ojama_rate),
        normal_ojama_rate: cli.normal_rate.unwrap_or(d.normal_ojama_rate),
        rain_depth: cli.rain_depth.unwrap_or(d.rain_depth),
    };

    eprintln!(
        "Arena: {} boards, seed={}, board={}x{}, threshold={}, colors={}, ojama={:.2}/{:.2}",
        cli.boards,
        cli.seed,
        config.width,
        config.height,
        config.threshold,
        config.colors,
        gen_params.hard_ojama_rate,
        gen_params.normal_ojama_rate,
    );
    for bot in &cli.bots {
        eprintln!("  {}: {}", bot, strategies[bot].name());
    }

    let total = cli.boards;
    let progress_cb = move |done: usize, _total: usize| {
        if done % 100 == 0 || done == total {
            eprint!("\r  [{}/{}] boards completed", done, total);
        }
    };

    let result = run_arena(
        &strategies,
        &config,
        &gen_params,
        &ScoreWeights::default(),
        cli.boards,
        cli.seed,
        Some(&progress_cb),
    );

    eprintln!("\r                                        "); // clear progress line
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
    }
    Ok(())
}
