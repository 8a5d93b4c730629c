use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ojama_game_engine::engine::bot_profiles::{load_default_profiles, load_profiles, BotProfile};
use ojama_game_engine::engine::session::run_session;

#[derive(Parser)]
#[command(name = "ojama-game-engine", about = "Ojama puzzle AI client speaking the stdin/stdout protocol")]
struct Cli {
    /// Profile name from bot_profiles.toml (default: the production default)
    #[arg(long, env = "OJAMA_AI_PROFILE")]
    profile: Option<String>,

    /// Path to bot_profiles.toml (default: auto-discover)
    #[arg(long, env = "OJAMA_AI_PROFILES")]
    profiles: Option<PathBuf>,

    /// Strategy type override: "greedy", "ojama_score" or "random"
    #[arg(long)]
    strategy: Option<String>,

    /// Name announced to the game server
    #[arg(long)]
    name: Option<String>,

    /// Default log directive when RUST_LOG is unset; logs go to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_level.parse()?))
        .with_writer(io::stderr)
        .init();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let mut profile: BotProfile = match cli.profile.as_deref() {
        Some(name) => profiles.resolve(name)?,
        None => profiles.default_profile()?,
    };
    if let Some(s) = cli.strategy {
        profile.strategy_type = s;
    }
    if let Some(n) = cli.name {
        profile.display_name = Some(n);
    }
    let strategy = profile.build_strategy()?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let summary = run_session(stdin.lock(), &mut stdout, strategy.as_ref())?;
    tracing::info!(turns = summary.turns, reason = %summary.end, "client exiting");
    Ok(())
}
