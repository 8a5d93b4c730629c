//! Named bot profiles: a strategy type plus its tuning.
//! Loaded from TOML at runtime for the client and the arena CLI.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::bot_strategy::{BotStrategy, GreedyLumpStrategy, OjamaScoreStrategy, RandomStrategy};
use crate::games::puyo::scoring::ScoreWeights;

pub const STRATEGY_GREEDY: &str = "greedy";
pub const STRATEGY_OJAMA_SCORE: &str = "ojama_score";
pub const STRATEGY_RANDOM: &str = "random";

/// A named bot profile.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfile {
    pub description: Option<String>,
    #[serde(default = "default_strategy_type")]
    pub strategy_type: String,
    /// Name announced to the game server. Defaults per strategy.
    pub display_name: Option<String>,
    /// Scoring weights for the ojama_score strategy.
    pub weights: Option<ScoreWeights>,
}

fn default_strategy_type() -> String {
    STRATEGY_GREEDY.into()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductionConfig {
    pub default: Option<String>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, BotProfile>,
    #[serde(default)]
    pub production: ProductionConfig,
}

impl BotProfile {
    /// A bare profile for a strategy type, as if written with no other keys.
    pub fn for_strategy(strategy_type: &str) -> Self {
        Self {
            strategy_type: strategy_type.to_string(),
            ..Default::default()
        }
    }

    pub fn effective_weights(&self) -> ScoreWeights {
        self.weights.unwrap_or_default()
    }

    /// Build the strategy this profile describes.
    pub fn build_strategy(&self) -> Result<Box<dyn BotStrategy>, String> {
        let name = self.display_name.clone();
        let strategy: Box<dyn BotStrategy> = match self.strategy_type.as_str() {
            STRATEGY_GREEDY => Box::new(match name {
                Some(n) => GreedyLumpStrategy::named(n),
                None => GreedyLumpStrategy::new(),
            }),
            STRATEGY_OJAMA_SCORE => {
                let weights = self.effective_weights();
                Box::new(match name {
                    Some(n) => OjamaScoreStrategy::named(n, weights),
                    None => OjamaScoreStrategy::new(weights),
                })
            }
            STRATEGY_RANDOM => Box::new(match name {
                Some(n) => RandomStrategy::named(n),
                None => RandomStrategy::new(),
            }),
            other => return Err(format!("unknown strategy_type '{}'", other)),
        };
        Ok(strategy)
    }
}

impl BotProfilesFile {
    /// Look up a profile by name, falling back to treating the name as a
    /// bare strategy type.
    pub fn resolve(&self, name: &str) -> Result<BotProfile, String> {
        if let Some(profile) = self.profiles.get(name) {
            return Ok(profile.clone());
        }
        match name {
            STRATEGY_GREEDY | STRATEGY_OJAMA_SCORE | STRATEGY_RANDOM => {
                Ok(BotProfile::for_strategy(name))
            }
            _ => {
                let mut available: Vec<&String> = self.profiles.keys().collect();
                available.sort();
                Err(format!(
                    "profile '{}' not found (available: {:?})",
                    name, available
                ))
            }
        }
    }

    /// The production default profile, or plain greedy.
    pub fn default_profile(&self) -> Result<BotProfile, String> {
        match self.production.default.as_deref() {
            Some(name) => self.resolve(name),
            None => Ok(BotProfile::for_strategy(STRATEGY_GREEDY)),
        }
    }
}

/// Profile files looked up when none is given, in order.
pub const PROFILE_SEARCH_PATHS: [&str; 2] = ["bot_profiles.toml", "../bot_profiles.toml"];

impl BotProfilesFile {
    /// Reject profiles that would only fail once a session has started:
    /// unknown strategy types, unusable score weights, a dangling default.
    pub fn validate(&self) -> Result<(), String> {
        let mut names: Vec<&String> = self.profiles.keys().collect();
        names.sort();
        for name in names {
            let profile = &self.profiles[name];
            profile
                .build_strategy()
                .map_err(|e| format!("profile '{}': {}", name, e))?;
            if let Some(w) = profile.weights {
                if w.colorful_coef < 0.0 || w.ojama_coef < 0.0 {
                    return Err(format!("profile '{}': score coefficients must be non-negative", name));
                }
                if !(w.hard_factor > 0.0 && w.hard_factor <= 1.0) {
                    return Err(format!("profile '{}': hard_factor must be in (0, 1]", name));
                }
            }
        }
        match self.production.default.as_deref() {
            Some(default) if self.resolve(default).is_err() => {
                Err(format!("production default '{}' names no profile", default))
            }
            _ => Ok(()),
        }
    }
}

/// Load and validate profiles from a TOML file.
pub fn load_profiles(path: &Path) -> Result<BotProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let file: BotProfilesFile =
        toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    file.validate().map_err(|e| format!("Invalid {}: {}", path.display(), e))?;
    Ok(file)
}

/// Profiles from the first file in `PROFILE_SEARCH_PATHS` that exists.
pub fn load_default_profiles() -> BotProfilesFile {
    find_profiles(&PROFILE_SEARCH_PATHS)
}

/// The first existing candidate wins, even if it fails to load; a broken
/// local file must not silently pick up a parent directory's profiles.
fn find_profiles<P: AsRef<Path>>(candidates: &[P]) -> BotProfilesFile {
    let Some(path) = candidates.iter().map(|p| p.as_ref()).find(|p| p.exists()) else {
        tracing::info!("no bot_profiles.toml found, using built-in defaults");
        return BotProfilesFile::default();
    };
    match load_profiles(path) {
        Ok(profiles) => {
            tracing::info!(path = %path.display(), count = profiles.profiles.len(), "loaded bot profiles");
            profiles
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring bot profiles, using built-in defaults");
            BotProfilesFile::default()
        }
    }
}
