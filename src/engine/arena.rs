//! Strategy arena: every strategy plays the same random boards, one turn each.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::bot_strategy::BotStrategy;
use crate::games::puyo::generate::{random_board, BoardGenParams};
use crate::games::puyo::resolve::resolve_target;
use crate::games::puyo::scoring::ScoreWeights;
use crate::games::puyo::BoardConfig;

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaResult {
    pub num_boards: usize,
    /// Boards where this strategy's ojama score was the unique best.
    pub wins: HashMap<String, usize>,
    /// Boards where the best score was shared.
    pub ties: usize,
    /// Boards where the chosen lump reached the threshold and was erased.
    pub erasures: HashMap<String, usize>,
    /// Ojama score per board; 0 when no move was possible or nothing erased.
    pub total_scores: HashMap<String, Vec<f64>>,
    /// Size of the chosen lump per board, erased or not.
    pub lump_sizes: HashMap<String, Vec<f64>>,
    pub board_durations_ms: Vec<f64>,
}

/// Seed for board `board_idx` of a run started at `base_seed`.
fn board_seed(base_seed: u64, board_idx: usize) -> u64 {
    base_seed.wrapping_add(board_idx as u64)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Wilson score interval for `successes` out of `trials` boards.
fn wilson_interval(successes: usize, trials: usize) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 0.0);
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = 1.96_f64 * 1.96;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = (z2 * (p * (1.0 - p) / n + z2 / (4.0 * n * n))).sqrt() / denom;
    ((center - margin).max(0.0), (center + margin).min(1.0))
}

impl ArenaResult {
    fn count(map: &HashMap<String, usize>, name: &str) -> usize {
        map.get(name).copied().unwrap_or(0)
    }

    pub fn win_rate(&self, name: &str) -> f64 {
        Self::count(&self.wins, name) as f64 / self.num_boards.max(1) as f64
    }

    /// Share of boards where the strategy's move actually cleared a lump.
    pub fn erasure_rate(&self, name: &str) -> f64 {
        Self::count(&self.erasures, name) as f64 / self.num_boards.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        self.total_scores.get(name).map_or(0.0, |s| mean(s))
    }

    pub fn avg_lump_size(&self, name: &str) -> f64 {
        self.lump_sizes.get(name).map_or(0.0, |s| mean(s))
    }

    /// Sample standard deviation of the per-board ojama score.
    ///
    /// Scores are integers and most boards sit near 0, so a spread well above
    /// the mean means a few boards with big obstacle clears carry the average.
    pub fn score_stddev(&self, name: &str) -> f64 {
        let Some(scores) = self.total_scores.get(name).filter(|s| s.len() >= 2) else {
            return 0.0;
        };
        let avg = mean(scores);
        let sum_sq: f64 = scores.iter().map(|s| (s - avg) * (s - avg)).sum();
        (sum_sq / (scores.len() - 1) as f64).sqrt()
    }

    /// 95% interval on the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        wilson_interval(Self::count(&self.wins, name), self.num_boards)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} boards)", self.num_boards)];
        lines.push("=".repeat(72));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>14}: {:4} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  score={:5.2} +/- {:4.2}  lump={:4.1}  erased={:5.1}%",
                name,
                Self::count(&self.wins, name),
                self.win_rate(name) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_score(name),
                self.score_stddev(name),
                self.avg_lump_size(name),
                self.erasure_rate(name) * 100.0,
            ));
        }
        lines.push(format!("  {:>14}: {}", "Ties", self.ties));
        if !self.board_durations_ms.is_empty() {
            let avg_ms = mean(&self.board_durations_ms);
            let total_s = self.board_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Avg board: {:.3}ms  |  Total: {:.2}s", avg_ms, total_s));
        }
        lines.join("\n")
    }
}

/// One board's result, per strategy in name order.
struct BoardRecord {
    scores: Vec<f64>,
    lump_sizes: Vec<f64>,
    erased: Vec<bool>,
    duration_ms: f64,
}

/// Play `num_boards` random boards with every strategy and aggregate.
///
/// Board `i` is generated from seed `base_seed + i` (wrapping), so runs are reproducible
/// for deterministic strategies. Boards are evaluated in parallel.
pub fn run_arena(
    strategies: &HashMap<String, Box<dyn BotStrategy>>,
    config: &BoardConfig,
    gen_params: &BoardGenParams,
    weights: &ScoreWeights,
    num_boards: usize,
    base_seed: u64,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let mut names: Vec<String> = strategies.keys().cloned().collect();
    names.sort();

    let completed = AtomicUsize::new(0);
    let records: Vec<BoardRecord> = (0..num_boards)
        .into_par_iter()
        .map(|board_idx| {
            let mut rng = StdRng::seed_from_u64(board_seed(base_seed, board_idx));
            let own = random_board(config, gen_params, &mut rng);
            let rival = random_board(config, gen_params, &mut rng);

            let t0 = Instant::now();
            let mut scores = Vec::with_capacity(names.len());
            let mut lump_sizes = Vec::with_capacity(names.len());
            let mut erased = Vec::with_capacity(names.len());
            for name in &names {
                let strategy = &strategies[name];
                let outcome = strategy
                    .choose_target(&own, &rival)
                    .and_then(|target| resolve_target(&mut own.clone(), target, weights));
                scores.push(outcome.map(|o| o.score as f64).unwrap_or(0.0));
                lump_sizes.push(outcome.map(|o| o.lump_size as f64).unwrap_or(0.0));
                erased.push(outcome.is_some_and(|o| o.erased));
            }
            let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(done, num_boards);
            }
            BoardRecord { scores, lump_sizes, erased, duration_ms }
        })
        .collect();

    let mut result = ArenaResult {
        num_boards,
        wins: names.iter().map(|n| (n.clone(), 0)).collect(),
        ties: 0,
        erasures: names.iter().map(|n| (n.clone(), 0)).collect(),
        total_scores: names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        lump_sizes: names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        board_durations_ms: Vec::with_capacity(num_boards),
    };

    for record in records {
        let best = record.scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let leaders: Vec<usize> = (0..names.len())
            .filter(|&i| record.scores[i] == best)
            .collect();
        if leaders.len() == 1 {
            if let Some(w) = result.wins.get_mut(&names[leaders[0]]) {
                *w += 1;
            }
        } else {
            result.ties += 1;
        }
        for (i, name) in names.iter().enumerate() {
            if let Some(s) = result.total_scores.get_mut(name) {
                s.push(record.scores[i]);
            }
            if let Some(s) = result.lump_sizes.get_mut(name) {
                s.push(record.lump_sizes[i]);
            }
            if record.erased[i] {
                if let Some(e) = result.erasures.get_mut(name) {
                    *e += 1;
                }
            }
        }
        result.board_durations_ms.push(record.duration_ms);
    }

    tracing::debug!(boards = num_boards, ties = result.ties, "arena finished");
    result
}
