//! Seeded random boards for arena runs, tests and benches.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::{BoardConfig, Cell, Position, HARD_OJAMA, NORMAL_OJAMA};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGenParams {
    pub hard_ojama_rate: f64,
    pub normal_ojama_rate: f64,
    /// Balls queued per column.
    pub rain_depth: usize,
}

impl Default for BoardGenParams {
    fn default() -> Self {
        Self {
            hard_ojama_rate: 0.05,
            normal_ojama_rate: 0.10,
            rain_depth: 8,
        }
    }
}

pub fn random_board<R: Rng + ?Sized>(
    config: &BoardConfig,
    params: &BoardGenParams,
    rng: &mut R,
) -> Board {
    let mut board = Board::new(*config);
    let colors = config.colors.max(1);
    for x in 0..config.width {
        for _ in 0..params.rain_depth {
            board.push_rain(x, rng.gen_range(1..=colors));
        }
    }

    let positions: Vec<Position> = board.positions().collect();
    for pos in positions {
        let roll: f64 = rng.gen();
        let kind = if roll < params.hard_ojama_rate {
            HARD_OJAMA
        } else if roll < params.hard_ojama_rate + params.normal_ojama_rate {
            NORMAL_OJAMA
        } else {
            rng.gen_range(1..=colors)
        };
        board.set(pos, Cell::new(kind));
    }
    board
}
