//! Bot strategy trait and implementations.

use rand::seq::SliceRandom;

use crate::games::puyo::lumps::Visited;
use crate::games::puyo::scoring::ScoreWeights;
use crate::games::puyo::{Board, Position};

/// A bot strategy picks one target cell given both players' boards.
pub trait BotStrategy: Send + Sync {
    /// Announced once at session start.
    fn name(&self) -> &str;

    /// `None` when the own board holds no colorful ball.
    fn choose_target(&self, own: &Board, rival: &Board) -> Option<Position>;
}

/// Position and size of the largest colorful lump. Ties keep the first found
/// in column-major, then row-ascending, order.
pub fn largest_lump(board: &Board) -> Option<(Position, usize)> {
    let mut visited = Visited::for_board(board);
    let mut best: Option<(Position, usize)> = None;
    for pos in board.positions() {
        if !board.cell(pos).is_some_and(|c| c.is_colorful()) {
            continue;
        }
        let size = board.get_lump_with(pos, &mut visited).len();
        if size > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((pos, size));
        }
    }
    best
}

/// Picks the largest same-color lump. The reference sample AI.
pub struct GreedyLumpStrategy {
    name: String,
}

impl GreedyLumpStrategy {
    pub fn new() -> Self {
        Self::named("GreedyAI")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for GreedyLumpStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for GreedyLumpStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_target(&self, own: &Board, _rival: &Board) -> Option<Position> {
        largest_lump(own).map(|(pos, _)| pos)
    }
}

/// Picks the lump whose erasure scores best under the ojama formula.
///
/// Only lumps reaching the board threshold are considered; with none, it
/// falls back to the largest lump.
pub struct OjamaScoreStrategy {
    name: String,
    pub weights: ScoreWeights,
}

impl OjamaScoreStrategy {
    pub fn new(weights: ScoreWeights) -> Self {
        Self::named("OjamaScoreAI", weights)
    }

    pub fn named(name: impl Into<String>, weights: ScoreWeights) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }
}

impl BotStrategy for OjamaScoreStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_target(&self, own: &Board, _rival: &Board) -> Option<Position> {
        let mut best: Option<(i64, usize, Position)> = None;
        for lump in own.colorful_lumps() {
            if lump.len() < own.threshold() {
                continue;
            }
            let score = own.count_ojamas(&lump).calculate_with(&self.weights);
            let better = match best {
                None => true,
                Some((s, size, _)) => score > s || (score == s && lump.len() > size),
            };
            if better {
                best = Some((score, lump.len(), lump[0]));
            }
        }
        match best {
            Some((_, _, pos)) => Some(pos),
            None => largest_lump(own).map(|(pos, _)| pos),
        }
    }
}

/// Picks a uniformly random colorful cell.
pub struct RandomStrategy {
    name: String,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::named("RandomAI")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for RandomStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_target(&self, own: &Board, _rival: &Board) -> Option<Position> {
        let colorful: Vec<Position> = own
            .positions()
            .filter(|&p| own.cell(p).is_some_and(|c| c.is_colorful()))
            .collect();
        let mut rng = rand::thread_rng();
        colorful.choose(&mut rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::puyo::scoring::DEFAULT_WEIGHTS;
    use crate::games::puyo::types::{BoardConfig, HARD_OJAMA, NORMAL_OJAMA};

    fn board(rows: &[Vec<i32>], threshold: usize) -> Board {
        let config = BoardConfig::new(rows[0].len(), rows.len(), threshold, 4);
        Board::from_rows(config, vec![vec![]; config.width], rows).unwrap()
    }

    #[test]
    fn test_greedy_picks_plus_shaped_lump() {
        let b = board(
            &[
                vec![2, 1, 3],
                vec![1, 1, 1],
                vec![3, 1, 2],
            ],
            3,
        );
        let target = GreedyLumpStrategy::new().choose_target(&b, &b).unwrap();
        assert_eq!(b.cell(target).unwrap().kind, 1);
        assert_eq!(target, Position::new(0, 1));
    }

    #[test]
    fn test_greedy_tie_keeps_first_in_scan_order() {
        let b = board(&[vec![1, 2], vec![1, 2]], 2);
        assert_eq!(largest_lump(&b), Some((Position::new(0, 0), 2)));
    }

    #[test]
    fn test_greedy_ignores_ojama_lumps() {
        let b = board(
            &[
                vec![NORMAL_OJAMA, NORMAL_OJAMA, NORMAL_OJAMA],
                vec![NORMAL_OJAMA, NORMAL_OJAMA, 4],
            ],
            2,
        );
        assert_eq!(largest_lump(&b), Some((Position::new(2, 1), 1)));
    }

    #[test]
    fn test_no_colorful_cells() {
        let b = board(&[vec![HARD_OJAMA, NORMAL_OJAMA]], 1);
        assert_eq!(GreedyLumpStrategy::new().choose_target(&b, &b), None);
        assert_eq!(RandomStrategy::new().choose_target(&b, &b), None);
        assert_eq!(OjamaScoreStrategy::new(DEFAULT_WEIGHTS).choose_target(&b, &b), None);
    }

    #[test]
    fn test_ojama_score_prefers_damaging_lump() {
        // The 1-lump is larger; the 2-lump breaks five ojama.
        let b = board(
            &[
                vec![1, 1, 1, 1, NORMAL_OJAMA],
                vec![3, 3, 3, NORMAL_OJAMA, 2],
                vec![4, 4, 4, NORMAL_OJAMA, 2],
                vec![3, 3, 3, NORMAL_OJAMA, 2],
                vec![4, 4, 4, 3, NORMAL_OJAMA],
            ],
            3,
        );
        let greedy = GreedyLumpStrategy::new().choose_target(&b, &b).unwrap();
        assert_eq!(b.cell(greedy).unwrap().kind, 1);

        let scorer = OjamaScoreStrategy::new(DEFAULT_WEIGHTS);
        let target = scorer.choose_target(&b, &b).unwrap();
        assert_eq!(target, Position::new(4, 1));
    }

    #[test]
    fn test_ojama_score_falls_back_below_threshold() {
        let b = board(&[vec![1, 1, 2]], 5);
        let target = OjamaScoreStrategy::new(DEFAULT_WEIGHTS).choose_target(&b, &b);
        assert_eq!(target, Some(Position::new(0, 0)));
    }

    #[test]
    fn test_random_picks_colorful() {
        let b = board(&[vec![NORMAL_OJAMA, 3, HARD_OJAMA]], 1);
        for _ in 0..20 {
            assert_eq!(RandomStrategy::new().choose_target(&b, &b), Some(Position::new(1, 0)));
        }
    }
}
