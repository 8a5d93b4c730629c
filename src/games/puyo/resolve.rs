//! Resolve one chosen target against a board: lump, tally, erase, settle.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::scoring::{OjamaCalculator, ScoreWeights};
use super::types::Position;

/// What happened when a target was played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub target: Position,
    pub lump_size: usize,
    /// False when the lump was below the board's threshold.
    pub erased: bool,
    pub tally: OjamaCalculator,
    pub score: i64,
}

/// Play `target` on `board`.
///
/// Returns `None` if the target is outside or not a colorful ball. A lump
/// smaller than the threshold leaves the board untouched.
pub fn resolve_target(
    board: &mut Board,
    target: Position,
    weights: &ScoreWeights,
) -> Option<TurnOutcome> {
    if !board.cell(target)?.is_colorful() {
        return None;
    }

    let lump = board.get_lump(target);
    if lump.len() < board.threshold() {
        return Some(TurnOutcome {
            target,
            lump_size: lump.len(),
            erased: false,
            tally: OjamaCalculator::default(),
            score: 0,
        });
    }

    let tally = board.count_ojamas(&lump);
    board.erase(&lump);
    board.apply_gravity();
    Some(TurnOutcome {
        target,
        lump_size: lump.len(),
        erased: true,
        tally,
        score: tally.calculate_with(weights),
    })
}
