//! Erasure engine: obstacle damage accounting and board mutation.
//!
//! `count_ojamas` and `erase` must be given the same lump. `erase` re-derives
//! neighbor damage by scanning instead of reusing the tally.

use super::board::Board;
use super::scoring::OjamaCalculator;
use super::types::{Cell, Position};

impl Board {
    /// Tally what erasing `lump` would do, without touching the board.
    ///
    /// Only colorful members deal damage. Each neighboring obstacle counts as
    /// erased once its hits reach its toughness, and a hard obstacle counts as
    /// weakened on its first hit.
    pub fn count_ojamas(&self, lump: &[Position]) -> OjamaCalculator {
        let mut tally = OjamaCalculator {
            colorful_erasure: lump.len() as u32,
            ..Default::default()
        };
        let height = self.height();
        let mut hits = vec![0u32; self.width() * height];

        for &pos in lump {
            if !self.cell(pos).is_some_and(|c| c.is_colorful()) {
                continue;
            }
            for next in self.neighbors(pos) {
                let Some(target) = self.cell(next).filter(|c| c.is_ojama()) else {
                    continue;
                };
                let slot = &mut hits[next.x as usize * height + next.y as usize];
                *slot += 1;
                if *slot == target.toughness() {
                    tally.ojama_erasure += 1;
                }
                if target.is_hard_ojama() && *slot == 1 {
                    tally.weakness += 1;
                }
            }
        }
        tally
    }

    /// Clear one cell. Gravity fills it later.
    pub fn erase_cell(&mut self, pos: Position) {
        self.set(pos, Cell::empty());
    }

    /// Weaken the obstacle at `pos` by one step. No-op for anything else.
    pub fn attack_ojama(&mut self, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            if cell.is_ojama() {
                cell.kind += 1;
            }
        }
    }

    /// Empty every position in `lump` and hit each neighboring obstacle once
    /// per adjacent erased position.
    pub fn erase(&mut self, lump: &[Position]) {
        for &pos in lump {
            self.erase_cell(pos);
            for next in pos.adjacent() {
                self.attack_ojama(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::puyo::types::{BoardConfig, EMPTY, HARD_OJAMA, NORMAL_OJAMA};

    const H: i32 = HARD_OJAMA;
    const N: i32 = NORMAL_OJAMA;

    fn board(rows: &[Vec<i32>]) -> Board {
        let config = BoardConfig::new(rows[0].len(), rows.len(), 3, 4);
        Board::from_rows(config, vec![vec![]; config.width], rows).unwrap()
    }

    #[test]
    fn test_normal_ojama_erased_by_single_hit() {
        let b = board(&[
            vec![N, 1, N],
            vec![0, 1, 0],
            vec![N, 1, N],
        ]);
        let lump = b.get_lump(Position::new(1, 0));
        let tally = b.count_ojamas(&lump);
        assert_eq!(tally, OjamaCalculator::new(0, 4, 3));
    }

    #[test]
    fn test_hard_ojama_hit_once_is_weakened_only() {
        let b = board(&[
            vec![1, H],
            vec![2, 2],
        ]);
        let tally = b.count_ojamas(&[Position::new(0, 0)]);
        assert_eq!(tally, OjamaCalculator::new(1, 0, 1));
    }

    #[test]
    fn test_hard_ojama_hit_twice_is_weakened_and_erased() {
        let b = board(&[
            vec![1, H],
            vec![2, 1],
        ]);
        // The two 1s are not connected; pass a caller-built lump touching H twice.
        let tally = b.count_ojamas(&[Position::new(0, 0), Position::new(1, 1)]);
        assert_eq!(tally, OjamaCalculator::new(1, 1, 2));
    }

    #[test]
    fn test_extra_hits_do_not_double_count() {
        // The normal ojama in the middle touches three lump members.
        let b = board(&[
            vec![1, 1, 1],
            vec![1, N, 1],
        ]);
        let lump = b.get_lump(Position::new(0, 0));
        assert_eq!(lump.len(), 5);
        let tally = b.count_ojamas(&lump);
        assert_eq!(tally.ojama_erasure, 1);
        assert_eq!(tally.weakness, 0);
    }

    #[test]
    fn test_non_colorful_members_deal_no_damage() {
        let b = board(&[vec![N, N, 1]]);
        let tally = b.count_ojamas(&[Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(tally, OjamaCalculator::new(0, 0, 2));
    }

    #[test]
    fn test_property_per_member_neighbors() {
        // Each lump member has one private normal neighbor (m = 3) and one
        // private hard neighbor (k = 3): expect m erasures and k weakenings.
        let b = board(&[
            vec![N, N, N],
            vec![2, 2, 2],
            vec![H, H, H],
        ]);
        let lump = b.get_lump(Position::new(0, 1));
        let tally = b.count_ojamas(&lump);
        assert_eq!(tally.colorful_erasure, 3);
        assert_eq!(tally.ojama_erasure, 3);
        assert_eq!(tally.weakness, 3);
    }

    #[test]
    fn test_erase_clears_lump_and_damages_neighbors() {
        let mut b = board(&[
            vec![H, 1, N],
            vec![2, 1, 3],
        ]);
        let lump = b.get_lump(Position::new(1, 0));
        b.erase(&lump);
        assert_eq!(b.to_rows(), vec![vec![N, EMPTY, EMPTY], vec![2, EMPTY, 3]]);
    }

    #[test]
    fn test_erase_hits_hard_ojama_twice_from_two_members() {
        let mut b = board(&[
            vec![1, H],
            vec![1, 1],
        ]);
        let lump = b.get_lump(Position::new(0, 0));
        let tally = b.count_ojamas(&lump);
        assert_eq!(tally, OjamaCalculator::new(1, 1, 3));
        b.erase(&lump);
        assert_eq!(b.to_rows(), vec![vec![0, 0], vec![0, 0]]);
    }

    #[test]
    fn test_attack_stops_at_empty() {
        let mut b = board(&[vec![N, 1]]);
        let p = Position::new(0, 0);
        b.attack_ojama(p);
        b.attack_ojama(p);
        assert_eq!(b.cell(p), Some(Cell::empty()));
        b.attack_ojama(Position::new(1, 0));
        assert_eq!(b.cell(Position::new(1, 0)), Some(Cell::new(1)));
        b.attack_ojama(Position::new(5, 5));
    }
}
