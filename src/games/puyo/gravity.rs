//! Gravity and refill: compact each column downward, then drop queued rain.

use super::board::Board;
use super::types::Cell;

impl Board {
    /// Let every column settle, independently.
    ///
    /// Scanning bottom-to-top, each empty row takes the nearest non-empty cell
    /// above it. When nothing is left above, the front of the column's rain
    /// queue drops in. When the queue runs dry the column is left as is, with
    /// its remaining top rows empty.
    pub fn apply_gravity(&mut self) {
        let height = self.height() as isize;
        for x in 0..self.width() {
            let Some((column, queue)) = self.column_mut(x) else {
                continue;
            };

            // Next candidate row to fall; rows below it are already examined.
            let mut source = height - 2;
            for target in (0..height).rev() {
                if !column[target as usize].is_empty() {
                    continue;
                }
                source = source.min(target - 1);
                while source >= 0 && column[source as usize].is_empty() {
                    source -= 1;
                }
                if source >= 0 {
                    column.swap(target as usize, source as usize);
                } else if let Some(kind) = queue.pop_front() {
                    column[target as usize] = Cell::new(kind);
                } else {
                    tracing::trace!(column = x, row = target, "rain queue exhausted");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::puyo::types::{BoardConfig, Position, HARD_OJAMA, NORMAL_OJAMA};

    fn column_board(cells: &[i32], rain: Vec<i32>) -> Board {
        let config = BoardConfig::new(1, cells.len(), 3, 4);
        let rows: Vec<Vec<i32>> = cells.iter().map(|&k| vec![k]).collect();
        Board::from_rows(config, vec![rain], &rows).unwrap()
    }

    fn column(board: &Board) -> Vec<i32> {
        board.column(0).unwrap().iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_erase_then_gravity_without_rain_leaves_empty() {
        let mut b = column_board(&[1, 1, 0, 0], vec![]);
        let lump = b.get_lump(Position::new(0, 0));
        assert_eq!(lump.len(), 2);
        b.erase(&lump);
        b.apply_gravity();
        assert_eq!(column(&b), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_vacated_top_filled_from_rain() {
        let mut b = column_board(&[0, 1, 2], vec![3]);
        b.apply_gravity();
        assert_eq!(column(&b), vec![3, 1, 2]);
        assert!(b.rain_queue(0).unwrap().is_empty());
    }

    #[test]
    fn test_cells_fall_into_gaps() {
        let mut b = column_board(&[1, 0, 2, 0, 0], vec![]);
        b.apply_gravity();
        assert_eq!(column(&b), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_rain_fills_in_fifo_order_from_the_bottom() {
        let mut b = column_board(&[0, 0, 0, 4], vec![1, 2, 3]);
        b.apply_gravity();
        // The oldest queued ball lands lowest.
        assert_eq!(column(&b), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_partial_rain_leaves_top_empty() {
        let mut b = column_board(&[0, 0, 0, 0], vec![2]);
        b.apply_gravity();
        assert_eq!(column(&b), vec![0, 0, 0, 2]);
    }

    #[test]
    fn test_unused_rain_stays_queued() {
        let mut b = column_board(&[0, 1], vec![2, 3]);
        b.apply_gravity();
        assert_eq!(column(&b), vec![2, 1]);
        let rest: Vec<i32> = b.rain_queue(0).unwrap().iter().copied().collect();
        assert_eq!(rest, vec![3]);
    }

    #[test]
    fn test_ojama_falls_like_any_cell() {
        let mut b = column_board(&[HARD_OJAMA, 0, NORMAL_OJAMA, 0], vec![]);
        b.apply_gravity();
        assert_eq!(column(&b), vec![0, 0, HARD_OJAMA, NORMAL_OJAMA]);
    }

    #[test]
    fn test_columns_settle_independently() {
        let config = BoardConfig::new(2, 2, 3, 4);
        let mut b = Board::from_rows(
            config,
            vec![vec![], vec![4]],
            &[vec![1, 0], vec![0, 0]],
        )
        .unwrap();
        b.apply_gravity();
        assert_eq!(b.to_rows(), vec![vec![0, 0], vec![1, 4]]);
    }

    #[test]
    fn test_full_board_is_unchanged() {
        let mut b = column_board(&[1, 2, 3], vec![4]);
        let before = b.clone();
        b.apply_gravity();
        assert_eq!(b, before);
    }
}
