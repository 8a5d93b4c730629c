//! Grid model: the column-major field plus per-column rain queues.
//!
//! The cell at column `x`, row `y` lives at `field[x][y]`, NOT `field[y][x]`.
//! Input arrives row-major and is transposed on construction.

use std::collections::VecDeque;

use serde::Serialize;

use super::types::{BoardConfig, Cell, Position};

/// One player's board for a single turn.
///
/// Only `new` and `from_rows` build a board, so `field` and `rain` always
/// match `config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    config: BoardConfig,
    field: Vec<Vec<Cell>>,
    /// `rain[x]` holds the balls queued for column `x`, front drops first.
    rain: Vec<VecDeque<i32>>,
}

impl Board {
    /// An all-empty board with empty rain queues.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            field: vec![vec![Cell::empty(); config.height]; config.width],
            rain: vec![VecDeque::new(); config.width],
        }
    }

    /// Build a board from row-major rows (row 0 first) and per-column rain queues.
    pub fn from_rows(
        config: BoardConfig,
        rain: Vec<Vec<i32>>,
        rows: &[Vec<i32>],
    ) -> Result<Self, String> {
        if rain.len() != config.width {
            return Err(format!(
                "expected {} rain queues, got {}",
                config.width,
                rain.len()
            ));
        }
        if rows.len() != config.height {
            return Err(format!("expected {} rows, got {}", config.height, rows.len()));
        }

        let mut board = Board::new(config);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != config.width {
                return Err(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    config.width
                ));
            }
            for (x, &kind) in row.iter().enumerate() {
                board.field[x][y] = Cell::new(kind);
            }
        }
        for (x, queue) in rain.into_iter().enumerate() {
            board.rain[x] = queue.into();
        }
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.config.height
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.config.threshold
    }

    /// Single source of truth for bounds checks.
    #[inline]
    pub fn is_outside(&self, pos: Position) -> bool {
        pos.x < 0 || pos.y < 0 || self.width() <= pos.x as usize || self.height() <= pos.y as usize
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        if self.is_outside(pos) {
            None
        } else {
            Some((pos.x as usize, pos.y as usize))
        }
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|(x, y)| self.field[x][y])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let (x, y) = self.index(pos)?;
        Some(&mut self.field[x][y])
    }

    /// Overwrite a cell. Returns false (and does nothing) if `pos` is outside.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.cell_mut(pos) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// In-bounds orthogonal neighbors of `pos`, in (up, right, down, left) order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.adjacent().into_iter().filter(move |&n| !self.is_outside(n))
    }

    /// Column `x`, top row first.
    pub fn column(&self, x: usize) -> Option<&[Cell]> {
        self.field.get(x).map(|c| c.as_slice())
    }

    pub(crate) fn column_mut(&mut self, x: usize) -> Option<(&mut Vec<Cell>, &mut VecDeque<i32>)> {
        let col = self.field.get_mut(x)?;
        let queue = self.rain.get_mut(x)?;
        Some((col, queue))
    }

    pub fn rain_queue(&self, x: usize) -> Option<&VecDeque<i32>> {
        self.rain.get(x)
    }

    /// Append a ball to the back of column `x`'s rain queue.
    pub fn push_rain(&mut self, x: usize, kind: i32) -> bool {
        match self.rain.get_mut(x) {
            Some(queue) => {
                queue.push_back(kind);
                true
            }
            None => false,
        }
    }

    /// Every position in column-major, then row-ascending order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Position::new(x, y)))
    }

    /// Row-major dump (row 0 first), the same layout the protocol reads.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        (0..self.height())
            .map(|y| (0..self.width()).map(|x| self.field[x][y].kind).collect())
            .collect()
    }
}
