//! Domain types for the ojama board: cells, positions, configuration.

use serde::{Deserialize, Serialize};

pub const HARD_OJAMA: i32 = -2;
pub const NORMAL_OJAMA: i32 = -1;
pub const EMPTY: i32 = 0;

/// Neighbor offsets in (up, right, down, left) order. Row 0 is the top row.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Bootstrap configuration, read once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Minimum lump size for an erasure to take effect.
    pub threshold: usize,
    /// Number of ball colors; colorful kinds are 1..=colors.
    pub colors: i32,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize, threshold: usize, colors: i32) -> Self {
        Self { width, height, threshold, colors }
    }
}

/// A grid coordinate. `x` is the column, `y` the row (0 = top).
///
/// Signed so that neighbor offsets can step outside the board; use
/// `Board::is_outside` before treating a position as an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step away in `DIRECTIONS[dir]`.
    #[inline]
    pub fn moved(self, dir: usize) -> Position {
        let (dx, dy) = DIRECTIONS[dir];
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// The four orthogonal neighbors, unchecked against any board.
    pub fn adjacent(self) -> [Position; 4] {
        [self.moved(0), self.moved(1), self.moved(2), self.moved(3)]
    }
}

/// How a cell kind is read. There is no fourth class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Ojama,
    Empty,
    Colorful,
}

/// One grid position's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    pub kind: i32,
}

impl Cell {
    pub const fn new(kind: i32) -> Self {
        Self { kind }
    }

    pub const fn empty() -> Self {
        Self { kind: EMPTY }
    }

    /// Every predicate below is defined through this.
    #[inline]
    pub fn class(&self) -> CellClass {
        match self.kind {
            k if k < EMPTY => CellClass::Ojama,
            EMPTY => CellClass::Empty,
            _ => CellClass::Colorful,
        }
    }

    #[inline]
    pub fn is_ojama(&self) -> bool {
        self.class() == CellClass::Ojama
    }

    #[inline]
    pub fn is_hard_ojama(&self) -> bool {
        self.kind == HARD_OJAMA
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.class() == CellClass::Empty
    }

    #[inline]
    pub fn is_colorful(&self) -> bool {
        self.class() == CellClass::Colorful
    }

    /// Hits still needed to erase this obstacle; 0 for anything else.
    pub fn toughness(&self) -> u32 {
        match self.class() {
            CellClass::Ojama => self.kind.unsigned_abs(),
            CellClass::Empty | CellClass::Colorful => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_classes() {
        assert_eq!(Cell::new(HARD_OJAMA).class(), CellClass::Ojama);
        assert_eq!(Cell::new(NORMAL_OJAMA).class(), CellClass::Ojama);
        assert_eq!(Cell::empty().class(), CellClass::Empty);
        assert_eq!(Cell::new(3).class(), CellClass::Colorful);
    }

    #[test]
    fn test_predicates_agree_with_class() {
        for kind in -3..=5 {
            let cell = Cell::new(kind);
            let class = cell.class();
            assert_eq!(cell.is_ojama(), class == CellClass::Ojama, "kind {}", kind);
            assert_eq!(cell.is_empty(), class == CellClass::Empty, "kind {}", kind);
            assert_eq!(cell.is_colorful(), class == CellClass::Colorful, "kind {}", kind);
            let matching = [cell.is_ojama(), cell.is_empty(), cell.is_colorful()];
            assert_eq!(matching.iter().filter(|&&m| m).count(), 1);
        }
        assert!(Cell::new(HARD_OJAMA).is_hard_ojama());
        assert!(!Cell::new(NORMAL_OJAMA).is_hard_ojama());
    }

    #[test]
    fn test_toughness() {
        assert_eq!(Cell::new(HARD_OJAMA).toughness(), 2);
        assert_eq!(Cell::new(NORMAL_OJAMA).toughness(), 1);
        assert_eq!(Cell::empty().toughness(), 0);
        assert_eq!(Cell::new(1).toughness(), 0);
    }

    #[test]
    fn test_direction_order_is_up_right_down_left() {
        let p = Position::new(2, 2);
        assert_eq!(
            p.adjacent(),
            [
                Position::new(2, 1),
                Position::new(3, 2),
                Position::new(2, 3),
                Position::new(1, 2),
            ]
        );
    }
}
