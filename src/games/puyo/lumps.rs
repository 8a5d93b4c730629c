//! Lump discovery: connected regions of identical cell kind.

use super::board::Board;
use super::types::Position;

/// Visited markers for lump searches, sized to one board.
///
/// Reuse a single grid across calls to enumerate distinct lumps without
/// rediscovering the same region from each of its cells.
#[derive(Debug, Clone)]
pub struct Visited {
    width: usize,
    height: usize,
    marks: Vec<bool>,
}

impl Visited {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            marks: vec![false; width * height],
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.width(), board.height())
    }

    /// True if this grid was sized for `board`.
    pub fn fits(&self, board: &Board) -> bool {
        self.width == board.width() && self.height == board.height()
    }

    #[inline]
    fn slot(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x * self.height + y)
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.slot(pos).map(|i| self.marks[i]).unwrap_or(false)
    }

    /// Mark `pos`. Returns true if it was not marked before.
    pub fn mark(&mut self, pos: Position) -> bool {
        match self.slot(pos) {
            Some(i) if !self.marks[i] => {
                self.marks[i] = true;
                true
            }
            _ => false,
        }
    }
}

impl Board {
    /// Positions connected to `origin` through cells of exactly its kind.
    ///
    /// Returns an empty list if `origin` is outside, already marked in
    /// `visited`, or `visited` was sized for another board. Every returned
    /// position is marked. The origin comes first.
    pub fn get_lump_with(&self, origin: Position, visited: &mut Visited) -> Vec<Position> {
        if !visited.fits(self) {
            tracing::warn!(
                grid_width = visited.width,
                grid_height = visited.height,
                width = self.width(),
                height = self.height(),
                "visited grid does not match board"
            );
            return Vec::new();
        }
        let Some(kind) = self.cell(origin).map(|c| c.kind) else {
            return Vec::new();
        };
        if !visited.mark(origin) {
            return Vec::new();
        }

        let mut lump = vec![origin];
        let mut stack = vec![origin];
        while let Some(pos) = stack.pop() {
            for next in self.neighbors(pos) {
                if self.cell(next).map(|c| c.kind) != Some(kind) {
                    continue;
                }
                if visited.mark(next) {
                    lump.push(next);
                    stack.push(next);
                }
            }
        }
        lump
    }

    /// Lump at `origin`, ignoring any external visitation state.
    pub fn get_lump(&self, origin: Position) -> Vec<Position> {
        let mut visited = Visited::for_board(self);
        self.get_lump_with(origin, &mut visited)
    }

    /// Every distinct lump of colorful cells, in column-major discovery order.
    pub fn colorful_lumps(&self) -> Vec<Vec<Position>> {
        let mut visited = Visited::for_board(self);
        let mut lumps = Vec::new();
        for pos in self.positions() {
            if !self.cell(pos).is_some_and(|c| c.is_colorful()) {
                continue;
            }
            let lump = self.get_lump_with(pos, &mut visited);
            if !lump.is_empty() {
                lumps.push(lump);
            }
        }
        lumps
    }
}
