//! Text protocol: whitespace-separated integers in, `name` and `col row` out.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use super::board::Board;
use super::types::{BoardConfig, Cell, Position};

/// Why a read stopped. Every variant ends the session.
#[derive(Debug)]
pub enum ReadError {
    /// The stream ended.
    Exhausted,
    /// A token was present but unusable.
    Malformed(String),
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Exhausted => write!(f, "input exhausted"),
            ReadError::Malformed(msg) => write!(f, "malformed input: {}", msg),
            ReadError::Io(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Pulls integers from a line-oriented stream, ignoring line boundaries.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<String, ReadError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(ReadError::Exhausted);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    pub fn next_i32(&mut self) -> Result<i32, ReadError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| ReadError::Malformed(format!("expected integer, got {:?}", token)))
    }

    fn next_positive(&mut self, what: &str) -> Result<usize, ReadError> {
        let value = self.next_i32()?;
        if value <= 0 {
            return Err(ReadError::Malformed(format!("{} must be positive, got {}", what, value)));
        }
        Ok(value as usize)
    }

    /// The bootstrap line: `W H N M`.
    pub fn read_config(&mut self) -> Result<BoardConfig, ReadError> {
        let width = self.next_positive("width")?;
        let height = self.next_positive("height")?;
        let threshold = self.next_positive("threshold")?;
        let colors = self.next_positive("color count")? as i32;
        Ok(BoardConfig::new(width, height, threshold, colors))
    }

    /// One board snapshot: W rain queues, then H rows of W cells.
    pub fn read_board(&mut self, config: &BoardConfig) -> Result<Board, ReadError> {
        let mut board = Board::new(*config);
        for x in 0..config.width {
            let count = self.next_i32()?;
            if count < 0 {
                return Err(ReadError::Malformed(format!(
                    "negative rain count {} for column {}",
                    count, x
                )));
            }
            for _ in 0..count {
                let kind = self.next_i32()?;
                board.push_rain(x, kind);
            }
        }
        for y in 0..config.height as i32 {
            for x in 0..config.width as i32 {
                let kind = self.next_i32()?;
                board.set(Position::new(x, y), Cell::new(kind));
            }
        }
        Ok(board)
    }
}

pub fn write_name<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "{}", name)?;
    out.flush()
}

/// Write a target 1-indexed in both axes. `None` is written as `0 0`.
pub fn write_target<W: Write>(out: &mut W, target: Option<Position>) -> io::Result<()> {
    let (x, y) = match target {
        Some(p) => (p.x + 1, p.y + 1),
        None => (0, 0),
    };
    writeln!(out, "{} {}", x, y)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_config_across_lines() {
        let mut r = TokenReader::new(Cursor::new("6 12\n4 5\n"));
        assert_eq!(r.read_config().unwrap(), BoardConfig::new(6, 12, 4, 5));
    }

    #[test]
    fn test_read_board_transposes_rows() {
        let input = "2 3 1\n0\n1 2\n-1 -2\n";
        let mut r = TokenReader::new(Cursor::new(input));
        let board = r.read_board(&BoardConfig::new(2, 2, 2, 3)).unwrap();
        assert_eq!(board.to_rows(), vec![vec![1, 2], vec![-1, -2]]);
        assert_eq!(board.cell(Position::new(1, 0)), Some(Cell::new(2)));
        assert_eq!(board.cell(Position::new(0, 1)), Some(Cell::new(-1)));
        let q: Vec<i32> = board.rain_queue(0).unwrap().iter().copied().collect();
        assert_eq!(q, vec![3, 1]);
        assert!(board.rain_queue(1).unwrap().is_empty());
    }

    #[test]
    fn test_exhausted_mid_board() {
        let mut r = TokenReader::new(Cursor::new("0 0\n1 2\n"));
        let err = r.read_board(&BoardConfig::new(2, 2, 2, 3)).unwrap_err();
        assert!(matches!(err, ReadError::Exhausted));
    }

    #[test]
    fn test_malformed_token() {
        let mut r = TokenReader::new(Cursor::new("3 x 4 5"));
        assert!(matches!(r.read_config(), Err(ReadError::Malformed(_))));
    }

    #[test]
    fn test_negative_rain_count_is_malformed() {
        let mut r = TokenReader::new(Cursor::new("-1 0 1 1"));
        let err = r.read_board(&BoardConfig::new(1, 1, 1, 1)).unwrap_err();
        assert!(matches!(err, ReadError::Malformed(_)));
    }

    #[test]
    fn test_write_target_is_one_indexed() {
        let mut out = Vec::new();
        write_target(&mut out, Some(Position::new(0, 2))).unwrap();
        write_target(&mut out, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 3\n0 0\n");
    }
}
