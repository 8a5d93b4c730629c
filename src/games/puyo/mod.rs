//! Ojama board engine: grid model, lumps, erasure, gravity, and the text protocol.

pub mod board;
pub mod erasure;
pub mod generate;
pub mod gravity;
pub mod lumps;
pub mod protocol;
pub mod resolve;
pub mod scoring;
pub mod types;

pub use board::Board;
pub use lumps::Visited;
pub use scoring::{OjamaCalculator, ScoreWeights};
pub use types::{BoardConfig, Cell, CellClass, Position};
