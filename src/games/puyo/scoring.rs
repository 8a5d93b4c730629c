//! Damage tally and the ojama score formula.

use serde::{Deserialize, Serialize};

/// Scoring constants. `Default` is the reference tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Coefficient on colorful_erasure².
    pub colorful_coef: f64,
    /// Coefficient on (ojama_erasure + weakness)².
    pub ojama_coef: f64,
    /// colorful_erasure at which hard mode starts.
    pub hard_threshold: u32,
    /// Multiplier applied to both coefficients in hard mode.
    pub hard_factor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    colorful_coef: 0.015,
    ojama_coef: 0.15,
    hard_threshold: 35,
    hard_factor: 0.6,
};

/// What one erasure does to the board, counted before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OjamaCalculator {
    /// Hard obstacles hit at least once.
    pub weakness: u32,
    /// Obstacles whose damage reached their toughness.
    pub ojama_erasure: u32,
    /// Size of the erased lump.
    pub colorful_erasure: u32,
}

impl OjamaCalculator {
    pub fn new(weakness: u32, ojama_erasure: u32, colorful_erasure: u32) -> Self {
        Self { weakness, ojama_erasure, colorful_erasure }
    }

    pub fn is_hard(&self) -> bool {
        self.is_hard_with(&DEFAULT_WEIGHTS)
    }

    pub fn is_hard_with(&self, weights: &ScoreWeights) -> bool {
        self.colorful_erasure >= weights.hard_threshold
    }

    pub fn calculate(&self) -> i64 {
        self.calculate_with(&DEFAULT_WEIGHTS)
    }

    /// `colorful² · k + (ojama + weakness)² · l`, truncated toward zero.
    pub fn calculate_with(&self, weights: &ScoreWeights) -> i64 {
        let ojamas = (self.ojama_erasure + self.weakness) as u64;
        let colorful = self.colorful_erasure as u64;
        let (mut k, mut l) = (weights.colorful_coef, weights.ojama_coef);
        if self.is_hard_with(weights) {
            k *= weights.hard_factor;
            l *= weights.hard_factor;
        }
        ((colorful * colorful) as f64 * k + (ojamas * ojamas) as f64 * l) as i64
    }
}
