//! Rolling fatigue trend classification

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Dead-band around zero difference, avoids noise-driven flapping
const TREND_DEADBAND: f64 = 5.0;

/// Samples compared on each side of the recent/older split
const WINDOW: usize = 5;

/// Fatigue trend over recent history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

/// Stateful trend analyzer over a bounded score history
///
/// Keeps the most recent scores (FIFO, oldest evicted) and compares
/// the mean of the last five against the mean of the five before
/// that. Owned by exactly one session.
#[derive(Debug)]
pub struct TrendAnalyzer {
    history: VecDeque<f64>,
    max_len: usize,
}

impl TrendAnalyzer {
    pub fn new(max_len: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Record a fatigue score, evicting the oldest past the bound
    pub fn push(&mut self, score: f64) {
        if self.history.len() >= self.max_len {
            self.history.pop_front();
        }
        self.history.push_back(score);
    }

    /// Number of scores currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Classify the current trend
    ///
    /// Fewer than five scores is insufficient data. A recent mean
    /// more than five points below the older mean is improving
    /// alertness; more than five above is declining.
    pub fn classify(&self) -> Trend {
        if self.history.len() < WINDOW {
            return Trend::Stable;
        }

        let scores: Vec<f64> = self.history.iter().copied().collect();
        let recent = &scores[scores.len() - WINDOW..];
        let older_start = scores.len().saturating_sub(2 * WINDOW);
        let older = &scores[older_start..scores.len() - WINDOW];

        if older.is_empty() {
            return Trend::Stable;
        }

        let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
        let diff = mean(recent) - mean(older);

        if diff < -TREND_DEADBAND {
            Trend::Improving
        } else if diff > TREND_DEADBAND {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    /// Clear the history
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
