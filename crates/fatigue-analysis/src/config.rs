//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Per-session analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Average EAR below this counts as a blinking frame
    pub blink_ear_threshold: f64,

    /// Minimum gap between recorded blinks (milliseconds)
    pub blink_debounce_ms: u64,

    /// Sliding window for blink rate (milliseconds)
    pub blink_window_ms: u64,

    /// Number of fatigue scores retained for trend analysis
    pub trend_history_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            blink_ear_threshold: 0.25,
            blink_debounce_ms: 200,
            blink_window_ms: 60_000,
            trend_history_len: 30,
        }
    }
}

impl AnalyzerConfig {
    /// Strict preset: flags lighter eyelid closure as blinking
    pub fn strict() -> Self {
        Self {
            blink_ear_threshold: 0.28,
            blink_debounce_ms: 150,
            ..Default::default()
        }
    }

    /// Lenient preset: only pronounced closure counts
    pub fn lenient() -> Self {
        Self {
            blink_ear_threshold: 0.22,
            blink_debounce_ms: 250,
            ..Default::default()
        }
    }
}
