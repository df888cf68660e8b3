//! Per-session analysis pipeline
//!
//! A [`SessionAnalyzer`] owns the mutable state for one analysis
//! session (blink history, score history) and turns each detected
//! landmark set into an immutable [`FrameResult`]. Sessions must not
//! share analyzers; construct one per session and drop it at session
//! end.

use crate::blink::BlinkTracker;
use crate::config::AnalyzerConfig;
use crate::metrics::{self, FrameMetrics};
use crate::recommend::recommend;
use crate::scorer::{fatigue_score, needs_rest, needs_sleep};
use crate::trend::{Trend, TrendAnalyzer};

use face_landmarks::detector::LandmarkDetector;
use face_landmarks::frame::Frame;
use face_landmarks::point::FaceLandmarks;
use face_landmarks::LandmarkError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete analysis result for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResult {
    pub timestamp_ms: u64,
    pub face_detected: bool,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    pub metrics: FrameMetrics,
    /// Weighted fatigue score in [0, 100]
    pub fatigue_score: f64,
    pub needs_rest: bool,
    pub needs_sleep: bool,
    pub trend: Trend,
    /// Ordered human-readable suggestions
    pub recommendations: Vec<String>,
}

/// Stateful analyzer for one session
#[derive(Debug)]
pub struct SessionAnalyzer {
    config: AnalyzerConfig,
    blink: BlinkTracker,
    trend: TrendAnalyzer,
}

impl SessionAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let blink = BlinkTracker::new(config.blink_debounce_ms, config.blink_window_ms);
        let trend = TrendAnalyzer::new(config.trend_history_len);
        Self {
            config,
            blink,
            trend,
        }
    }

    /// Analyze one detected frame
    ///
    /// Callers must only pass frames where a face was detected;
    /// no-detection frames are absent from the session, never
    /// zero-valued.
    pub fn analyze(&mut self, landmarks: &FaceLandmarks, timestamp_ms: u64) -> FrameResult {
        let avg_ear = metrics::average_ear(landmarks);
        let is_blinking = avg_ear < self.config.blink_ear_threshold;
        self.blink.update(is_blinking, timestamp_ms);

        let frame_metrics = metrics::extract(landmarks, self.blink.blink_rate());
        let score = fatigue_score(&frame_metrics);

        self.trend.push(score);
        let trend = self.trend.classify();

        let recommendations = recommend(&frame_metrics, score);

        debug!(
            timestamp_ms,
            score,
            ear = frame_metrics.eye_aspect_ratio,
            blink_rate = frame_metrics.blink_rate,
            ?trend,
            "analyzed frame"
        );

        FrameResult {
            timestamp_ms,
            face_detected: true,
            confidence: landmarks.confidence(),
            metrics: frame_metrics,
            fatigue_score: score,
            needs_rest: needs_rest(score),
            needs_sleep: needs_sleep(score),
            trend,
            recommendations,
        }
    }

    /// Clear all session state
    pub fn reset(&mut self) {
        self.blink.reset();
        self.trend.reset();
    }
}

/// Drive a detector over a sequence of capture frames
///
/// Frames where no face is detected are skipped entirely, matching the
/// capture contract. Returns the per-frame results in order.
pub fn analyze_capture<D: LandmarkDetector>(
    detector: &mut D,
    frames: &[Frame],
    analyzer: &mut SessionAnalyzer,
) -> Result<Vec<FrameResult>, LandmarkError> {
    let mut results = Vec::with_capacity(frames.len());
    for frame in frames {
        match detector.detect(frame)? {
            Some(landmarks) => results.push(analyzer.analyze(&landmarks, frame.timestamp_ms)),
            None => debug!(seq = frame.sequence, "no face detected, skipping frame"),
        }
    }
    Ok(results)
}
