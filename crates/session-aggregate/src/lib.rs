//! Session Aggregation
//!
//! Combines the per-frame results of one recording session into a
//! single session-level result: continuous metrics are averaged,
//! boolean indicators are majority-voted, recommendations are unioned
//! in first-seen order, and the trend is carried from the most recent
//! frame.

use fatigue_analysis::metrics::{DrowsinessIndicators, HeadPose, SkinAnalysis};
use fatigue_analysis::scorer::{needs_rest, needs_sleep};
use fatigue_analysis::session::FrameResult;
use fatigue_analysis::trend::Trend;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Aggregation error types
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Aggregation over zero samples is undefined and must never
    /// silently default.
    #[error("cannot aggregate an empty frame list")]
    EmptyInput,
}

/// Aggregate result for one recording session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub frame_count: usize,
    /// Mean fatigue score in [0, 100]
    pub fatigue_score: f64,
    /// Mean detection confidence in [0, 1]
    pub confidence: f64,
    pub eye_aspect_ratio: f64,
    pub blink_rate: f64,
    pub eye_strain: f64,
    pub facial_tension: f64,
    pub head_pose: HeadPose,
    pub skin_analysis: SkinAnalysis,
    /// Majority-voted indicators (true when strictly more than half
    /// of the frames flagged them)
    pub drowsiness_indicators: DrowsinessIndicators,
    /// Recomputed from the aggregated score, not averaged from frames
    pub needs_rest: bool,
    pub needs_sleep: bool,
    /// Carried verbatim from the most recent frame
    pub trend: Trend,
    /// Distinct recommendations across all frames, first-seen order
    pub recommendations: Vec<String>,
}

/// True when strictly more than half of the frames satisfy the flag
fn majority(frames: &[FrameResult], flag: impl Fn(&FrameResult) -> bool) -> bool {
    let votes = frames.iter().filter(|f| flag(f)).count();
    votes * 2 > frames.len()
}

fn mean(frames: &[FrameResult], value: impl Fn(&FrameResult) -> f64) -> f64 {
    frames.iter().map(value).sum::<f64>() / frames.len() as f64
}

/// Combine a session's frame results into one [`SessionResult`]
pub fn aggregate(frames: &[FrameResult]) -> Result<SessionResult, AggregateError> {
    let last = frames.last().ok_or(AggregateError::EmptyInput)?;

    let fatigue_score = mean(frames, |f| f.fatigue_score);

    let mut recommendations: Vec<String> = Vec::new();
    for frame in frames {
        for rec in &frame.recommendations {
            if !recommendations.iter().any(|seen| seen == rec) {
                recommendations.push(rec.clone());
            }
        }
    }

    let result = SessionResult {
        frame_count: frames.len(),
        fatigue_score,
        confidence: mean(frames, |f| f.confidence),
        eye_aspect_ratio: mean(frames, |f| f.metrics.eye_aspect_ratio),
        blink_rate: mean(frames, |f| f.metrics.blink_rate),
        eye_strain: mean(frames, |f| f.metrics.eye_strain),
        facial_tension: mean(frames, |f| f.metrics.facial_tension),
        head_pose: HeadPose {
            pitch: mean(frames, |f| f.metrics.head_pose.pitch),
            yaw: mean(frames, |f| f.metrics.head_pose.yaw),
            roll: mean(frames, |f| f.metrics.head_pose.roll),
        },
        skin_analysis: SkinAnalysis {
            pallor: mean(frames, |f| f.metrics.skin_analysis.pallor),
            darkness: mean(frames, |f| f.metrics.skin_analysis.darkness),
        },
        drowsiness_indicators: DrowsinessIndicators {
            heavy_eyelids: majority(frames, |f| f.metrics.drowsiness_indicators.heavy_eyelids),
            slow_blinks: majority(frames, |f| f.metrics.drowsiness_indicators.slow_blinks),
            head_dropping: majority(frames, |f| f.metrics.drowsiness_indicators.head_dropping),
            reduced_facial_expression: majority(frames, |f| {
                f.metrics.drowsiness_indicators.reduced_facial_expression
            }),
        },
        needs_rest: needs_rest(fatigue_score),
        needs_sleep: needs_sleep(fatigue_score),
        trend: last.trend,
        recommendations,
    };

    debug!(
        frame_count = result.frame_count,
        fatigue_score = result.fatigue_score,
        ?result.trend,
        "aggregated session"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatigue_analysis::metrics::FrameMetrics;

    fn frame(score: f64, trend: Trend, recs: &[&str]) -> FrameResult {
        FrameResult {
            timestamp_ms: 0,
            face_detected: true,
            confidence: 0.9,
            metrics: FrameMetrics::default(),
            fatigue_score: score,
            needs_rest: score > 60.0,
            needs_sleep: score > 80.0,
            trend,
            recommendations: recs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn frame_with_eyelids(heavy: bool) -> FrameResult {
        let mut f = frame(50.0, Trend::Stable, &[]);
        f.metrics.drowsiness_indicators.heavy_eyelids = heavy;
        f
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(aggregate(&[]), Err(AggregateError::EmptyInput)));
    }

    #[test]
    fn test_score_mean_and_rest_flags() {
        let frames = [
            frame(40.0, Trend::Stable, &[]),
            frame(80.0, Trend::Stable, &[]),
        ];
        let session = aggregate(&frames).unwrap();
        assert!((session.fatigue_score - 60.0).abs() < 1e-9);
        // Exactly 60 is not strictly above the rest threshold
        assert!(!session.needs_rest);
        assert!(!session.needs_sleep);
    }

    #[test]
    fn test_rest_recomputed_from_aggregate_score() {
        // Neither frame needs rest on its own terms here, but the mean does
        let frames = [
            frame(55.0, Trend::Stable, &[]),
            frame(70.0, Trend::Stable, &[]),
        ];
        let session = aggregate(&frames).unwrap();
        assert!(session.needs_rest);
        assert!(!session.needs_sleep);
    }

    #[test]
    fn test_boolean_majority_two_of_three() {
        let frames = [
            frame_with_eyelids(true),
            frame_with_eyelids(true),
            frame_with_eyelids(false),
        ];
        assert!(aggregate(&frames).unwrap().drowsiness_indicators.heavy_eyelids);
    }

    #[test]
    fn test_boolean_majority_one_of_three() {
        let frames = [
            frame_with_eyelids(true),
            frame_with_eyelids(false),
            frame_with_eyelids(false),
        ];
        assert!(!aggregate(&frames).unwrap().drowsiness_indicators.heavy_eyelids);
    }

    #[test]
    fn test_exact_half_is_not_a_majority() {
        let frames = [frame_with_eyelids(true), frame_with_eyelids(false)];
        assert!(!aggregate(&frames).unwrap().drowsiness_indicators.heavy_eyelids);
    }

    #[test]
    fn test_trend_taken_from_last_frame() {
        let frames = [
            frame(50.0, Trend::Declining, &[]),
            frame(50.0, Trend::Improving, &[]),
        ];
        assert_eq!(aggregate(&frames).unwrap().trend, Trend::Improving);
    }

    #[test]
    fn test_recommendation_union_first_seen_order() {
        let frames = [
            frame(50.0, Trend::Stable, &["take a break", "blink more"]),
            frame(50.0, Trend::Stable, &["blink more", "check posture"]),
        ];
        let session = aggregate(&frames).unwrap();
        assert_eq!(
            session.recommendations,
            vec!["take a break", "blink more", "check posture"]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_aggregate_score_within_input_range(
                scores in prop::collection::vec(0.0f64..=100.0, 1..50),
            ) {
                let frames: Vec<FrameResult> = scores
                    .iter()
                    .map(|&s| frame(s, Trend::Stable, &[]))
                    .collect();
                let session = aggregate(&frames).unwrap();

                let min = scores.iter().cloned().fold(f64::MAX, f64::min);
                let max = scores.iter().cloned().fold(f64::MIN, f64::max);
                prop_assert!(session.fatigue_score >= min - 1e-9);
                prop_assert!(session.fatigue_score <= max + 1e-9);

                if session.needs_sleep {
                    prop_assert!(session.needs_rest);
                }
            }
        }
    }

    #[test]
    fn test_single_frame_session() {
        let frames = [frame(85.0, Trend::Declining, &["nap now"])];
        let session = aggregate(&frames).unwrap();
        assert_eq!(session.frame_count, 1);
        assert!(session.needs_rest);
        assert!(session.needs_sleep);
        assert_eq!(session.trend, Trend::Declining);
        assert_eq!(session.recommendations, vec!["nap now"]);
    }
}
