//! Weighted fatigue scoring

use crate::metrics::FrameMetrics;

/// Score above which a rest break is advised
pub const REST_THRESHOLD: f64 = 60.0;

/// Score above which sleep is advised
pub const SLEEP_THRESHOLD: f64 = 80.0;

const EAR_WEIGHT: f64 = 0.30;
const BLINK_WEIGHT: f64 = 0.20;
const STRAIN_WEIGHT: f64 = 0.20;
const TENSION_WEIGHT: f64 = 0.15;
const POSE_WEIGHT: f64 = 0.15;

/// Combine one frame's metrics into a 0-100 fatigue score
///
/// Sub-scores:
/// - EAR: max(0, (0.3 - ear) * 300), saturating as eyes close
/// - Blink: a flat 80 below 10/min, otherwise max(0, (30 - rate) * 2).
///   The jump at exactly 10/min is intentional and pinned by tests.
/// - Strain: eye strain used as-is (already 0-100)
/// - Tension: 100 - facial tension
/// - Pose: pitch * 3, unbounded until the final clamp
///
/// The weighted sum is clamped to [0, 100] here; callers never need to
/// re-clamp.
pub fn fatigue_score(metrics: &FrameMetrics) -> f64 {
    let ear_fatigue = ((0.3 - metrics.eye_aspect_ratio) * 300.0).max(0.0);

    let blink_fatigue = if metrics.blink_rate < 10.0 {
        80.0
    } else {
        ((30.0 - metrics.blink_rate) * 2.0).max(0.0)
    };

    let strain_fatigue = metrics.eye_strain;
    let tension_fatigue = 100.0 - metrics.facial_tension;
    let pose_fatigue = metrics.head_pose.pitch * 3.0;

    let score = EAR_WEIGHT * ear_fatigue
        + BLINK_WEIGHT * blink_fatigue
        + STRAIN_WEIGHT * strain_fatigue
        + TENSION_WEIGHT * tension_fatigue
        + POSE_WEIGHT * pose_fatigue;

    score.clamp(0.0, 100.0)
}

/// Whether a score calls for a rest break (strictly above 60)
pub fn needs_rest(score: f64) -> bool {
    score > REST_THRESHOLD
}

/// Whether a score calls for sleep (strictly above 80)
pub fn needs_sleep(score: f64) -> bool {
    score > SLEEP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{DrowsinessIndicators, HeadPose, SkinAnalysis};
    use proptest::prelude::*;

    fn metrics(ear: f64, blink_rate: f64, strain: f64, tension: f64, pitch: f64) -> FrameMetrics {
        FrameMetrics {
            eye_aspect_ratio: ear,
            blink_rate,
            eye_strain: strain,
            facial_tension: tension,
            head_pose: HeadPose {
                pitch,
                yaw: 0.0,
                roll: 0.0,
            },
            skin_analysis: SkinAnalysis::default(),
            drowsiness_indicators: DrowsinessIndicators::default(),
        }
    }

    #[test]
    fn test_alert_face_scores_low() {
        // Wide-open eyes, healthy blink rate, relaxed but mobile face
        let m = metrics(0.32, 16.0, 10.0, 80.0, 2.0);
        let score = fatigue_score(&m);
        assert!(score < 40.0, "got {score}");
        assert!(!needs_rest(score));
    }

    #[test]
    fn test_closed_eyes_saturate_ear_component() {
        let m = metrics(0.0, 16.0, 0.0, 100.0, 0.0);
        // EAR component alone contributes 0.30 * 90 = 27
        let score = fatigue_score(&m);
        assert!((score - (0.30 * 90.0 + 0.20 * 28.0)).abs() < 1e-9);
    }

    #[test]
    fn test_blink_discontinuity_at_ten() {
        let below = fatigue_score(&metrics(0.3, 9.999, 0.0, 100.0, 0.0));
        let at = fatigue_score(&metrics(0.3, 10.0, 0.0, 100.0, 0.0));
        // Just below 10/min: flat 80 component. At 10/min: (30-10)*2 = 40.
        assert!((below - 0.20 * 80.0).abs() < 1e-9);
        assert!((at - 0.20 * 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_blink_component_clamped() {
        // 40/min would give a negative formula value; clamps to zero
        let score = fatigue_score(&metrics(0.3, 40.0, 0.0, 100.0, 0.0));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_extreme_pitch_clamped_to_hundred() {
        let score = fatigue_score(&metrics(0.0, 0.0, 100.0, 0.0, 5_000.0));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_rest_and_sleep_boundaries_strict() {
        assert!(!needs_rest(60.0));
        assert!(needs_rest(60.001));
        assert!(!needs_sleep(80.0));
        assert!(needs_sleep(80.001));
    }

    proptest! {
        #[test]
        fn prop_score_always_in_range(
            ear in -10.0f64..10.0,
            rate in -5.0f64..200.0,
            strain in -50.0f64..150.0,
            tension in -50.0f64..150.0,
            pitch in -2000.0f64..2000.0,
        ) {
            let score = fatigue_score(&metrics(ear, rate, strain, tension, pitch));
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_needs_sleep_implies_needs_rest(score in 0.0f64..=100.0) {
            if needs_sleep(score) {
                prop_assert!(needs_rest(score));
            }
        }
    }
}
