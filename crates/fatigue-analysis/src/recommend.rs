//! Threshold-driven recommendation generation

use crate::metrics::FrameMetrics;
use crate::scorer::{REST_THRESHOLD, SLEEP_THRESHOLD};

const EYE_STRAIN_THRESHOLD: f64 = 60.0;
const LOW_BLINK_RATE: f64 = 10.0;
const PITCH_THRESHOLD: f64 = 15.0;

/// Build the ordered recommendation list for one frame
///
/// Rules fire in fixed priority order and all matching rules append.
/// The two score rules are mutually exclusive; the remaining rules are
/// independent. When nothing fires, a single positive message is
/// returned.
pub fn recommend(metrics: &FrameMetrics, score: f64) -> Vec<String> {
    let mut out = Vec::new();

    if score > SLEEP_THRESHOLD {
        out.push(
            "Severe fatigue detected: take a nap as soon as possible and avoid \
             operating vehicles or machinery."
                .to_string(),
        );
    } else if score > REST_THRESHOLD {
        out.push(
            "Elevated fatigue: take a short break and get some light activity."
                .to_string(),
        );
    }

    if metrics.eye_strain > EYE_STRAIN_THRESHOLD {
        out.push(
            "High eye strain: step away from the screen and follow the 20-20-20 \
             rule (every 20 minutes, look 20 feet away for 20 seconds)."
                .to_string(),
        );
    }

    if metrics.blink_rate < LOW_BLINK_RATE {
        out.push(
            "Low blink rate: blink consciously and consider lubricating eye drops."
                .to_string(),
        );
    }

    if metrics.head_pose.pitch > PITCH_THRESHOLD {
        out.push(
            "Head tilting detected: check your posture and screen ergonomics."
                .to_string(),
        );
    }

    if out.is_empty() {
        out.push("Alertness looks good. Keep up your current routine.".to_string());
    }

    out
}
