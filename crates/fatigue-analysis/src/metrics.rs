//! Per-frame metric extraction
//!
//! Converts one landmark set (plus the session's current blink rate)
//! into the primitive measurements the scorer consumes. Every output
//! is clamped to its documented range at the point of computation.

use face_landmarks::geometry::{centroid, dispersion};
use face_landmarks::point::{FaceLandmarks, LandmarkPoint};
use face_landmarks::topology;
use serde::{Deserialize, Serialize};

/// Neutral EAR assumed when an eye cannot be measured
pub const DEFAULT_EAR: f64 = 0.3;

/// Eye strain scale factor applied to eye-point dispersion
const EYE_STRAIN_SCALE: f64 = 50.0;

/// Facial tension scale factor applied to forehead/jaw/mouth dispersion
const TENSION_SCALE: f64 = 30.0;

/// Pallor scale factor applied to whole-face dispersion
const PALLOR_SCALE: f64 = 20.0;

/// Darkness scale factor applied to whole-face dispersion
const DARKNESS_SCALE: f64 = 15.0;

/// Average EAR below this indicates heavy eyelids
const HEAVY_EYELID_EAR: f64 = 0.2;

/// Blink rate (per minute) below this indicates slow blinking
const SLOW_BLINK_RATE: f64 = 10.0;

/// Pitch (degrees) above this indicates a dropping head
const HEAD_DROP_PITCH: f64 = 15.0;

/// Facial tension below this indicates reduced expression.
// TODO: facialTension is on a 0-100 scale but this threshold reads
// like a 0-1 value, so the indicator is effectively always false for
// any expressive face. Matches upstream behavior; product owners to
// confirm whether the intended threshold is 30.
const REDUCED_EXPRESSION_TENSION: f64 = 0.3;

/// Head pose Euler angles (degrees, absolute values)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Geometry-derived skin proxies (0-100)
///
/// These are placeholders computed from point dispersion, not from
/// pixel data; a real pallor/darkness measure needs image analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinAnalysis {
    pub pallor: f64,
    pub darkness: f64,
}

/// Boolean drowsiness indicators derived by thresholding metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrowsinessIndicators {
    pub heavy_eyelids: bool,
    pub slow_blinks: bool,
    pub head_dropping: bool,
    pub reduced_facial_expression: bool,
}

/// Primitive measurements for one analyzed frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// Average of left/right eye aspect ratios
    pub eye_aspect_ratio: f64,
    /// Blinks per minute
    pub blink_rate: f64,
    /// Normalized eye-point dispersion (0-100)
    pub eye_strain: f64,
    /// Normalized forehead/jaw/mouth dispersion (0-100)
    pub facial_tension: f64,
    pub head_pose: HeadPose,
    pub skin_analysis: SkinAnalysis,
    pub drowsiness_indicators: DrowsinessIndicators,
}

/// EAR for one eye from its 6 contour points
///
/// EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|) with p1/p4 the corners,
/// p2/p3 the upper lid, and p5/p6 the lower lid. Falls back to
/// [`DEFAULT_EAR`] when any of the 6 points is missing or the eye
/// width is degenerate.
pub fn eye_aspect_ratio(landmarks: &FaceLandmarks, eye: &[usize; 6]) -> f64 {
    let points = match landmarks.select_all(eye) {
        Some(points) => points,
        None => return DEFAULT_EAR,
    };

    let horizontal = points[0].distance(&points[3]);
    if horizontal < 1e-9 {
        return DEFAULT_EAR;
    }

    let vertical1 = points[1].distance(&points[5]);
    let vertical2 = points[2].distance(&points[4]);
    (vertical1 + vertical2) / (2.0 * horizontal)
}

/// Average of left and right EAR
pub fn average_ear(landmarks: &FaceLandmarks) -> f64 {
    let left = eye_aspect_ratio(landmarks, &topology::LEFT_EYE);
    let right = eye_aspect_ratio(landmarks, &topology::RIGHT_EYE);
    (left + right) / 2.0
}

/// Dispersion of a point set scaled to a 0-100 measure
fn scaled_dispersion(points: &[LandmarkPoint], scale: f64) -> f64 {
    (dispersion(points) * scale).min(100.0)
}

/// Centroid of one eye's contour, or `None` if any point is missing
fn eye_center(landmarks: &FaceLandmarks, eye: &[usize; 6]) -> Option<LandmarkPoint> {
    let points = landmarks.select_all(eye)?;
    centroid(&points)
}

/// Head pose from four reference points: nose tip, both eye centers,
/// and chin. Any missing reference yields the neutral pose rather
/// than a guess.
///
/// Angles are crude 2D proxies in image coordinates (y grows
/// downward): pitch from the eye-center-to-chin delta, yaw from the
/// eye-center-to-nose delta, roll from the left-to-right eye delta.
pub fn head_pose(landmarks: &FaceLandmarks) -> HeadPose {
    let nose = landmarks.point(topology::NOSE_TIP);
    let chin = landmarks.point(topology::CHIN);
    let left_eye = eye_center(landmarks, &topology::LEFT_EYE);
    let right_eye = eye_center(landmarks, &topology::RIGHT_EYE);

    let (nose, chin, left_eye, right_eye) = match (nose, chin, left_eye, right_eye) {
        (Some(n), Some(c), Some(l), Some(r)) => (n, c, l, r),
        _ => return HeadPose::default(),
    };

    let eye_mid = left_eye.midpoint(&right_eye);

    let pitch = (chin.x - eye_mid.x)
        .atan2(chin.y - eye_mid.y)
        .to_degrees()
        .abs();
    let yaw = (nose.x - eye_mid.x)
        .atan2(nose.y - eye_mid.y)
        .to_degrees()
        .abs();
    let roll = (right_eye.y - left_eye.y)
        .atan2(right_eye.x - left_eye.x)
        .to_degrees()
        .abs();

    HeadPose { pitch, yaw, roll }
}

/// Extract all per-frame metrics
///
/// `blink_rate` comes from the session's [`crate::BlinkTracker`],
/// which must be updated for this frame before extraction.
pub fn extract(landmarks: &FaceLandmarks, blink_rate: f64) -> FrameMetrics {
    let eye_aspect_ratio = average_ear(landmarks);

    // Combined left+right eye contour points; missing ones filtered
    let eye_points = landmarks.select(
        topology::LEFT_EYE
            .into_iter()
            .chain(topology::RIGHT_EYE.into_iter()),
    );
    let eye_strain = scaled_dispersion(&eye_points, EYE_STRAIN_SCALE);

    let tension_points = landmarks.select(topology::tension_indices());
    let facial_tension = scaled_dispersion(&tension_points, TENSION_SCALE);

    let head_pose = head_pose(landmarks);

    let all_points = landmarks.all_points();
    let skin_analysis = SkinAnalysis {
        pallor: scaled_dispersion(all_points, PALLOR_SCALE),
        darkness: scaled_dispersion(all_points, DARKNESS_SCALE),
    };

    let drowsiness_indicators = DrowsinessIndicators {
        heavy_eyelids: eye_aspect_ratio < HEAVY_EYELID_EAR,
        slow_blinks: blink_rate < SLOW_BLINK_RATE,
        head_dropping: head_pose.pitch > HEAD_DROP_PITCH,
        reduced_facial_expression: facial_tension < REDUCED_EXPRESSION_TENSION,
    };

    FrameMetrics {
        eye_aspect_ratio,
        blink_rate,
        eye_strain,
        facial_tension,
        head_pose,
        skin_analysis,
        drowsiness_indicators,
    }
}
