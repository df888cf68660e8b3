//! Landmark point set types

use serde::{Deserialize, Serialize};

/// A single 2D facial landmark coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &LandmarkPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &LandmarkPoint) -> LandmarkPoint {
        LandmarkPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Ordered landmark set for one analyzed frame
///
/// Points are addressed by index into the fixed topology (see
/// [`crate::topology`]). A set may be partial: any index at or beyond
/// `points.len()` is treated as missing, and downstream metrics
/// degrade per their documented fallback rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<LandmarkPoint>,
    confidence: f64,
}

impl FaceLandmarks {
    /// Create a landmark set. Confidence is clamped to [0, 1] here so
    /// consumers never see an out-of-range value.
    pub fn new(points: Vec<LandmarkPoint>, confidence: f64) -> Self {
        Self {
            points,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Detection confidence in [0, 1]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Point at a topology index, if present
    pub fn point(&self, index: usize) -> Option<LandmarkPoint> {
        self.points.get(index).copied()
    }

    /// All points in the set
    pub fn all_points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Number of points present
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points at the given indices, with missing indices filtered out
    pub fn select(&self, indices: impl IntoIterator<Item = usize>) -> Vec<LandmarkPoint> {
        indices
            .into_iter()
            .filter_map(|idx| self.point(idx))
            .collect()
    }

    /// Points at all of the given indices, or `None` if any is missing
    pub fn select_all(&self, indices: &[usize]) -> Option<Vec<LandmarkPoint>> {
        indices.iter().map(|&idx| self.point(idx)).collect()
    }
}
