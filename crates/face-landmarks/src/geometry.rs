//! Geometric statistics over landmark point sets

use crate::point::LandmarkPoint;

/// Centroid of a point set, or `None` for an empty set
pub fn centroid(points: &[LandmarkPoint]) -> Option<LandmarkPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Some(LandmarkPoint::new(sum_x / n, sum_y / n))
}

/// Geometric dispersion: standard deviation of each point's Euclidean
/// distance from the set centroid.
///
/// Used as a crude proxy for facial movement and tension. Returns 0.0
/// for sets with fewer than two points, where deviation is undefined.
pub fn dispersion(points: &[LandmarkPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let center = match centroid(points) {
        Some(c) => c,
        None => return 0.0,
    };

    let n = points.len() as f64;
    let distances: Vec<f64> = points.iter().map(|p| p.distance(&center)).collect();
    let mean = distances.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    for d in &distances {
        let delta = d - mean;
        m2 += delta * delta;
    }

    (m2 / n).sqrt()
}
