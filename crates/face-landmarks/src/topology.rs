//! Fixed 68-point landmark topology
//!
//! Index layout follows the common 68-point annotation scheme:
//! jawline 0-16, brows 17-26, nose 27-35, right eye 36-41,
//! left eye 42-47, mouth 48-67. All extraction code addresses points
//! through these constants rather than raw indices.

/// Total number of points in a complete landmark set
pub const LANDMARK_COUNT: usize = 68;

/// Right eye contour: outer corner, two upper-lid points, inner
/// corner, two lower-lid points
pub const RIGHT_EYE: [usize; 6] = [36, 37, 38, 39, 40, 41];

/// Left eye contour, same ordering as [`RIGHT_EYE`]
pub const LEFT_EYE: [usize; 6] = [42, 43, 44, 45, 46, 47];

/// Nose tip reference point
pub const NOSE_TIP: usize = 30;

/// Chin reference point (bottom of the jawline arc)
pub const CHIN: usize = 8;

/// Brow points, used as the forehead-region proxy for tension
pub const BROWS: [usize; 10] = [17, 18, 19, 20, 21, 22, 23, 24, 25, 26];

/// Jawline points
pub const JAW: [usize; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

/// Outer mouth contour points
pub const MOUTH: [usize; 12] = [48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59];

/// Indices contributing to the facial-tension dispersion measure
/// (forehead proxy + jaw + mouth)
pub fn tension_indices() -> impl Iterator<Item = usize> {
    BROWS
        .into_iter()
        .chain(JAW.into_iter())
        .chain(MOUTH.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_indices_within_topology() {
        for idx in RIGHT_EYE.into_iter().chain(LEFT_EYE.into_iter()) {
            assert!(idx < LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_tension_indices_distinct() {
        let mut seen = std::collections::HashSet::new();
        for idx in tension_indices() {
            assert!(idx < LANDMARK_COUNT);
            assert!(seen.insert(idx), "duplicate tension index {idx}");
        }
        assert_eq!(seen.len(), BROWS.len() + JAW.len() + MOUTH.len());
    }
}
