//! Video frame value type supplied by the capture collaborator

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (milliseconds)
    pub timestamp_ms: u64,
    /// Frame sequence number within the session
    pub sequence: u32,
}

impl Frame {
    /// Create a new frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ms: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ms,
            sequence,
        }
    }

    /// Get pixel at (x, y)
    ///
    /// Returns `None` when the coordinate is out of bounds or the
    /// buffer is shorter than the declared dimensions imply.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.data.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Whether the buffer length matches the declared dimensions
    pub fn is_well_formed(&self) -> bool {
        self.data.len() as u64 == self.width as u64 * self.height as u64 * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_pixel_in_bounds() {
        let frame = Frame::new(vec![0u8; 2 * 2 * 3], 2, 2, 0, 0);
        assert_eq!(frame.get_pixel(1, 1), Some([0, 0, 0]));
        assert_eq!(frame.get_pixel(2, 0), None);
    }

    #[test]
    fn test_get_pixel_short_buffer_is_none() {
        // Declared 2x2 but only one pixel of data present
        let frame = Frame::new(vec![0u8; 3], 2, 2, 0, 0);
        assert_eq!(frame.get_pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(frame.get_pixel(1, 1), None);
    }

    #[test]
    fn test_well_formed() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 0, 0);
        assert!(frame.is_well_formed());
        let bad = Frame::new(vec![0u8; 11], 2, 2, 0, 0);
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn test_well_formed_huge_dimensions_no_overflow() {
        // 65536 * 65536 * 3 wraps to 0 in 32-bit arithmetic; an empty
        // buffer must still be rejected
        let frame = Frame::new(Vec::new(), 65_536, 65_536, 0, 0);
        assert!(!frame.is_well_formed());
    }
}
