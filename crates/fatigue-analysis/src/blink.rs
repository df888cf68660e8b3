//! Blink tracking over a sliding window

use std::collections::VecDeque;

/// Stateful blink tracker
///
/// Records debounced blink events and reports the count inside the
/// trailing window directly as a per-minute rate (the window is 60
/// seconds). Owned by exactly one session.
#[derive(Debug)]
pub struct BlinkTracker {
    history: VecDeque<u64>,
    debounce_ms: u64,
    window_ms: u64,
}

impl BlinkTracker {
    pub fn new(debounce_ms: u64, window_ms: u64) -> Self {
        Self {
            history: VecDeque::new(),
            debounce_ms,
            window_ms,
        }
    }

    /// Feed one frame's blink state
    ///
    /// A blink event is recorded when `is_blinking` holds and at least
    /// the debounce gap has passed since the last recorded blink, so a
    /// prolonged closure counts once. Entries older than the window
    /// are pruned relative to `now_ms` on every call.
    pub fn update(&mut self, is_blinking: bool, now_ms: u64) {
        if is_blinking {
            let debounced = self
                .history
                .back()
                .map(|&last| now_ms.saturating_sub(last) >= self.debounce_ms)
                .unwrap_or(true);
            if debounced {
                self.history.push_back(now_ms);
            }
        }

        let cutoff = now_ms.saturating_sub(self.window_ms);
        while let Some(&front) = self.history.front() {
            if front < cutoff {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Blinks observed in the trailing window, as per-minute rate
    pub fn blink_rate(&self) -> f64 {
        self.history.len() as f64
    }

    /// Clear all recorded blinks
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> BlinkTracker {
        BlinkTracker::new(200, 60_000)
    }

    #[test]
    fn test_debounce_suppresses_close_blinks() {
        let mut t = tracker();
        t.update(true, 0);
        t.update(true, 150);
        assert_eq!(t.blink_rate(), 1.0);
    }

    #[test]
    fn test_debounce_allows_spaced_blinks() {
        let mut t = tracker();
        t.update(true, 0);
        t.update(true, 250);
        assert_eq!(t.blink_rate(), 2.0);
    }

    #[test]
    fn test_non_blinking_frames_record_nothing() {
        let mut t = tracker();
        t.update(false, 0);
        t.update(false, 500);
        assert_eq!(t.blink_rate(), 0.0);
    }

    #[test]
    fn test_window_pruning() {
        let mut t = tracker();
        t.update(true, 0);
        t.update(true, 1_000);
        assert_eq!(t.blink_rate(), 2.0);

        // Advance past the window with no new blinks
        t.update(false, 62_000);
        assert_eq!(t.blink_rate(), 0.0);
    }

    #[test]
    fn test_pruning_keeps_recent_entries() {
        let mut t = tracker();
        t.update(true, 0);
        t.update(true, 30_000);
        t.update(true, 59_000);
        // At t=61s the t=0 blink ages out, the others stay
        t.update(false, 61_000);
        assert_eq!(t.blink_rate(), 2.0);
    }

    #[test]
    fn test_reset() {
        let mut t = tracker();
        t.update(true, 0);
        t.reset();
        assert_eq!(t.blink_rate(), 0.0);
    }
}
