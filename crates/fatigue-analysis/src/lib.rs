//! Fatigue Analysis Engine
//!
//! Deterministic numeric pipeline from per-frame facial landmarks to a
//! fatigue assessment:
//! - Metric extraction (EAR, strain, tension, head pose, skin proxy)
//! - Blink rate tracking over a sliding window
//! - Weighted fatigue scoring with rest/sleep thresholds
//! - Rolling trend classification
//! - Threshold-driven recommendations
//!
//! All state is per-session: construct one [`SessionAnalyzer`] per
//! analysis session and never share it across sessions.

pub mod blink;
pub mod config;
pub mod metrics;
pub mod recommend;
pub mod scorer;
pub mod session;
pub mod trend;

pub use blink::BlinkTracker;
pub use config::AnalyzerConfig;
pub use metrics::{DrowsinessIndicators, FrameMetrics, HeadPose, SkinAnalysis};
pub use recommend::recommend;
pub use scorer::{fatigue_score, needs_rest, needs_sleep};
pub use session::{analyze_capture, FrameResult, SessionAnalyzer};
pub use trend::{Trend, TrendAnalyzer};
