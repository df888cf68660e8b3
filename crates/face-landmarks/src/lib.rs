//! Facial Landmark Layer
//!
//! Data model and capability interface for per-frame facial landmarks:
//! - Fixed-topology 68-point landmark sets with stable indices
//! - Geometric statistics (centroid, dispersion)
//! - Pluggable detectors: deterministic fixture replay and ONNX inference

pub mod detector;
pub mod frame;
pub mod geometry;
pub mod point;
pub mod topology;

pub use detector::{DetectorConfig, FixtureDetector, LandmarkDetector, OnnxDetector};
pub use frame::Frame;
pub use point::{FaceLandmarks, LandmarkPoint};

use thiserror::Error;

/// Landmark layer error types
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Malformed landmark output: {0}")]
    MalformedOutput(String),
}
