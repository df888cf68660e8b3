//! Landmark detector capability
//!
//! The analysis core never talks to a camera or a model directly; it
//! consumes [`FaceLandmarks`] produced by a [`LandmarkDetector`]. Two
//! implementations are provided: a deterministic fixture detector for
//! tests and demos, and an ONNX-backed detector for real models. The
//! analysis path contains no randomness in either case.

use crate::frame::Frame;
use crate::point::{FaceLandmarks, LandmarkPoint};
use crate::topology::LANDMARK_COUNT;
use crate::LandmarkError;

use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Path to an ONNX landmark model
    pub model_path: Option<String>,

    /// Minimum face score for a detection to be reported
    pub confidence_threshold: f64,

    /// Model input resolution (square)
    pub input_size: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            confidence_threshold: 0.6,
            input_size: 192,
        }
    }
}

/// Capability interface: turn one frame into a landmark set
///
/// Returns `Ok(None)` when no face clears the confidence threshold.
/// Callers must treat a no-detection frame as absent, never as a
/// zero-valued landmark set.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<FaceLandmarks>, LandmarkError>;
}

/// Deterministic detector that replays a pre-built landmark sequence
///
/// Used in tests and demo mode. Frames beyond the scripted sequence
/// report no detection.
pub struct FixtureDetector {
    script: Vec<Option<FaceLandmarks>>,
    cursor: usize,
}

impl FixtureDetector {
    pub fn new(script: Vec<Option<FaceLandmarks>>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Remaining scripted detections
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl LandmarkDetector for FixtureDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<FaceLandmarks>, LandmarkError> {
        let next = self.script.get(self.cursor).cloned().flatten();
        self.cursor += 1;
        Ok(next)
    }
}

/// ONNX-backed landmark detector
///
/// Expects a model producing a flat tensor of `1 + 2 * 68` values per
/// frame: a face score followed by 68 (x, y) pairs normalized to
/// [0, 1] in input-image coordinates.
#[derive(Debug)]
pub struct OnnxDetector {
    session: Session,
    config: DetectorConfig,
}

impl OnnxDetector {
    /// Load the model named in `config`. A missing model path is a
    /// configuration error here; callers wanting a model-free setup
    /// should use [`FixtureDetector`].
    pub fn new(config: DetectorConfig) -> Result<Self, LandmarkError> {
        let path = config
            .model_path
            .as_deref()
            .ok_or_else(|| LandmarkError::ModelLoad("no model path configured".to_string()))?;

        info!("Loading landmark model from {}", path);

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| LandmarkError::ModelLoad(e.to_string()))?;

        Ok(Self { session, config })
    }

    /// Resize and normalize the frame into a 1x3xNxN tensor
    fn preprocess(&self, frame: &Frame) -> Result<Array4<f32>, LandmarkError> {
        let img = image::ImageBuffer::<image::Rgb<u8>, _>::from_raw(
            frame.width,
            frame.height,
            frame.data.as_slice(),
        )
        .ok_or_else(|| {
            LandmarkError::ImageProcessing("frame buffer does not match dimensions".to_string())
        })?;

        let size = self.config.input_size;
        let resized =
            image::imageops::resize(&img, size, size, image::imageops::FilterType::Triangle);

        let mut input = Array4::<f32>::zeros((1, 3, size as usize, size as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }
        Ok(input)
    }

    /// Map flat model output back to frame coordinates
    fn postprocess(
        &self,
        values: &[f32],
        frame: &Frame,
    ) -> Result<Option<FaceLandmarks>, LandmarkError> {
        let expected = 1 + 2 * LANDMARK_COUNT;
        if values.len() < expected {
            return Err(LandmarkError::MalformedOutput(format!(
                "expected {} values, got {}",
                expected,
                values.len()
            )));
        }

        let score = values[0] as f64;
        if score < self.config.confidence_threshold {
            debug!("Face score {:.3} below threshold, reporting no detection", score);
            return Ok(None);
        }

        let points: Vec<LandmarkPoint> = values[1..expected]
            .chunks_exact(2)
            .map(|pair| {
                LandmarkPoint::new(
                    pair[0] as f64 * frame.width as f64,
                    pair[1] as f64 * frame.height as f64,
                )
            })
            .collect();

        Ok(Some(FaceLandmarks::new(points, score)))
    }
}

impl LandmarkDetector for OnnxDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<FaceLandmarks>, LandmarkError> {
        if !frame.is_well_formed() {
            warn!(
                "Dropping malformed frame seq={} ({}x{}, {} bytes)",
                frame.sequence,
                frame.width,
                frame.height,
                frame.data.len()
            );
            return Err(LandmarkError::ImageProcessing(
                "frame buffer does not match dimensions".to_string(),
            ));
        }

        let input = self.preprocess(frame)?;

        let outputs = self
            .session
            .run(ort::inputs![input].map_err(|e| LandmarkError::Inference(e.to_string()))?)
            .map_err(|e| LandmarkError::Inference(e.to_string()))?;

        let tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| LandmarkError::Inference(e.to_string()))?;
        let values: Vec<f32> = tensor.iter().copied().collect();

        self.postprocess(&values, frame)
    }
}
