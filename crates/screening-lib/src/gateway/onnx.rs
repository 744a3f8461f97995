//! ONNX classifier inference using tract
//!
//! Wraps the externally trained diabetes classifier behind the
//! [`RiskModel`] contract. The model is parsed and optimized once at load
//! and the resulting plan is read-only thereafter.

use super::{ModelArtifact, RiskModel};
use crate::error::ScreeningError;
use crate::models::{FeatureVector, Prediction, RiskLabel, NUM_FEATURES};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Decision threshold on the positive-class probability
const POSITIVE_THRESHOLD: f32 = 0.5;

/// Maximum inference latency before warning
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// tract-backed gateway to the serialized classifier
#[derive(Debug)]
pub struct OnnxGateway {
    model: Option<TractModel>,
    version: String,
    source: String,
    inference_count: AtomicU64,
}

impl OnnxGateway {
    /// Load the classifier artifact from disk and compile it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScreeningError> {
        let artifact = ModelArtifact::open(&path)?;
        let model = Self::compile(artifact.bytes(), &artifact)?;

        Ok(Self {
            model: Some(model),
            version: format!("sha256:{}", &artifact.checksum()[..12]),
            source: artifact.path().display().to_string(),
            inference_count: AtomicU64::new(0),
        })
    }

    /// Create a gateway that has no model behind it
    ///
    /// Used for graceful startup when the artifact is absent: every
    /// `predict` fails with `ModelUnavailable` naming the expected path.
    /// There is no fallback prediction.
    pub fn unloaded(expected_path: impl AsRef<Path>) -> Self {
        Self {
            model: None,
            version: "unloaded".to_string(),
            source: expected_path.as_ref().display().to_string(),
            inference_count: AtomicU64::new(0),
        }
    }

    fn compile(bytes: &[u8], artifact: &ModelArtifact) -> Result<TractModel, ScreeningError> {
        tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(bytes))
            .and_then(|m| m.with_input_fact(0, f32::fact([1, NUM_FEATURES]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| {
                ScreeningError::model_unavailable(format!(
                    "failed to load classifier {}: {}",
                    artifact.path().display(),
                    e
                ))
            })
    }

    fn features_to_tensor(&self, features: &FeatureVector) -> Tensor {
        let data: Vec<f32> = features.as_array().to_vec();
        tract_ndarray::Array2::from_shape_vec((1, NUM_FEATURES), data)
            .expect("feature array has the fixed length")
            .into()
    }

    /// Read the positive-class probability out of the model output
    ///
    /// Binary classifiers exported to ONNX emit either a two-class
    /// probability tensor or a single positive-class score.
    fn output_to_prediction(&self, output: &Tensor) -> Result<Prediction, ScreeningError> {
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| ScreeningError::inference(format!("unreadable model output: {}", e)))?;
        let values: Vec<f32> = view.iter().copied().collect();

        let positive_probability = match values.len() {
            0 => {
                return Err(ScreeningError::inference(
                    "model produced an empty output tensor",
                ))
            }
            1 => values[0],
            _ => values[1],
        };

        if !positive_probability.is_finite() {
            return Err(ScreeningError::inference(format!(
                "model produced a non-finite probability: {}",
                positive_probability
            )));
        }

        let positive_probability = positive_probability.clamp(0.0, 1.0);
        let label = if positive_probability >= POSITIVE_THRESHOLD {
            RiskLabel::Positive
        } else {
            RiskLabel::Negative
        };

        Ok(Prediction {
            label,
            positive_probability,
        })
    }

    /// Total predictions served since load
    pub fn inference_count(&self) -> u64 {
        self.inference_count.load(Ordering::Relaxed)
    }
}

impl RiskModel for OnnxGateway {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ScreeningError> {
        let model = self.model.as_ref().ok_or_else(|| {
            ScreeningError::model_unavailable(format!("model file not found: {}", self.source))
        })?;

        let start = Instant::now();
        let input = self.features_to_tensor(features);

        let result = model
            .run(tvec!(input.into()))
            .map_err(|e| ScreeningError::inference(format!("classifier run failed: {}", e)))?;
        let output = result
            .first()
            .ok_or_else(|| ScreeningError::inference("no output from classifier"))?;

        let prediction = self.output_to_prediction(output)?;

        let elapsed = start.elapsed();
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                elapsed_ms = elapsed.as_millis(),
                "Inference exceeded {}ms target", MAX_INFERENCE_MS
            );
        } else {
            debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
        }

        Ok(prediction)
    }

    fn version(&self) -> String {
        self.version.clone()
    }
}
