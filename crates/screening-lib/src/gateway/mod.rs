//! Model gateway: the boundary call to the externally trained classifier

mod artifact;
mod onnx;

pub use artifact::ModelArtifact;
pub use onnx::OnnxGateway;

use crate::error::ScreeningError;
use crate::models::{FeatureVector, Prediction};

/// Boundary contract for the pre-trained risk classifier
///
/// Implementations must be safe for concurrent read-only use; the loaded
/// model is never mutated after startup.
pub trait RiskModel: Send + Sync {
    /// Run the classifier on an assembled feature vector
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ScreeningError>;

    /// Version string of the loaded model
    fn version(&self) -> String;
}
