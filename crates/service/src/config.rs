//! Service configuration

use anyhow::Result;
use serde::Deserialize;

/// Screening service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Path to the serialized classifier artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// API server port for assessments, health and metrics
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bound on a single inference call in milliseconds
    #[serde(default = "default_inference_timeout_ms")]
    pub inference_timeout_ms: u64,
}

fn default_model_path() -> String {
    std::env::var("SCREENING_MODEL_PATH").unwrap_or_else(|_| "diabetes_model.onnx".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_inference_timeout_ms() -> u64 {
    100
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("SCREENING"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServiceConfig {
            model_path: default_model_path(),
            api_port: default_api_port(),
            inference_timeout_ms: default_inference_timeout_ms(),
        }))
    }
}
