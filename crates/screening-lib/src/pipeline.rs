//! Risk classification pipeline
//!
//! Orchestrates one assessment: feature assembly, the bounded gateway
//! call, probability banding, and advisory status derivation. Errors
//! propagate to the caller unchanged; there is no fallback prediction and
//! no retry, since the classifier call is deterministic.

use crate::assembler;
use crate::error::ScreeningError;
use crate::gateway::RiskModel;
use crate::models::{
    Advisories, AgeFactor, BmiStatus, ClinicalInput, GlucoseStatus, RiskAssessment, RiskBand,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default bound on a single inference call
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_millis(100);

/// Everything one assessment produces, returned as an explicit value
///
/// Nothing here outlives the request/response cycle; the report
/// synthesizer and the presentation layer consume it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub assessment: RiskAssessment,
    pub band: RiskBand,
    pub advisories: Advisories,
    pub bmi: f32,
    pub model_version: String,
    pub duration_us: u64,
}

/// The risk classifier pipeline
pub struct RiskPipeline {
    gateway: Arc<dyn RiskModel>,
    inference_timeout: Duration,
}

impl RiskPipeline {
    pub fn new(gateway: Arc<dyn RiskModel>) -> Self {
        Self {
            gateway,
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    pub fn with_timeout(gateway: Arc<dyn RiskModel>, inference_timeout: Duration) -> Self {
        Self {
            gateway,
            inference_timeout,
        }
    }

    /// Assess one patient submission
    ///
    /// Validation failures, a missing model, and inference failures all
    /// surface untouched; an inference exceeding the configured timeout is
    /// classified as an inference failure.
    pub async fn assess(&self, input: &ClinicalInput) -> Result<ScreeningOutcome, ScreeningError> {
        let start = Instant::now();

        let features = assembler::assemble(input)?;
        let bmi = features.bmi;

        let gateway = Arc::clone(&self.gateway);
        let prediction = tokio::time::timeout(
            self.inference_timeout,
            tokio::task::spawn_blocking(move || gateway.predict(&features)),
        )
        .await
        .map_err(|_| {
            ScreeningError::inference(format!(
                "inference timed out after {}ms",
                self.inference_timeout.as_millis()
            ))
        })?
        .map_err(|e| ScreeningError::inference(format!("inference task failed: {}", e)))??;

        let probability_percent = prediction.positive_probability * 100.0;
        let assessment = RiskAssessment {
            label: prediction.label,
            probability_percent,
        };
        let band = RiskBand::from_percent(probability_percent);
        let advisories = Advisories {
            glucose_status: GlucoseStatus::from_mg_dl(input.glucose_mg_dl),
            bmi_status: BmiStatus::from_bmi(bmi),
            age_factor: AgeFactor::from_years(input.age_years),
        };

        let outcome = ScreeningOutcome {
            assessment,
            band,
            advisories,
            bmi,
            model_version: self.gateway.version(),
            duration_us: start.elapsed().as_micros() as u64,
        };

        debug!(
            patient_id = %input.patient_id,
            probability_percent = outcome.assessment.probability_percent,
            band = ?outcome.band,
            duration_us = outcome.duration_us,
            "Assessment completed"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::OnnxGateway;
    use crate::models::{FeatureVector, Prediction, RiskLabel};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Deterministic stand-in for the classifier
    struct StubModel {
        probability: f32,
        calls: AtomicU64,
        delay: Option<Duration>,
    }

    impl StubModel {
        fn returning(probability: f32) -> Self {
            Self {
                probability,
                calls: AtomicU64::new(0),
                delay: None,
            }
        }
    }

    impl RiskModel for StubModel {
        fn predict(&self, _features: &FeatureVector) -> Result<Prediction, ScreeningError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            let label = if self.probability >= 0.5 {
                RiskLabel::Positive
            } else {
                RiskLabel::Negative
            };
            Ok(Prediction {
                label,
                positive_probability: self.probability,
            })
        }

        fn version(&self) -> String {
            "stub".to_string()
        }
    }

    fn create_test_input() -> ClinicalInput {
        ClinicalInput {
            patient_name: "John Smith".to_string(),
            patient_id: "PT-20240101-001".to_string(),
            gender: "Male".to_string(),
            pregnancies: 1,
            glucose_mg_dl: 120,
            blood_pressure_mm_hg: 80,
            skin_thickness_mm: 25,
            insulin_micro_u_per_ml: 85,
            height_cm: 175,
            weight_kg: 75,
            diabetes_pedigree: 0.5,
            age_years: 45,
        }
    }

    #[tokio::test]
    async fn test_negative_low_risk_assessment() {
        let pipeline = RiskPipeline::new(Arc::new(StubModel::returning(0.12)));
        let outcome = pipeline.assess(&create_test_input()).await.unwrap();

        assert_eq!(outcome.assessment.label, RiskLabel::Negative);
        assert!((outcome.assessment.probability_percent - 12.0).abs() < 1e-4);
        assert_eq!(outcome.band, RiskBand::Low);
        assert_eq!(outcome.advisories.glucose_status, GlucoseStatus::Normal);
        assert_eq!(outcome.advisories.bmi_status, BmiStatus::Normal);
        assert_eq!(outcome.advisories.age_factor, AgeFactor::Normal);
        assert!((outcome.bmi - 24.49).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_positive_critical_assessment() {
        let pipeline = RiskPipeline::new(Arc::new(StubModel::returning(0.87)));
        let mut input = create_test_input();
        input.glucose_mg_dl = 190;
        input.age_years = 62;
        input.weight_kg = 105;

        let outcome = pipeline.assess(&input).await.unwrap();

        assert_eq!(outcome.assessment.label, RiskLabel::Positive);
        assert_eq!(outcome.band, RiskBand::Critical);
        assert_eq!(outcome.advisories.glucose_status, GlucoseStatus::High);
        assert_eq!(outcome.advisories.bmi_status, BmiStatus::Obese);
        assert_eq!(outcome.advisories.age_factor, AgeFactor::RiskFactor);
    }

    #[tokio::test]
    async fn test_exact_band_boundary_through_pipeline() {
        // 0.8 * 100 = 80.0 exactly: High, not Critical
        let pipeline = RiskPipeline::new(Arc::new(StubModel::returning(0.8)));
        let outcome = pipeline.assess(&create_test_input()).await.unwrap();
        assert_eq!(outcome.band, RiskBand::High);
    }

    #[tokio::test]
    async fn test_validation_error_never_reaches_gateway() {
        let stub = Arc::new(StubModel::returning(0.5));
        let pipeline = RiskPipeline::new(stub.clone());

        let mut input = create_test_input();
        input.age_years = 200;

        let err = pipeline.assess(&input).await.unwrap_err();
        assert_eq!(err.field(), Some("age_years"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_model_never_reaches_inference() {
        let gateway = Arc::new(OnnxGateway::unloaded("diabetes_model.onnx"));
        let pipeline = RiskPipeline::new(gateway);

        let err = pipeline.assess(&create_test_input()).await.unwrap_err();
        assert!(matches!(err, ScreeningError::ModelUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_assess_is_idempotent() {
        let pipeline = RiskPipeline::new(Arc::new(StubModel::returning(0.42)));
        let input = create_test_input();

        let first = pipeline.assess(&input).await.unwrap();
        let second = pipeline.assess(&input).await.unwrap();

        assert_eq!(first.assessment, second.assessment);
        assert_eq!(first.band, second.band);
        assert_eq!(first.advisories, second.advisories);
        assert_eq!(first.bmi, second.bmi);
    }

    #[tokio::test]
    async fn test_slow_inference_times_out() {
        let stub = StubModel {
            probability: 0.5,
            calls: AtomicU64::new(0),
            delay: Some(Duration::from_millis(200)),
        };
        let pipeline =
            RiskPipeline::with_timeout(Arc::new(stub), Duration::from_millis(10));

        let err = pipeline.assess(&create_test_input()).await.unwrap_err();
        assert!(matches!(err, ScreeningError::Inference { .. }));
        assert!(err.to_string().contains("timed out"));
    }
}
