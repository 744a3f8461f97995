//! HTTP API: assessment requests, health checks and Prometheus metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use screening_lib::{
    health::{ComponentStatus, HealthRegistry},
    observability::{ScreeningMetrics, StructuredLogger},
    report, ClinicalInput, Report, RiskPipeline, ScreeningError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline is absent when the classifier artifact failed to load
    pub pipeline: Option<Arc<RiskPipeline>>,
    /// Expected artifact path, used in the configuration-required message
    pub model_path: String,
    pub health_registry: HealthRegistry,
    pub metrics: ScreeningMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        pipeline: Option<Arc<RiskPipeline>>,
        model_path: String,
        health_registry: HealthRegistry,
        metrics: ScreeningMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            pipeline,
            model_path,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// One assessment request: patient vitals plus optional metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub gender: String,
    pub pregnancies: u32,
    pub glucose_mg_dl: u32,
    pub blood_pressure_mm_hg: u32,
    pub skin_thickness_mm: u32,
    pub insulin_micro_u_per_ml: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub diabetes_pedigree: f32,
    pub age_years: u32,
}

impl From<AssessmentRequest> for ClinicalInput {
    fn from(req: AssessmentRequest) -> Self {
        ClinicalInput {
            patient_name: req.patient_name,
            patient_id: req.patient_id,
            gender: req.gender,
            pregnancies: req.pregnancies,
            glucose_mg_dl: req.glucose_mg_dl,
            blood_pressure_mm_hg: req.blood_pressure_mm_hg,
            skin_thickness_mm: req.skin_thickness_mm,
            insulin_micro_u_per_ml: req.insulin_micro_u_per_ml,
            height_cm: req.height_cm,
            weight_kg: req.weight_kg,
            diabetes_pedigree: req.diabetes_pedigree,
            age_years: req.age_years,
        }
    }
}

/// Successful assessment response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessResponse {
    pub report: Report,
    pub report_text: String,
}

/// Error body for failed assessments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

fn error_response(state: &AppState, err: &ScreeningError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        ScreeningError::Validation { field, .. } => {
            state.metrics.inc_validation_failures();
            state.logger.log_validation_failure(field, &err.to_string());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: err.to_string(),
                    field: Some(field.to_string()),
                    hint: None,
                }),
            )
        }
        ScreeningError::ModelUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: err.to_string(),
                field: None,
                hint: Some(format!(
                    "configuration required: place the classifier artifact at {} and restart",
                    state.model_path
                )),
            }),
        ),
        ScreeningError::Inference { .. } => {
            state.metrics.inc_inference_errors();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                    field: None,
                    hint: None,
                }),
            )
        }
    }
}

/// Run one assessment and synthesize the report
async fn assess(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssessmentRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    let pipeline = match &state.pipeline {
        Some(p) => p,
        None => {
            let err = ScreeningError::model_unavailable(format!(
                "model file not found: {}",
                state.model_path
            ));
            return error_response(&state, &err).into_response();
        }
    };

    let input: ClinicalInput = request.into();
    let outcome = match pipeline.assess(&input).await {
        Ok(outcome) => outcome,
        Err(err) => return error_response(&state, &err).into_response(),
    };

    let report = report::synthesize(&input, &outcome);
    let report_text = report::render_text(&report);

    state.metrics.inc_assessments();
    state
        .metrics
        .observe_assessment_latency(start.elapsed().as_secs_f64());
    if report.high_risk_alert {
        state.metrics.inc_high_risk_alerts();
    }
    state.logger.log_assessment(
        &report.patient_id,
        report.assessment.probability_percent,
        &format!("{:?}", report.band),
        report.high_risk_alert,
        &report.model_version,
        outcome.duration_us,
    );

    (
        StatusCode::OK,
        Json(AssessResponse {
            report,
            report_text,
        }),
    )
        .into_response()
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assess", post(assess))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
