//! Observability infrastructure for the screening service
//!
//! Provides:
//! - Prometheus metrics (assessment latency, counters per failure class,
//!   high-risk alerts, model info)
//! - Structured JSON logging helpers for significant clinical events

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ScreeningMetricsInner> = OnceLock::new();

struct ScreeningMetricsInner {
    assessment_latency_seconds: Histogram,
    assessments_total: IntCounter,
    validation_failures_total: IntCounter,
    inference_errors_total: IntCounter,
    high_risk_alerts_total: IntCounter,
    model_info: GaugeVec,
}

impl ScreeningMetricsInner {
    fn new() -> Self {
        Self {
            assessment_latency_seconds: register_histogram!(
                "screening_assessment_latency_seconds",
                "Time spent on one full assessment including inference",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register assessment_latency_seconds"),

            assessments_total: register_int_counter!(
                "screening_assessments_total",
                "Total number of completed assessments"
            )
            .expect("Failed to register assessments_total"),

            validation_failures_total: register_int_counter!(
                "screening_validation_failures_total",
                "Total number of requests rejected for out-of-range fields"
            )
            .expect("Failed to register validation_failures_total"),

            inference_errors_total: register_int_counter!(
                "screening_inference_errors_total",
                "Total number of failed or timed-out classifier invocations"
            )
            .expect("Failed to register inference_errors_total"),

            high_risk_alerts_total: register_int_counter!(
                "screening_high_risk_alerts_total",
                "Total number of assessments that raised the high-risk alert"
            )
            .expect("Failed to register high_risk_alerts_total"),

            model_info: register_gauge_vec!(
                "screening_model_info",
                "Information about the currently loaded classifier",
                &["version", "path"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Metrics handle for Prometheus exposition
///
/// Lightweight handle to the global instance; clones share the same
/// underlying metrics.
#[derive(Clone)]
pub struct ScreeningMetrics {
    _private: (),
}

impl Default for ScreeningMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreeningMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ScreeningMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ScreeningMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_assessment_latency(&self, duration_secs: f64) {
        self.inner().assessment_latency_seconds.observe(duration_secs);
    }

    pub fn inc_assessments(&self) {
        self.inner().assessments_total.inc();
    }

    pub fn inc_validation_failures(&self) {
        self.inner().validation_failures_total.inc();
    }

    pub fn inc_inference_errors(&self) {
        self.inner().inference_errors_total.inc();
    }

    pub fn inc_high_risk_alerts(&self) {
        self.inner().high_risk_alerts_total.inc();
    }

    /// Record the loaded model identity
    pub fn set_model_info(&self, version: &str, path: &str) {
        self.inner().model_info.reset();
        self.inner()
            .model_info
            .with_label_values(&[version, path])
            .set(1.0);
    }
}

/// Structured logger for screening events
///
/// Consistent JSON-formatted logging for assessments, alerts, and
/// lifecycle events. Patient names never appear in logs; only the
/// caller-supplied patient id does.
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Log a completed assessment
    pub fn log_assessment(
        &self,
        patient_id: &str,
        probability_percent: f32,
        band: &str,
        high_risk_alert: bool,
        model_version: &str,
        duration_us: u64,
    ) {
        if high_risk_alert {
            warn!(
                event = "assessment_completed",
                service = %self.service_name,
                patient_id = %patient_id,
                probability_percent = probability_percent,
                band = %band,
                high_risk_alert = true,
                model_version = %model_version,
                duration_us = duration_us,
                "High-risk assessment completed"
            );
        } else {
            info!(
                event = "assessment_completed",
                service = %self.service_name,
                patient_id = %patient_id,
                probability_percent = probability_percent,
                band = %band,
                high_risk_alert = false,
                model_version = %model_version,
                duration_us = duration_us,
                "Assessment completed"
            );
        }
    }

    /// Log a rejected submission
    pub fn log_validation_failure(&self, field: &str, detail: &str) {
        info!(
            event = "validation_failed",
            service = %self.service_name,
            field = %field,
            detail = %detail,
            "Submission rejected for out-of-range field"
        );
    }

    /// Log successful model load
    pub fn log_model_loaded(&self, version: &str, path: &str) {
        info!(
            event = "model_loaded",
            service = %self.service_name,
            model_version = %version,
            path = %path,
            "Classifier artifact loaded"
        );
    }

    /// Log a missing or unloadable model artifact
    pub fn log_model_unavailable(&self, reason: &str) {
        warn!(
            event = "model_unavailable",
            service = %self.service_name,
            reason = %reason,
            "Classifier artifact unavailable, assessments will be refused"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "service_started",
            service = %self.service_name,
            service_version = %version,
            model_version = %model_version,
            "Screening service started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Screening service shutting down"
        );
    }
}
