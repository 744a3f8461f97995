//! Screening Service - Diabetes risk assessment API
//!
//! Loads the pre-trained classifier once at startup and serves
//! assessment requests over HTTP. A missing artifact does not crash the
//! service; it starts unhealthy and refuses assessments with an
//! actionable configuration message until the artifact is provided.

use anyhow::Result;
use screening_lib::{
    gateway::{OnnxGateway, RiskModel},
    health::{components, HealthRegistry},
    observability::{ScreeningMetrics, StructuredLogger},
    RiskPipeline,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting screening-service");

    // Load configuration
    let config = config::ServiceConfig::load()?;
    info!(model_path = %config.model_path, "Service configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::MODEL).await;
    health_registry.register(components::PIPELINE).await;

    // Initialize metrics and structured logging
    let metrics = ScreeningMetrics::new();
    let logger = StructuredLogger::new("screening-service");

    // Load the classifier artifact once; absence is a configuration
    // error surfaced through health and the assess endpoint, not a crash.
    let inference_timeout = Duration::from_millis(config.inference_timeout_ms);
    let pipeline = match OnnxGateway::from_path(&config.model_path) {
        Ok(gateway) => {
            let version = gateway.version();
            metrics.set_model_info(&version, &config.model_path);
            logger.log_model_loaded(&version, &config.model_path);
            logger.log_startup(SERVICE_VERSION, &version);
            Some(Arc::new(RiskPipeline::with_timeout(
                Arc::new(gateway),
                inference_timeout,
            )))
        }
        Err(err) => {
            logger.log_model_unavailable(&err.to_string());
            logger.log_startup(SERVICE_VERSION, "unloaded");
            health_registry
                .set_unhealthy(components::MODEL, err.to_string())
                .await;
            None
        }
    };

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        pipeline,
        config.model_path.clone(),
        health_registry.clone(),
        metrics,
        logger.clone(),
    ));

    // Ready to serve; assessments still require a loaded model
    health_registry
        .set_ready(app_state.pipeline.is_some())
        .await;

    // Start the API server
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}
