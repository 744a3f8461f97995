//! Core library for the diabetes screening service
//!
//! This crate provides:
//! - Input validation and feature vector assembly
//! - The model gateway boundary to the pre-trained classifier
//! - The risk classification pipeline and categorical banding
//! - Report synthesis and text rendering
//! - Health checks and observability

pub mod assembler;
pub mod error;
pub mod gateway;
pub mod health;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod report;

pub use error::ScreeningError;
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ScreeningMetrics, StructuredLogger};
pub use pipeline::{RiskPipeline, ScreeningOutcome};
pub use report::Report;
