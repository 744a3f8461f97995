//! API client for communicating with the Screening Service

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// HTTP client for the screening service API
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API request/response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub patient_name: String,
    pub patient_id: String,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessResponse {
    pub report: Report,
    pub report_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub patient_name: String,
    pub patient_id: String,
    pub gender: String,
    pub assessment: RiskAssessment,
    pub band: String,
    pub advisories: Advisories,
    pub key_parameters: KeyParameters,
    pub recommendations: Vec<String>,
    pub high_risk_alert: bool,
    pub model_version: String,
    pub generated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub label: String,
    pub probability_percent: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisories {
    pub glucose_status: String,
    pub bmi_status: String,
    pub age_factor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyParameters {
    pub glucose_mg_dl: u32,
    pub blood_pressure_mm_hg: u32,
    pub bmi: f32,
    pub age_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: std::collections::HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
