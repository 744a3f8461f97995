//! Core data models for the screening service

use serde::{Deserialize, Serialize};

/// Raw clinical form values for one patient submission
///
/// All numeric fields are bounds-checked by the feature assembler before
/// anything reaches the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInput {
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

/// Ordered numeric features the classifier consumes
///
/// The order produced by [`FeatureVector::as_array`] is the contract the
/// model was trained against. Reordering silently corrupts predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub pregnancies: f32,
    pub glucose: f32,
    pub blood_pressure: f32,
    pub skin_thickness: f32,
    pub insulin: f32,
    pub bmi: f32,
    pub diabetes_pedigree: f32,
    pub age: f32,
}

/// Number of features the classifier expects
pub const NUM_FEATURES: usize = 8;

impl FeatureVector {
    /// Canonical feature ordering:
    /// `[pregnancies, glucose, blood_pressure, skin_thickness, insulin,
    /// bmi, diabetes_pedigree, age]`
    pub fn as_array(&self) -> [f32; NUM_FEATURES] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree,
            self.age,
        ]
    }
}

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Negative,
    Positive,
}

/// Raw gateway output: label plus positive-class probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RiskLabel,
    pub positive_probability: f32,
}

/// Classifier verdict for one assessment, probability as a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    pub probability_percent: f32,
}

/// Categorical bucketing of the risk probability for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskBand {
    /// Band thresholds are strict `>` comparisons: a probability of exactly
    /// 80.0 is High, not Critical.
    pub fn from_percent(probability_percent: f32) -> Self {
        if probability_percent > 80.0 {
            RiskBand::Critical
        } else if probability_percent > 60.0 {
            RiskBand::High
        } else if probability_percent > 30.0 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }
}

/// Advisory glucose status, not a classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseStatus {
    Low,
    Normal,
    High,
}

impl GlucoseStatus {
    pub fn from_mg_dl(glucose: u32) -> Self {
        if glucose > 140 {
            GlucoseStatus::High
        } else if glucose > 70 {
            GlucoseStatus::Normal
        } else {
            GlucoseStatus::Low
        }
    }
}

/// Advisory BMI status, not a classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiStatus {
    Normal,
    Overweight,
    Obese,
}

impl BmiStatus {
    pub fn from_bmi(bmi: f32) -> Self {
        if bmi > 30.0 {
            BmiStatus::Obese
        } else if bmi > 25.0 {
            BmiStatus::Overweight
        } else {
            BmiStatus::Normal
        }
    }
}

/// Advisory age annotation, not a classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeFactor {
    Normal,
    RiskFactor,
}

impl AgeFactor {
    pub fn from_years(age: u32) -> Self {
        if age > 45 {
            AgeFactor::RiskFactor
        } else {
            AgeFactor::Normal
        }
    }
}

/// Informational annotations surfaced alongside the risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisories {
    pub glucose_status: GlucoseStatus,
    pub bmi_status: BmiStatus,
    pub age_factor: AgeFactor,
}
