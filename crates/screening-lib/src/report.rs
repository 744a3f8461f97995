//! Screening report synthesis
//!
//! Turns a pipeline outcome plus patient metadata into a structured
//! report record, and separately renders that record to display text.
//! The pipeline itself never touches presentation strings.

use crate::models::{Advisories, ClinicalInput, RiskAssessment, RiskBand, RiskLabel};
use crate::pipeline::ScreeningOutcome;
use serde::{Deserialize, Serialize};

/// Probability percentage above which the urgent-alert flag is raised,
/// independent of the Positive/Negative label
pub const HIGH_RISK_ALERT_PERCENT: f32 = 80.0;

/// Recommendations issued with a positive screening result
pub const POSITIVE_RECOMMENDATIONS: [&str; 6] = [
    "Urgent endocrinology consultation",
    "Fasting blood glucose test required",
    "Daily glucose monitoring",
    "Diabetic diet plan",
    "Follow-up in 1 week",
    "Regular exercise program",
];

/// Recommendations issued with a negative screening result
pub const NEGATIVE_RECOMMENDATIONS: [&str; 6] = [
    "Continue healthy lifestyle",
    "Annual diabetes screening",
    "Maintain balanced diet",
    "Regular physical activity",
    "Monitor weight and BMI",
    "Next screening in 6-12 months",
];

/// Key clinical parameters echoed back into the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyParameters {
    pub glucose_mg_dl: u32,
    pub blood_pressure_mm_hg: u32,
    pub bmi: f32,
    pub age_years: u32,
}

/// Structured screening report, constructed fresh per request
///
/// Ephemeral by design: downstream save/print/email actions belong to the
/// presentation layer, never to this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub patient_name: String,
    pub patient_id: String,
    pub gender: String,
    pub assessment: RiskAssessment,
    pub band: RiskBand,
    pub advisories: Advisories,
    pub key_parameters: KeyParameters,
    pub recommendations: Vec<String>,
    pub high_risk_alert: bool,
    pub model_version: String,
    pub generated_at: i64,
}

/// Build the report for one completed assessment
///
/// Pure and deterministic apart from the generation timestamp. The label
/// selects exactly one of the two fixed recommendation lists; the
/// high-risk flag is derived from the probability alone.
pub fn synthesize(input: &ClinicalInput, outcome: &ScreeningOutcome) -> Report {
    let recommendations = match outcome.assessment.label {
        RiskLabel::Positive => POSITIVE_RECOMMENDATIONS,
        RiskLabel::Negative => NEGATIVE_RECOMMENDATIONS,
    };

    Report {
        patient_name: input.patient_name.clone(),
        patient_id: input.patient_id.clone(),
        gender: input.gender.clone(),
        assessment: outcome.assessment.clone(),
        band: outcome.band,
        advisories: outcome.advisories,
        key_parameters: KeyParameters {
            glucose_mg_dl: input.glucose_mg_dl,
            blood_pressure_mm_hg: input.blood_pressure_mm_hg,
            bmi: outcome.bmi,
            age_years: input.age_years,
        },
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        high_risk_alert: outcome.assessment.probability_percent > HIGH_RISK_ALERT_PERCENT,
        model_version: outcome.model_version.clone(),
        generated_at: chrono::Utc::now().timestamp(),
    }
}

/// Render a report as plain display text
///
/// Kept separate from `synthesize` so the pipeline and the report record
/// stay testable without any rendering concern.
pub fn render_text(report: &Report) -> String {
    let headline = match report.assessment.label {
        RiskLabel::Positive => "POSITIVE - Further testing required",
        RiskLabel::Negative => "NEGATIVE - Continue monitoring",
    };
    let band = match report.band {
        RiskBand::Low => "Low",
        RiskBand::Moderate => "Moderate",
        RiskBand::High => "High",
        RiskBand::Critical => "Critical",
    };

    let mut text = String::new();
    text.push_str("DIABETES SCREENING REPORT\n\n");
    text.push_str("Patient Information\n");
    text.push_str(&format!("  Name:   {}\n", report.patient_name));
    text.push_str(&format!("  ID:     {}\n", report.patient_id));
    text.push_str(&format!("  Age:    {} years\n", report.key_parameters.age_years));
    text.push_str(&format!("  Gender: {}\n\n", report.gender));
    text.push_str("Clinical Findings\n");
    text.push_str(&format!(
        "  Diabetes Risk Probability: {:.1}%\n",
        report.assessment.probability_percent
    ));
    text.push_str(&format!("  Assessment Result: {}\n", headline));
    text.push_str(&format!("  Risk Level: {}\n", band));
    text.push_str("  Key Parameters:\n");
    text.push_str(&format!(
        "    Glucose: {} mg/dL\n",
        report.key_parameters.glucose_mg_dl
    ));
    text.push_str(&format!(
        "    Blood Pressure: {} mmHg\n",
        report.key_parameters.blood_pressure_mm_hg
    ));
    text.push_str(&format!("    BMI: {:.1}\n", report.key_parameters.bmi));
    text.push_str(&format!(
        "    Age: {} years\n\n",
        report.key_parameters.age_years
    ));

    if report.high_risk_alert {
        text.push_str("HIGH RISK ALERT\n");
        text.push_str("  Immediate medical consultation required.\n\n");
    }

    text.push_str("Recommendations\n");
    for (i, rec) in report.recommendations.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, rec));
    }
    text.push_str("\nPhysician Notes\n");
    text.push_str("  This screening is based on AI analysis. Clinical confirmation required.\n");

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeFactor, BmiStatus, GlucoseStatus};

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

    fn create_outcome(label: RiskLabel, percent: f32) -> ScreeningOutcome {
        ScreeningOutcome {
            assessment: RiskAssessment {
                label,
                probability_percent: percent,
            },
            band: RiskBand::from_percent(percent),
            advisories: Advisories {
                glucose_status: GlucoseStatus::Normal,
                bmi_status: BmiStatus::Normal,
                age_factor: AgeFactor::Normal,
            },
            bmi: 24.49,
            model_version: "stub".to_string(),
            duration_us: 42,
        }
    }

    #[test]
    fn test_negative_report_routine_monitoring() {
        let input = create_test_input();
        let outcome = create_outcome(RiskLabel::Negative, 12.0);
        let report = synthesize(&input, &outcome);

        assert_eq!(report.band, RiskBand::Low);
        assert!(!report.high_risk_alert);
        assert_eq!(
            report.recommendations,
            NEGATIVE_RECOMMENDATIONS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_positive_report_urgent_consultation() {
        let input = create_test_input();
        let outcome = create_outcome(RiskLabel::Positive, 72.0);
        let report = synthesize(&input, &outcome);

        assert_eq!(report.band, RiskBand::High);
        assert!(!report.high_risk_alert);
        assert_eq!(report.recommendations[0], "Urgent endocrinology consultation");
    }

    #[test]
    fn test_high_risk_alert_is_independent_of_label() {
        let input = create_test_input();

        // Flag follows the probability, not the label
        let report = synthesize(&input, &create_outcome(RiskLabel::Positive, 80.0));
        assert!(!report.high_risk_alert, "exactly 80.0 does not alert");

        let report = synthesize(&input, &create_outcome(RiskLabel::Positive, 80.01));
        assert!(report.high_risk_alert);
        assert_eq!(report.assessment.label, RiskLabel::Positive);
    }

    #[test]
    fn test_rendered_text_carries_findings() {
        let input = create_test_input();
        let report = synthesize(&input, &create_outcome(RiskLabel::Negative, 12.0));
        let text = render_text(&report);

        assert!(text.contains("DIABETES SCREENING REPORT"));
        assert!(text.contains("John Smith"));
        assert!(text.contains("12.0%"));
        assert!(text.contains("NEGATIVE - Continue monitoring"));
        assert!(text.contains("BMI: 24.5"));
        assert!(!text.contains("HIGH RISK ALERT"));
    }

    #[test]
    fn test_rendered_text_alert_section() {
        let input = create_test_input();
        let report = synthesize(&input, &create_outcome(RiskLabel::Positive, 91.5));
        let text = render_text(&report);

        assert!(text.contains("HIGH RISK ALERT"));
        assert!(text.contains("POSITIVE - Further testing required"));
    }
}
