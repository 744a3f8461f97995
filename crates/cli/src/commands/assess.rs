//! Assessment command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, AssessResponse, AssessmentRequest};
use crate::output::{
    color_band, color_status, format_percent, print_success, print_warning, OutputFormat,
};

/// Row for the assessment summary table
#[derive(Tabled)]
struct AssessmentRow {
    #[tabled(rename = "Patient")]
    patient: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Glucose")]
    glucose: String,
    #[tabled(rename = "BMI")]
    bmi: String,
    #[tabled(rename = "Age")]
    age: String,
}

/// Generate a placeholder patient identifier from today's date.
///
/// Display convenience only; the service stores whatever identifier
/// it is given and never invents one.
pub fn generate_patient_id() -> String {
    format!("PT-{}-001", chrono::Local::now().format("%Y%m%d"))
}

/// Submit an assessment and print the report
pub async fn run_assessment(
    client: &ApiClient,
    request: AssessmentRequest,
    full_report: bool,
    format: OutputFormat,
) -> Result<()> {
    let response: AssessResponse = client.post("/assess", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response.report)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let report = &response.report;

            let rows = vec![AssessmentRow {
                patient: format!("{} ({})", report.patient_name, report.patient_id),
                result: report.assessment.label.to_uppercase(),
                probability: format_percent(report.assessment.probability_percent),
                band: color_band(&report.band),
                glucose: format!(
                    "{} ({})",
                    report.key_parameters.glucose_mg_dl,
                    color_status(&report.advisories.glucose_status)
                ),
                bmi: format!(
                    "{:.1} ({})",
                    report.key_parameters.bmi,
                    color_status(&report.advisories.bmi_status)
                ),
                age: format!(
                    "{} ({})",
                    report.key_parameters.age_years,
                    color_status(&report.advisories.age_factor)
                ),
            }];

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            if report.high_risk_alert {
                print_warning("HIGH RISK ALERT: probability exceeds 80%, immediate clinical attention recommended");
            }

            println!("\nRecommendations:");
            for rec in &report.recommendations {
                println!("  - {}", rec);
            }

            if full_report {
                println!("\n{}", response.report_text);
            }

            print_success(&format!("Assessment complete (model {})", report.model_version));
        }
    }

    Ok(())
}
