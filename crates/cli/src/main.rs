//! Diabetes Screening CLI
//!
//! A command-line tool for submitting screening assessments to the
//! screening service and checking service status.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{assess, status};

/// Diabetes Screening CLI
#[derive(Parser)]
#[command(name = "dscreen")]
#[command(author, version, about = "CLI for the Diabetes Screening Service", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via DSCREEN_API_URL env var)
    #[arg(long, env = "DSCREEN_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a screening assessment for one patient
    Assess {
        /// Patient name
        #[arg(long, default_value = "John Smith")]
        name: String,

        /// Patient identifier (generated from today's date if not given)
        #[arg(long)]
        patient_id: Option<String>,

        /// Patient gender
        #[arg(long, default_value = "Male")]
        gender: String,

        /// Number of pregnancies
        #[arg(long, default_value_t = 1)]
        pregnancies: u32,

        /// Plasma glucose concentration (mg/dL)
        #[arg(long, default_value_t = 120)]
        glucose: u32,

        /// Diastolic blood pressure (mm Hg)
        #[arg(long, default_value_t = 80)]
        blood_pressure: u32,

        /// Triceps skin fold thickness (mm)
        #[arg(long, default_value_t = 25)]
        skin_thickness: u32,

        /// Serum insulin (mu U/ml)
        #[arg(long, default_value_t = 85)]
        insulin: u32,

        /// Height (cm)
        #[arg(long, default_value_t = 175)]
        height: u32,

        /// Weight (kg)
        #[arg(long, default_value_t = 75)]
        weight: u32,

        /// Diabetes pedigree function
        #[arg(long, default_value_t = 0.5)]
        pedigree: f32,

        /// Age in years
        #[arg(long, default_value_t = 45)]
        age: u32,

        /// Print the full plain-text report
        #[arg(long)]
        full_report: bool,
    },

    /// Show service health and readiness
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Assess {
            name,
            patient_id,
            gender,
            pregnancies,
            glucose,
            blood_pressure,
            skin_thickness,
            insulin,
            height,
            weight,
            pedigree,
            age,
            full_report,
        } => {
            let request = client::AssessmentRequest {
                patient_name: name,
                patient_id: patient_id.unwrap_or_else(assess::generate_patient_id),
                gender,
                pregnancies,
                glucose_mg_dl: glucose,
                blood_pressure_mm_hg: blood_pressure,
                skin_thickness_mm: skin_thickness,
                insulin_micro_u_per_ml: insulin,
                height_cm: height,
                weight_kg: weight,
                diabetes_pedigree: pedigree,
                age_years: age,
            };
            assess::run_assessment(&client, request, full_report, cli.format).await?;
        }
        Commands::Status => {
            status::show_status(&client, cli.format).await?;
        }
    }

    Ok(())
}
