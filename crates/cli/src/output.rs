//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a probability percentage for display
pub fn format_percent(percent: f32) -> String {
    format!("{:.1}%", percent)
}

/// Color a risk band based on severity
pub fn color_band(band: &str) -> String {
    match band.to_lowercase().as_str() {
        "low" => band.green().to_string(),
        "moderate" => band.yellow().to_string(),
        "high" => band.red().to_string(),
        "critical" => band.red().bold().to_string(),
        _ => band.to_string(),
    }
}

/// Color status based on value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" | "normal" => status.green().to_string(),
        "degraded" | "overweight" | "risk_factor" => status.yellow().to_string(),
        "unhealthy" | "high" | "low" | "obese" => status.red().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent_one_decimal() {
        assert_eq!(format_percent(84.567), "84.6%");
        assert_eq!(format_percent(12.0), "12.0%");
    }

    #[test]
    fn test_color_band_passes_unknown_through() {
        assert_eq!(color_band("unknown"), "unknown");
    }
}
