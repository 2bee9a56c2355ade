//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use std::fmt::Write;

use crate::algorithm::summary::SummaryTable;

fn format_mean(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Render a summary as the dashboard's text report
#[must_use]
pub fn summary_report(summary: &SummaryTable) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "### Dashboard for gender: {}", summary.gender);
    let _ = writeln!(report, "{}", summary.headline);
    let _ = writeln!(report);
    let _ = writeln!(
        report,
        "{:<10} {:>8} {:>6} {:>9} {:>10} {:>9} {:>8} {:>5} {:>8} {:>9}",
        "AgeGroup", "Survived", "Total", "Rate (%)", "Creatinine", "Ejection", "Smoking", "HBP",
        "Anaemia", "Diabetes"
    );

    for row in &summary.rows {
        let _ = writeln!(
            report,
            "{:<10} {:>8} {:>6} {:>9.2} {:>10} {:>9} {:>8} {:>5} {:>8} {:>9}",
            row.age_group.label(),
            row.survival_count,
            row.total,
            row.survival_rate,
            format_mean(row.avg_serum_creatinine),
            format_mean(row.avg_ejection_fraction),
            row.smoking,
            row.high_blood_pressure,
            row.anaemia,
            row.diabetes
        );
    }

    report
}

/// Print a summary report to stdout
pub fn print_summary_table(summary: &SummaryTable) {
    print!("{}", summary_report(summary));
}
