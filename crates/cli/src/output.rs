//! Output formatting for the CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use sitesmoke_harness::{CheckStatus, SuiteReport};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Per-check sections plus a summary table
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Render the suite report to stdout
pub fn print_suite(suite: &SuiteReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_sections(suite);
            print_summary_table(suite);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(suite).unwrap_or_default());
        }
        OutputFormat::Plain => {
            print!("{}", suite.render_text());
        }
    }
}

fn print_sections(suite: &SuiteReport) {
    for report in &suite.reports {
        println!("\n=== {} ===", report.name.bold());
        for note in &report.notes {
            println!("  {note}");
        }
        for assertion in &report.assertions {
            let icon = if assertion.passed {
                "✓".green()
            } else {
                "✗".red()
            };
            match &assertion.detail {
                Some(detail) => println!("{icon} {}: {detail}", assertion.label),
                None => println!("{icon} {}", assertion.label),
            }
        }
        if let Some(error) = &report.error {
            println!("{} error: {error}", "✗".red());
        }
    }
}

fn print_summary_table(suite: &SuiteReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Check", "Status", "Duration (ms)"]);
    for report in &suite.reports {
        let status_cell = match report.status {
            CheckStatus::Pass => Cell::new("PASS").fg(Color::Green),
            CheckStatus::Fail => Cell::new("FAIL").fg(Color::Red),
            CheckStatus::Error => Cell::new("ERROR").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&report.name),
            status_cell,
            Cell::new(report.duration_ms),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "{} checks: {} passed, {} failed, {} errored ({} ms)",
        suite.total, suite.passed, suite.failed, suite.errored, suite.duration_ms
    );
}
