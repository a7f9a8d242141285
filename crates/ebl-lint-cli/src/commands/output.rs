//! Shared output formatting for validation results.

use anyhow::Result;
use ebl_lint_core::{FileReport, Finding, FindingDiagnostic, RunResult, Severity};

use crate::OutputFormat;

/// Print validation results in the specified format.
pub fn print(result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => return print_pretty(result),
    }
    Ok(())
}

/// Findings of one file in display order: errors, warnings, advisories.
fn findings(file: &FileReport) -> impl Iterator<Item = &Finding> {
    file.report.iter().chain(file.advisories.iter())
}

fn print_text(result: &RunResult) {
    println!("{}", render_text(result, true));
}

/// Renders each file with findings as warning, error and advisory groups,
/// followed by the summary line.
fn render_text(result: &RunResult, color: bool) -> String {
    let mut out = String::new();

    for file in &result.files {
        if file.report.is_clean() && file.advisories.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", file.path.display()));
        let groups = [
            ("Warnings:", "\x1b[33m", &file.report.warnings),
            ("Errors:", "\x1b[31m", &file.report.errors),
            ("Advisories:", "\x1b[34m", &file.advisories),
        ];
        for (heading, ansi, group) in groups {
            if group.is_empty() {
                continue;
            }
            out.push_str(&format!("  {}\n", paint(heading, ansi, color)));
            for finding in group {
                for line in finding.format().lines() {
                    out.push_str(&format!("    {line}\n"));
                }
            }
        }
        out.push('\n');
    }

    out.push_str(&summary_line(result, color));
    out
}

fn paint(text: &str, ansi: &str, color: bool) -> String {
    if color {
        format!("{ansi}{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn summary_line(result: &RunResult, color: bool) -> String {
    let (errors, warnings, advisories) = result.totals();

    let summary_color = if errors > 0 || result.files_failed > 0 {
        "\x1b[31m"
    } else if warnings > 0 || advisories > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let mut line = format!(
        "Found {errors} error(s), {warnings} warning(s), {advisories} advisory(ies) in {} file(s)",
        result.files_checked()
    );
    if result.files_failed > 0 {
        line.push_str(&format!(", {} file(s) failed to load", result.files_failed));
    }
    paint(&line, summary_color, color)
}

fn print_json(result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &RunResult) {
    for file in &result.files {
        for finding in findings(file) {
            println!("{}", compact_line(file, finding));
        }
    }
}

fn compact_line(file: &FileReport, finding: &Finding) -> String {
    format!(
        "{}: {} [{}] {}",
        file.path.display(),
        finding.severity,
        finding.code,
        finding.message
    )
}

fn print_pretty(result: &RunResult) -> Result<()> {
    let handler = miette::GraphicalReportHandler::new();

    for file in &result.files {
        if file.report.is_clean() && file.advisories.is_empty() {
            continue;
        }
        println!("{}", file.path.display());
        for finding in findings(file) {
            let diagnostic = FindingDiagnostic::from(finding);
            let mut rendered = String::new();
            handler
                .render_report(&mut rendered, &diagnostic)
                .map_err(|e| anyhow::anyhow!("Failed to render diagnostic: {e}"))?;
            print!("{rendered}");
        }
    }

    println!("{}", summary_line(result, true));
    Ok(())
}
