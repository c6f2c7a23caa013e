//! Shared output formatting for command results.

use anyhow::Result;
use miette::{NamedSource, Report};
use serde::Serialize;
use voicelint_core::{Severity, ValidationResult, ViolationDiagnostic};

use crate::OutputFormat;

/// Print validation results in the specified format.
pub fn print_validation(
    result: &ValidationResult,
    text: &str,
    source_name: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, text, source_name),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result, source_name),
    }
    Ok(())
}

fn print_text(result: &ValidationResult, text: &str, source_name: &str) {
    for violation in &result.violations {
        let report = Report::new(ViolationDiagnostic::from(violation))
            .with_source_code(NamedSource::new(source_name, text.to_string()));
        println!("{report:?}");
    }

    let errors = result.count_by_severity(Severity::Error);
    let warnings = result.count_by_severity(Severity::Warning);
    let infos = result.count_by_severity(Severity::Info);

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let status = if result.valid { "valid" } else { "invalid" };

    println!(
        "{}Score {}/100 ({status}): {} error(s), {} warning(s), {} info(s) with pack {} v{}\x1b[0m",
        summary_color,
        result.score,
        errors,
        warnings,
        infos,
        result.metadata.pack_name,
        result.metadata.pack_version,
    );
}

/// Print any result as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &ValidationResult, source_name: &str) {
    for violation in &result.violations {
        println!("{source_name}:{violation}");
    }
}
