//! Core types for violations and validation results.

use chrono::{DateTime, Utc};
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};

/// Severity level for rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, never invalidates a result on its own.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Score penalty charged for one violation of this severity.
    #[must_use]
    pub fn penalty(self) -> u32 {
        match self {
            Self::Error => 10,
            Self::Warning => 5,
            Self::Info => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Byte range into the validated text.
///
/// Offsets always fall on UTF-8 character boundaries, so
/// `&text[start..end]` is the matched substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Text that replaces the violating span, when the fix is mechanical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl Suggestion {
    /// Creates a new suggestion without automatic fix.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement.into()),
        }
    }
}

/// A rule violation found during validation.
///
/// `position` is a range of UTF-8 **byte** offsets into the validated text,
/// not character or UTF-16 offsets, and serializes as
/// `{"start": <byte>, "end": <byte>}`. Consumers in other encodings should
/// use `text`, or convert the offsets, on non-ASCII input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Identifier, unique within one validation call (e.g. "v-0003").
    pub id: String,
    /// Dotted rule id (e.g. "vocabulary.forbidden").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// The matched substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Byte range of the match in the validated text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation. The id is assigned by the validator.
    #[must_use]
    pub fn new(rule: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            rule: rule.into(),
            severity,
            message: message.into(),
            text: None,
            position: None,
            suggestion: None,
        }
    }

    /// Attaches the matched span of `source`.
    ///
    /// `start..end` must lie on character boundaries of `source`.
    #[must_use]
    pub fn at(mut self, source: &str, start: usize, end: usize) -> Self {
        self.text = Some(source[start..end].to_string());
        self.position = Some(Position::new(start, end));
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Returns the automatic replacement text, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        self.suggestion
            .as_ref()
            .and_then(|s| s.replacement.as_deref())
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = match self.position {
            Some(pos) => format!("{} {} at {}..{}\n", self.id, self.rule, pos.start, pos.end),
            None => format!("{} {}\n", self.id, self.rule),
        };
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(text) = &self.text {
            let _ = writeln!(output, "  = found: \"{text}\"");
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(pos) = self.position {
            write!(f, "{}..{}: ", pos.start, pos.end)?;
        }
        write!(f, "{} [{}] {}", self.severity, self.rule, self.message)?;
        if let Some(text) = &self.text {
            write!(f, " (\"{text}\")")?;
        }
        Ok(())
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let (offset, length) = v.position.map_or((0, 0), |p| (p.start, p.len()));
        Self {
            message: format!("{} [{}] {}", v.severity, v.rule, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((offset, length)),
            label_message: v.rule.clone(),
        }
    }
}

/// Violation counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of error-severity violations.
    pub errors: usize,
    /// Number of warning-severity violations.
    pub warnings: usize,
    /// Number of info-severity violations.
    pub info: usize,
}

impl ValidationSummary {
    /// Tallies the given violations.
    #[must_use]
    pub fn from_violations(violations: &[Violation]) -> Self {
        violations.iter().fold(Self::default(), |mut acc, v| {
            match v.severity {
                Severity::Error => acc.errors += 1,
                Severity::Warning => acc.warnings += 1,
                Severity::Info => acc.info += 1,
            }
            acc
        })
    }

    /// Total number of violations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

/// Which pack produced a result, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    /// Manifest name of the pack.
    pub pack_name: String,
    /// Manifest version of the pack.
    pub pack_version: String,
    /// When validation ran.
    pub validated_at: DateTime<Utc>,
}

/// Result of validating one text against a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Compliance score in `0..=100`.
    pub score: u8,
    /// Whether the text passes the pack's policy.
    pub valid: bool,
    /// All violations, in rule order then match order.
    pub violations: Vec<Violation>,
    /// Counts per severity.
    pub summary: ValidationSummary,
    /// Pack identity and timestamp.
    pub metadata: ValidationMetadata,
}

/// Computes `max(0, 100 - sum of penalties)`.
#[must_use]
pub fn compute_score(violations: &[Violation]) -> u8 {
    let penalty: u32 = violations.iter().map(|v| v.severity.penalty()).sum();
    u8::try_from(100_u32.saturating_sub(penalty)).unwrap_or(0)
}

impl ValidationResult {
    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Number of violations with the given severity.
    #[must_use]
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.summary.errors,
            Severity::Warning => self.summary.warnings,
            Severity::Info => self.summary.info,
        }
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Returns violations whose rule id starts with `prefix`.
    #[must_use]
    pub fn by_rule(&self, prefix: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.rule.starts_with(prefix))
            .collect()
    }

    /// Formats a human-readable report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for violation in &self.violations {
            let _ = writeln!(report, "{}", violation.format());
        }
        let status = if self.valid { "valid" } else { "invalid" };
        let _ = writeln!(
            report,
            "Score {}/100 ({status}) with pack {} v{}: {} error(s), {} warning(s), {} info(s)",
            self.score,
            self.metadata.pack_name,
            self.metadata.pack_version,
            self.summary.errors,
            self.summary.warnings,
            self.summary.info,
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new("vocabulary.forbidden", severity, "Forbidden phrase: \"synergy\"")
            .at("Our synergy wins", 4, 11)
    }

    #[test]
    fn severity_orders_by_weight() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Error.penalty() > Severity::Warning.penalty());
        assert!(Severity::Warning.penalty() > Severity::Info.penalty());
    }

    #[test]
    fn violation_at_records_text_and_position() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.text.as_deref(), Some("synergy"));
        assert_eq!(v.position, Some(Position::new(4, 11)));
    }

    #[test]
    fn positions_are_byte_offsets() {
        let text = "Ünïcode synergy";
        let v = Violation::new("vocabulary.forbidden", Severity::Error, "Forbidden")
            .at(text, 10, 17);
        assert_eq!(v.text.as_deref(), Some("synergy"));
        assert_eq!(text.chars().take_while(|c| *c != 's').count(), 8);

        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["position"]["start"], 10);
        assert_eq!(json["position"]["end"], 17);
    }

    #[test]
    fn violation_display() {
        let v = make_violation(Severity::Error);
        insta::assert_snapshot!(
            v.to_string(),
            @r#"4..11: error [vocabulary.forbidden] Forbidden phrase: "synergy" ("synergy")"#
        );
    }

    #[test]
    fn violation_format_includes_help() {
        let v = make_violation(Severity::Warning)
            .with_suggestion(Suggestion::new("Remove or replace \"synergy\""));
        let formatted = v.format();
        assert!(formatted.contains("= help: Remove or replace"));
        assert!(formatted.contains("warning: Forbidden phrase"));
    }

    #[test]
    fn replacement_only_for_fixes() {
        let advice = make_violation(Severity::Error).with_suggestion(Suggestion::new("Reword"));
        assert!(advice.replacement().is_none());

        let fix = make_violation(Severity::Error).with_suggestion(Suggestion::with_fix("Use", "use"));
        assert_eq!(fix.replacement(), Some("use"));
    }

    #[test]
    fn score_saturates_at_zero() {
        let many: Vec<Violation> = (0..20).map(|_| make_violation(Severity::Error)).collect();
        assert_eq!(compute_score(&many), 0);
        assert_eq!(compute_score(&[]), 100);
        assert_eq!(compute_score(&[make_violation(Severity::Warning)]), 95);
    }

    #[test]
    fn summary_counts_match_total() {
        let violations = vec![
            make_violation(Severity::Error),
            make_violation(Severity::Info),
            make_violation(Severity::Info),
        ];
        let summary = ValidationSummary::from_violations(&violations);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 0);
        assert_eq!(summary.info, 2);
        assert_eq!(summary.total(), violations.len());
    }

    #[test]
    fn diagnostic_carries_span() {
        let v = make_violation(Severity::Error);
        let diag = ViolationDiagnostic::from(&v);
        assert_eq!(diag.span.offset(), 4);
        assert_eq!(diag.span.len(), 7);
    }
}
