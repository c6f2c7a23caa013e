//! Deterministic rewriting from violation fixes.
//!
//! Only violations whose suggestion carries a replacement are applied.
//! Edits are spliced right to left so every remaining edit's offsets into
//! the original text stay valid; an edit that overlaps a span already
//! rewritten in the same pass is skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::ContentContext;
use crate::pack::Pack;
use crate::types::{Position, Severity, Violation};
use crate::validator::Validator;

/// How aggressively to fix violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Errors only.
    Minimal,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Every severity.
    Aggressive,
}

impl RewriteMode {
    /// Severities this mode fixes.
    #[must_use]
    pub fn fix_severities(self) -> &'static [Severity] {
        match self {
            Self::Minimal => &[Severity::Error],
            Self::Normal => &[Severity::Error, Severity::Warning],
            Self::Aggressive => &[Severity::Error, Severity::Warning, Severity::Info],
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Normal => "normal",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RewriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Self::Minimal),
            "normal" => Ok(Self::Normal),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(format!(
                "unknown rewrite mode `{other}`, expected: minimal, normal, aggressive"
            )),
        }
    }
}

/// Category of an applied change, derived from the rule id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Vocabulary fix.
    Vocabulary,
    /// Do-not pattern fix.
    Pattern,
    /// Structural constraint fix.
    Constraint,
    /// CTA fix.
    Cta,
    /// Anything else, e.g. custom rules.
    Other,
}

impl ChangeKind {
    fn of_rule(rule: &str) -> Self {
        if rule.starts_with("vocabulary.") {
            Self::Vocabulary
        } else if rule.starts_with("doNot") {
            Self::Pattern
        } else if rule.starts_with("constraints.") {
            Self::Constraint
        } else if rule.starts_with("cta.") {
            Self::Cta
        } else {
            Self::Other
        }
    }
}

/// One applied edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Category.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Rule id of the originating violation.
    pub rule: String,
    /// Replaced text.
    pub original: String,
    /// Inserted text.
    pub replacement: String,
    /// Message of the originating violation.
    pub reason: String,
    /// Span in the original text.
    pub position: Position,
}

/// Scores before and after rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Score of the original text.
    pub before: u8,
    /// Score of the rewritten text.
    pub after: u8,
}

impl ScoreDelta {
    /// `after - before`.
    #[must_use]
    pub fn improvement(self) -> i16 {
        i16::from(self.after) - i16::from(self.before)
    }
}

/// Outcome of a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    /// Input text.
    pub original: String,
    /// Output text.
    pub rewritten: String,
    /// Applied edits, in text order.
    pub changes: Vec<Change>,
    /// Score delta.
    pub score: ScoreDelta,
}

impl RewriteResult {
    /// Returns true if nothing was changed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Applies violation fixes to text.
pub struct Rewriter<'p> {
    validator: Validator<'p>,
    fix_severity: Vec<Severity>,
}

impl<'p> Rewriter<'p> {
    /// Creates a rewriter in [`RewriteMode::Normal`].
    #[must_use]
    pub fn new(pack: &'p Pack) -> Self {
        Self::with_validator(Validator::new(pack))
    }

    /// Creates a rewriter that validates with a configured validator.
    #[must_use]
    pub fn with_validator(validator: Validator<'p>) -> Self {
        Self {
            validator,
            fix_severity: RewriteMode::Normal.fix_severities().to_vec(),
        }
    }

    /// Fixes the severities of `mode`.
    #[must_use]
    pub fn mode(mut self, mode: RewriteMode) -> Self {
        self.fix_severity = mode.fix_severities().to_vec();
        self
    }

    /// Fixes exactly the given severities.
    #[must_use]
    pub fn fix_severity(mut self, severities: &[Severity]) -> Self {
        self.fix_severity = severities.to_vec();
        self
    }

    /// Rewrites `text`.
    #[must_use]
    pub fn rewrite(&self, text: &str, context: Option<&ContentContext>) -> RewriteResult {
        let before = self.validator.validate(text, context);

        let mut candidates: Vec<(usize, &Violation, Position, &str)> = before
            .violations
            .iter()
            .enumerate()
            .filter(|(_, v)| self.fix_severity.contains(&v.severity))
            .filter_map(|(i, v)| Some((i, v, v.position?, v.replacement()?)))
            .collect();

        // Right to left; on equal starts the more severe fix wins.
        candidates.sort_by(|a, b| {
            b.2.start
                .cmp(&a.2.start)
                .then(b.1.severity.cmp(&a.1.severity))
                .then(a.0.cmp(&b.0))
        });

        let mut rewritten = text.to_string();
        let mut consumed_from = usize::MAX;
        let mut changes = Vec::new();

        for (_, violation, pos, replacement) in candidates {
            if pos.end > consumed_from {
                debug!(rule = %violation.rule, "skipping overlapping fix at {}..{}", pos.start, pos.end);
                continue;
            }
            let original = &text[pos.start..pos.end];
            if original == replacement {
                continue;
            }
            rewritten.replace_range(pos.start..pos.end, replacement);
            consumed_from = pos.start;
            changes.push(Change {
                kind: ChangeKind::of_rule(&violation.rule),
                rule: violation.rule.clone(),
                original: original.to_string(),
                replacement: replacement.to_string(),
                reason: violation.message.clone(),
                position: pos,
            });
        }
        changes.reverse();

        let after = if changes.is_empty() {
            before.score
        } else {
            self.validator.validate(&rewritten, context).score
        };

        debug!(
            changes = changes.len(),
            before = before.score,
            after,
            "rewrote text"
        );

        RewriteResult {
            original: text.to_string(),
            rewritten,
            changes,
            score: ScoreDelta {
                before: before.score,
                after,
            },
        }
    }
}

/// Rewrites in [`RewriteMode::Normal`].
#[must_use]
pub fn rewrite(pack: &Pack, text: &str, context: Option<&ContentContext>) -> RewriteResult {
    Rewriter::new(pack).rewrite(text, context)
}

/// Rewrites in [`RewriteMode::Minimal`].
#[must_use]
pub fn rewrite_minimal(pack: &Pack, text: &str, context: Option<&ContentContext>) -> RewriteResult {
    Rewriter::new(pack)
        .mode(RewriteMode::Minimal)
        .rewrite(text, context)
}

/// Rewrites in [`RewriteMode::Aggressive`].
#[must_use]
pub fn rewrite_aggressive(
    pack: &Pack,
    text: &str,
    context: Option<&ContentContext>,
) -> RewriteResult {
    Rewriter::new(pack)
        .mode(RewriteMode::Aggressive)
        .rewrite(text, context)
}

/// Renders a numbered change list with the score delta.
#[must_use]
pub fn format_changes(result: &RewriteResult) -> String {
    use std::fmt::Write;

    if result.changes.is_empty() {
        return format!("No changes needed (score {})\n", result.score.before);
    }

    let mut out = format!(
        "Made {} change(s), score {} -> {} ({:+})\n",
        result.changes.len(),
        result.score.before,
        result.score.after,
        result.score.improvement()
    );
    for (i, change) in result.changes.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. \"{}\" -> \"{}\": {}",
            i + 1,
            change.original,
            change.replacement,
            change.reason
        );
    }
    out
}

/// Renders a line-level diff of the original and rewritten text.
#[must_use]
pub fn generate_diff(result: &RewriteResult) -> String {
    use std::fmt::Write;

    let before: Vec<&str> = result.original.lines().collect();
    let after: Vec<&str> = result.rewritten.lines().collect();
    let mut out = String::new();

    for i in 0..before.len().max(after.len()) {
        match (before.get(i), after.get(i)) {
            (Some(a), Some(b)) if a == b => {
                let _ = writeln!(out, "  {a}");
            }
            (a, b) => {
                if let Some(a) = a {
                    let _ = writeln!(out, "- {a}");
                }
                if let Some(b) = b {
                    let _ = writeln!(out, "+ {b}");
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pack;

    const VOICE: &str = r#"
name: test
vocabulary:
  rules:
    - preferred: use
      avoid: [utilize]
    - preferred: help
      avoid: [assist]
      severity: warning
  forbidden: [synergy]
constraints:
  contractions: discouraged
"#;

    #[test]
    fn applies_fixes_right_to_left() {
        let p = pack(VOICE);
        let result = rewrite(&p, "Utilize it to assist. Then utilize more.", None);
        assert_eq!(result.rewritten, "Use it to help. Then use more.");
        assert_eq!(result.changes.len(), 3);
        assert_eq!(result.changes[0].original, "Utilize");
        assert_eq!(result.changes[0].kind, ChangeKind::Vocabulary);
        assert_eq!(result.changes[2].position, Position::new(27, 34));
        assert!(result.score.after > result.score.before);
    }

    #[test]
    fn modes_select_severities() {
        let p = pack(VOICE);
        let text = "Utilize it to assist. Don't wait.";

        let minimal = rewrite_minimal(&p, text, None);
        assert_eq!(minimal.rewritten, "Use it to assist. Don't wait.");

        let normal = rewrite(&p, text, None);
        assert_eq!(normal.rewritten, "Use it to help. Don't wait.");

        let aggressive = rewrite_aggressive(&p, text, None);
        assert_eq!(aggressive.rewritten, "Use it to help. Do not wait.");
    }

    #[test]
    fn advice_only_violations_are_left_alone() {
        let p = pack(VOICE);
        let result = rewrite_aggressive(&p, "Pure synergy.", None);
        assert!(result.is_unchanged());
        assert_eq!(result.rewritten, "Pure synergy.");
        assert_eq!(result.score.before, result.score.after);
    }

    #[test]
    fn overlapping_fixes_apply_once() {
        let p = pack(
            r#"
name: overlap
vocabulary:
  rules:
    - preferred: sign in
      avoid: [log in now]
    - preferred: today
      avoid: [now]
"#,
        );
        let result = rewrite(&p, "Please log in now", None);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.rewritten, "Please log in today");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let p = pack(VOICE);
        let first = rewrite_aggressive(&p, "Utilize synergy. Don't assist.", None);
        let second = rewrite_aggressive(&p, &first.rewritten, None);
        assert!(second.is_unchanged());
        assert_eq!(second.rewritten, first.rewritten);
    }

    #[test]
    fn explicit_fix_severity() {
        let p = pack(VOICE);
        let result = Rewriter::new(&p)
            .fix_severity(&[Severity::Info])
            .rewrite("Utilize. Don't.", None);
        assert_eq!(result.rewritten, "Utilize. Do not.");
    }

    #[test]
    fn change_report_snapshot() {
        let p = pack(VOICE);
        let result = rewrite(&p, "Utilize it.", None);
        insta::assert_snapshot!(format_changes(&result), @r#"
        Made 1 change(s), score 90 -> 100 (+10)
          1. "Utilize" -> "Use": Use "use" instead of "utilize"
        "#);
    }

    #[test]
    fn no_change_report() {
        let p = pack(VOICE);
        let result = rewrite(&p, "All good.", None);
        assert_eq!(format_changes(&result), "No changes needed (score 100)\n");
    }

    #[test]
    fn diff_marks_changed_lines() {
        let p = pack(VOICE);
        let result = rewrite(&p, "Keep this.\nUtilize that.", None);
        assert_eq!(generate_diff(&result), "  Keep this.\n- Utilize that.\n+ Use that.\n");
    }

    #[test]
    fn mode_parses() {
        assert_eq!("minimal".parse::<RewriteMode>(), Ok(RewriteMode::Minimal));
        assert!("wild".parse::<RewriteMode>().is_err());
        assert_eq!(RewriteMode::default(), RewriteMode::Normal);
    }
}
