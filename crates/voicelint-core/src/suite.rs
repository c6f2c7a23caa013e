//! Runs a pack's own `tests.yaml` cases against its rules.

use std::fmt::Write;

use serde::Serialize;
use tracing::{debug, info};

use crate::pack::{Pack, PackTestCase};
use crate::types::ValidationResult;
use crate::validator::Validator;

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackTestOutcome {
    /// Case id.
    pub id: String,
    /// Case name.
    pub name: String,
    /// Whether every expectation held.
    pub passed: bool,
    /// Score the input received.
    pub score: u8,
    /// Whether the input was valid.
    pub valid: bool,
    /// One line per failed expectation.
    pub failures: Vec<String>,
}

/// Results of [`run_pack_tests`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackTestReport {
    /// Pack the cases ran against.
    pub pack_name: String,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed.
    pub failed: usize,
    /// Per-case outcomes in file order.
    pub results: Vec<PackTestOutcome>,
}

impl PackTestReport {
    /// Number of cases that ran.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no case failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed cases only.
    pub fn failures(&self) -> impl Iterator<Item = &PackTestOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Formats a human-readable report.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut out = String::new();
        for r in &self.results {
            let mark = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "{mark} {} - {} (score {})", r.id, r.name, r.score);
            for failure in &r.failures {
                let _ = writeln!(out, "       {failure}");
            }
        }
        let _ = writeln!(
            out,
            "{}: {} passed, {} failed, {} total",
            self.pack_name,
            self.passed,
            self.failed,
            self.total()
        );
        out
    }
}

/// Runs the pack's test cases, optionally only those whose id or one of
/// whose tags contains `filter` (case-insensitive).
#[must_use]
pub fn run_pack_tests(pack: &Pack, filter: Option<&str>) -> PackTestReport {
    let validator = Validator::new(pack);
    let filter = filter.map(str::to_lowercase);

    let results: Vec<PackTestOutcome> = pack
        .tests
        .tests
        .iter()
        .filter(|case| filter.as_deref().map_or(true, |f| matches_filter(case, f)))
        .map(|case| {
            let result = validator.validate(&case.input, case.context.as_ref());
            let failures = check_expectations(case, &result);
            debug!(id = %case.id, passed = failures.is_empty(), "ran pack test");
            PackTestOutcome {
                id: case.id.clone(),
                name: case.name.clone(),
                passed: failures.is_empty(),
                score: result.score,
                valid: result.valid,
                failures,
            }
        })
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    info!(pack = %pack.name(), passed, failed, "pack tests finished");

    PackTestReport {
        pack_name: pack.name().to_string(),
        passed,
        failed,
        results,
    }
}

fn matches_filter(case: &PackTestCase, filter: &str) -> bool {
    case.id.to_lowercase().contains(filter)
        || case.tags.iter().any(|t| t.to_lowercase().contains(filter))
}

fn check_expectations(case: &PackTestCase, result: &ValidationResult) -> Vec<String> {
    let expect = &case.expect;
    let mut failures = Vec::new();

    if let Some(pass) = expect.pass {
        if result.valid != pass {
            failures.push(format!("expected valid = {pass}, got {}", result.valid));
        }
    }
    if let Some(min) = expect.min_score {
        if result.score < min {
            failures.push(format!("score {} is below minScore {min}", result.score));
        }
    }
    if let Some(max) = expect.max_score {
        if result.score > max {
            failures.push(format!("score {} is above maxScore {max}", result.score));
        }
    }

    for wanted in &expect.violations {
        let found = result.violations.iter().any(|v| {
            v.rule.contains(&wanted.rule) && wanted.severity.map_or(true, |s| v.severity == s)
        });
        if !found {
            match wanted.severity {
                Some(severity) => failures.push(format!(
                    "expected a {severity} violation of `{}`",
                    wanted.rule
                )),
                None => failures.push(format!("expected a violation of `{}`", wanted.rule)),
            }
        }
    }

    for unwanted in &expect.no_violations {
        if let Some(v) = result.violations.iter().find(|v| v.rule.contains(unwanted.as_str())) {
            failures.push(format!("unexpected violation `{}`: {}", v.rule, v.message));
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::TestSuite;
    use crate::test_support::pack;

    const VOICE: &str = r#"
name: test
vocabulary:
  forbidden: [synergy]
doNot:
  - pattern: going forward
    reason: Filler
"#;

    const CASES: &str = r#"
name: suite
tests:
  - id: clean-01
    name: Clean copy passes
    input: We ship small tools.
    expect:
      pass: true
      minScore: 100
    tags: [smoke]
  - id: forbidden-01
    name: Forbidden term is an error
    input: Pure synergy.
    expect:
      pass: false
      maxScore: 90
      violations:
        - rule: forbidden
          severity: error
    tags: [vocabulary]
  - id: broken-01
    name: Wrong expectation
    input: Going forward we ship.
    expect:
      noViolations: [doNot]
      violations:
        - rule: vocabulary
"#;

    fn suite_pack() -> Pack {
        let suite: TestSuite = serde_yaml::from_str(CASES).unwrap();
        pack(VOICE).with_tests(suite)
    }

    #[test]
    fn runs_every_case() {
        let report = run_pack_tests(&suite_pack(), None);
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());

        let failed: Vec<_> = report.failures().collect();
        assert_eq!(failed[0].id, "broken-01");
        assert_eq!(failed[0].failures.len(), 2);
        assert!(failed[0].failures[0].starts_with("expected a violation of `vocabulary`"));
        assert!(failed[0].failures[1].starts_with("unexpected violation `doNot.going-forward`"));
    }

    #[test]
    fn filter_matches_ids_and_tags() {
        let p = suite_pack();
        let by_tag = run_pack_tests(&p, Some("SMOKE"));
        assert_eq!(by_tag.total(), 1);
        assert_eq!(by_tag.results[0].id, "clean-01");

        let by_id = run_pack_tests(&p, Some("forbidden"));
        assert_eq!(by_id.total(), 1);
        assert!(by_id.all_passed());
    }

    #[test]
    fn empty_suite_passes() {
        let report = run_pack_tests(&pack(VOICE), None);
        assert_eq!(report.total(), 0);
        assert!(report.all_passed());
        assert!(report.format_report().ends_with("0 passed, 0 failed, 0 total\n"));
    }
}
