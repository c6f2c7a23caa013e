//! Schema checks for pack files.
//!
//! Serde enforces shape and types; these functions enforce the value
//! invariants on top of it. Each returns the first violation found, with a
//! dotted path to the offending field.

use super::model::{CopyPatterns, CtaRules, Manifest, TestSuite, Voice};

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaErrorKind {
    /// A required string or list is empty.
    #[error("must not be empty")]
    Empty,

    /// A tone weight is outside `[0, 1]`.
    #[error("weight {0} is outside [0, 1]")]
    WeightOutOfRange(f64),

    /// A limit that must be positive is zero.
    #[error("must be greater than zero")]
    Zero,

    /// A score is above 100.
    #[error("score {0} is above 100")]
    ScoreOutOfRange(u8),

    /// A lower bound exceeds its upper bound.
    #[error("minScore {min} exceeds maxScore {max}")]
    InvertedRange {
        /// Lower bound.
        min: u8,
        /// Upper bound.
        max: u8,
    },
}

/// A schema violation at a specific field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{context}: {kind}")]
pub struct SchemaError {
    /// Dotted field path (e.g., "vocabulary.rules[2].avoid").
    pub context: String,
    /// What is wrong.
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    fn new(context: impl Into<String>, kind: SchemaErrorKind) -> Self {
        Self {
            context: context.into(),
            kind,
        }
    }
}

fn non_empty(value: &str, context: impl FnOnce() -> String) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        Err(SchemaError::new(context(), SchemaErrorKind::Empty))
    } else {
        Ok(())
    }
}

fn positive(value: Option<usize>, context: &str) -> Result<(), SchemaError> {
    match value {
        Some(0) => Err(SchemaError::new(context, SchemaErrorKind::Zero)),
        _ => Ok(()),
    }
}

fn score(value: Option<u8>, context: impl FnOnce() -> String) -> Result<(), SchemaError> {
    match value {
        Some(s) if s > 100 => Err(SchemaError::new(context(), SchemaErrorKind::ScoreOutOfRange(s))),
        _ => Ok(()),
    }
}

/// Validates `manifest.yaml`.
///
/// # Errors
///
/// Returns the first schema violation.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), SchemaError> {
    non_empty(&manifest.name, || "name".into())?;
    non_empty(&manifest.version, || "version".into())?;

    let files = &manifest.files;
    for (field, value) in [
        ("voice", &files.voice),
        ("copyPatterns", &files.copy_patterns),
        ("ctaRules", &files.cta_rules),
        ("tokens", &files.tokens),
        ("tests", &files.tests),
    ] {
        non_empty(value, || format!("files.{field}"))?;
    }

    score(Some(manifest.config.min_score), || "config.minScore".into())
}

/// Validates `voice.yaml`.
///
/// # Errors
///
/// Returns the first schema violation.
pub fn validate_voice(voice: &Voice) -> Result<(), SchemaError> {
    non_empty(&voice.name, || "name".into())?;

    for (i, attr) in voice.tone.attributes.iter().enumerate() {
        non_empty(&attr.name, || format!("tone.attributes[{i}].name"))?;
        if !(0.0..=1.0).contains(&attr.weight) {
            return Err(SchemaError::new(
                format!("tone.attributes[{i}].weight"),
                SchemaErrorKind::WeightOutOfRange(attr.weight),
            ));
        }
    }

    for (i, rule) in voice.vocabulary.rules.iter().enumerate() {
        non_empty(&rule.preferred, || format!("vocabulary.rules[{i}].preferred"))?;
        if rule.avoid.is_empty() {
            return Err(SchemaError::new(
                format!("vocabulary.rules[{i}].avoid"),
                SchemaErrorKind::Empty,
            ));
        }
        for (j, avoid) in rule.avoid.iter().enumerate() {
            non_empty(avoid, || format!("vocabulary.rules[{i}].avoid[{j}]"))?;
        }
    }

    for (i, term) in voice.vocabulary.forbidden.iter().enumerate() {
        non_empty(term, || format!("vocabulary.forbidden[{i}]"))?;
    }

    for (i, rule) in voice.do_not.iter().enumerate() {
        non_empty(&rule.pattern, || format!("doNot[{i}].pattern"))?;
    }

    positive(
        voice.constraints.max_sentence_length,
        "constraints.maxSentenceLength",
    )?;
    positive(
        voice.constraints.max_paragraph_length,
        "constraints.maxParagraphLength",
    )
}

/// Validates `cta_rules.yaml`.
///
/// # Errors
///
/// Returns the first schema violation.
pub fn validate_cta_rules(rules: &CtaRules) -> Result<(), SchemaError> {
    positive(rules.guidelines.max_words, "guidelines.maxWords")?;

    for (i, word) in rules.guidelines.avoid_words.iter().enumerate() {
        non_empty(word, || format!("guidelines.avoidWords[{i}]"))?;
    }

    for (i, category) in rules.categories.iter().enumerate() {
        non_empty(&category.name, || format!("categories[{i}].name"))?;
        for (j, cta) in category.ctas.iter().enumerate() {
            non_empty(&cta.id, || format!("categories[{i}].ctas[{j}].id"))?;
            non_empty(&cta.text, || format!("categories[{i}].ctas[{j}].text"))?;
        }
    }

    for (i, anti) in rules.anti_patterns.iter().enumerate() {
        non_empty(&anti.pattern, || format!("antiPatterns[{i}].pattern"))?;
    }

    for (i, rule) in rules.contextual_rules.iter().enumerate() {
        non_empty(&rule.context, || format!("contextualRules[{i}].context"))?;
    }

    Ok(())
}

/// Validates `copy_patterns.yaml`.
///
/// # Errors
///
/// Returns the first schema violation.
pub fn validate_copy_patterns(patterns: &CopyPatterns) -> Result<(), SchemaError> {
    for (i, pattern) in patterns.patterns.iter().enumerate() {
        non_empty(&pattern.id, || format!("patterns[{i}].id"))?;
        non_empty(&pattern.name, || format!("patterns[{i}].name"))?;
    }
    Ok(())
}

/// Validates `tests.yaml`.
///
/// # Errors
///
/// Returns the first schema violation.
pub fn validate_tests(suite: &TestSuite) -> Result<(), SchemaError> {
    for (i, case) in suite.tests.iter().enumerate() {
        let ctx = format!("tests[{i}]");
        non_empty(&case.id, || format!("{ctx}.id"))?;
        score(case.expect.min_score, || format!("{ctx}.expect.minScore"))?;
        score(case.expect.max_score, || format!("{ctx}.expect.maxScore"))?;
        if let (Some(min), Some(max)) = (case.expect.min_score, case.expect.max_score) {
            if min > max {
                return Err(SchemaError::new(
                    format!("{ctx}.expect"),
                    SchemaErrorKind::InvertedRange { min, max },
                ));
            }
        }
        for (j, expected) in case.expect.violations.iter().enumerate() {
            non_empty(&expected.rule, || format!("{ctx}.expect.violations[{j}].rule"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(yaml: &str) -> Voice {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn empty_avoid_list_is_rejected_with_path() {
        let v = voice(
            "name: v\nvocabulary:\n  rules:\n    - preferred: use\n      avoid: [utilize]\n    - preferred: help\n      avoid: []\n",
        );
        let err = validate_voice(&v).unwrap_err();
        assert_eq!(err.context, "vocabulary.rules[1].avoid");
        assert_eq!(err.kind, SchemaErrorKind::Empty);
        assert_eq!(err.to_string(), "vocabulary.rules[1].avoid: must not be empty");
    }

    #[test]
    fn tone_weight_must_be_in_unit_range() {
        let v = voice("name: v\ntone:\n  attributes:\n    - name: warm\n      weight: 1.5\n");
        let err = validate_voice(&v).unwrap_err();
        assert_eq!(err.context, "tone.attributes[0].weight");
    }

    #[test]
    fn zero_sentence_length_is_rejected() {
        let v = voice("name: v\nconstraints:\n  maxSentenceLength: 0\n");
        assert_eq!(
            validate_voice(&v).unwrap_err().context,
            "constraints.maxSentenceLength"
        );
    }

    #[test]
    fn valid_voice_passes() {
        let v = voice(
            "name: v\nvocabulary:\n  forbidden: [synergy]\nconstraints:\n  maxSentenceLength: 25\n",
        );
        assert!(validate_voice(&v).is_ok());
    }

    #[test]
    fn manifest_min_score_capped_at_100() {
        let m: Manifest =
            serde_yaml::from_str("name: p\nversion: '1'\nconfig:\n  minScore: 120\n").unwrap();
        let err = validate_manifest(&m).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::ScoreOutOfRange(120));
    }

    #[test]
    fn manifest_requires_name() {
        let m = Manifest::new("  ", "1.0.0");
        assert_eq!(validate_manifest(&m).unwrap_err().context, "name");
    }

    #[test]
    fn inverted_score_bounds_are_rejected() {
        let suite: TestSuite = serde_yaml::from_str(
            "tests:\n  - id: t\n    name: t\n    input: x\n    expect:\n      minScore: 90\n      maxScore: 50\n",
        )
        .unwrap();
        let err = validate_tests(&suite).unwrap_err();
        assert_eq!(err.context, "tests[0].expect");
        assert_eq!(err.kind, SchemaErrorKind::InvertedRange { min: 90, max: 50 });
    }
}
