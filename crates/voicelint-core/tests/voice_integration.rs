//! Integration test: validation, rewriting, voice selection, and the pack
//! test runner against the `acme` fixture pack.

use std::path::PathBuf;

use voicelint_core::{
    load_pack, rewrite, run_pack_tests, validate, ContentContext, ContextualVoice, LoadOptions,
    MultiVoiceConfig, Pack, PackStore, RewriteMode, Rewriter, Severity, VoiceContext,
    VoiceContextManager, VoiceMetadata,
};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/packs")
}

fn acme() -> Pack {
    load_pack(&fixture_root().join("acme"))
        .expect("acme should load")
        .pack
}

// ── Validation ──

#[test]
fn clean_text_scores_100() {
    let result = validate(&acme(), "We help small teams ship better software every week.", None);
    assert_eq!(result.score, 100);
    assert!(result.violations.is_empty());
    assert!(result.valid);
    assert_eq!(result.metadata.pack_name, "acme");
    assert_eq!(result.metadata.pack_version, "1.2.0");
}

#[test]
fn whitelisted_acronyms_are_not_flagged() {
    let pack = acme();

    let allowed = validate(&pack, "HIPAA requires disclosure", None);
    assert!(allowed.by_rule("doNot").is_empty());

    let shouting = validate(&pack, "EXCESSIVE USE", None);
    let flagged = shouting.by_rule("doNot");
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].rule, "doNot.pattern-1");
    assert_eq!(flagged[0].text.as_deref(), Some("EXCESSIVE"));
    assert_eq!(flagged[0].severity, Severity::Warning);
}

#[test]
fn scores_and_positions_hold_for_assorted_texts() {
    let pack = acme();
    let texts = [
        "",
        "   ",
        "Click here",
        "submit",
        "Utilize synergy going forward. Utilize it again, LOUDLY.",
        "Ünïcödé synergy; and then going forward with SHOUTING!",
        "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone.",
    ];
    for text in texts {
        let result = validate(&pack, text, None);
        assert!(result.score <= 100);
        assert_eq!(
            result.summary.errors + result.summary.warnings + result.summary.info,
            result.violations.len(),
            "summary mismatch for {text:?}"
        );
        for v in &result.violations {
            let pos = v.position.expect("every built-in violation has a position");
            assert!(pos.start <= pos.end && pos.end <= text.len());
            assert_eq!(Some(&text[pos.start..pos.end]), v.text.as_deref());
        }
        let mut ids: Vec<&str> = result.violations.iter().map(|v| v.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), result.violations.len());
    }
}

#[test]
fn long_sentences_are_errors() {
    let text = "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone.";
    let result = validate(&acme(), text, None);
    let long = result.by_rule("constraints.maxSentenceLength");
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].message, "Sentence has 21 words, max is 20");
    assert!(!result.valid);
}

#[test]
fn button_copy_follows_cta_guidelines() {
    let pack = acme();
    let button = ContentContext::component("button");

    let result = validate(&pack, "Click here", Some(&button));
    let rules: Vec<&str> = result.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["cta.antiPattern", "cta.avoidWord"]);

    let dialog = ContentContext::component("dialog");
    let result = validate(&pack, "OK", Some(&dialog));
    assert_eq!(result.by_rule("cta.contextForbidden").len(), 1);
    assert_eq!(
        result.violations[0]
            .suggestion
            .as_ref()
            .map(|s| s.message.as_str()),
        Some("Try: Delete project")
    );
}

// ── Rewriting ──

#[test]
fn rewrite_applies_fixes_and_is_idempotent() {
    let pack = acme();
    let first = rewrite(&pack, "Utilize synergy going forward.", None);
    assert_eq!(first.rewritten, "Use synergy from now on.");
    assert_eq!(first.changes.len(), 2);
    assert_eq!(first.changes[0].original, "Utilize");
    assert_eq!(first.changes[1].original, "going forward");
    assert!(first.score.after > first.score.before);

    let second = rewrite(&pack, &first.rewritten, None);
    assert!(second.changes.is_empty());
    assert_eq!(second.rewritten, first.rewritten);
}

#[test]
fn minimal_mode_leaves_warnings_alone() {
    let pack = acme();
    let result = Rewriter::new(&pack)
        .mode(RewriteMode::Minimal)
        .rewrite("Utilize synergy going forward.", None);
    assert_eq!(result.rewritten, "Use synergy going forward.");
}

#[test]
fn edited_voice_is_revalidated() {
    let mut pack = acme();
    assert!(validate(&pack, "Pure teamwork.", None).violations.is_empty());

    pack.voice.edit(|voice| voice.vocabulary.forbidden.push("teamwork".into()));
    let result = validate(&pack, "Pure teamwork.", None);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, "vocabulary.forbidden");
}

#[test]
fn overlapping_fixes_apply_once() {
    let mut pack = acme();
    pack.voice.edit(|voice| {
        voice.vocabulary.rules.push(voicelint_core::pack::VocabularyRule {
            preferred: "ahead".into(),
            avoid: vec!["forward".into()],
            context: None,
            severity: None,
        });
    });

    let text = "Keep going forward today and tomorrow.";
    let result = rewrite(&pack, text, None);
    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].original, "forward");
    assert_eq!(result.rewritten, "Keep going ahead today and tomorrow.");
}

// ── Voice selection ──

#[test]
fn context_classification_resolves_packs() {
    let store = PackStore::new(fixture_root());
    let mut manager = VoiceContextManager::new(
        MultiVoiceConfig {
            default_pack: "acme".into(),
            ..MultiVoiceConfig::default()
        },
        &store,
    );

    let legal = "Please review the Terms of Service and our GDPR commitments.";
    let sales = "Compare pricing tiers and start a free trial.";

    let selection = manager.select_voice(legal, None);
    assert_eq!(selection.context, VoiceContext::Legal);
    assert_eq!(selection.pack_name, "acme");
    assert!((selection.confidence - 0.6).abs() < f64::EPSILON);

    manager.add_context_voice(ContextualVoice {
        context: VoiceContext::Sales,
        pack: "acme".into(),
        description: None,
    });
    let selection = manager.select_voice(sales, None);
    assert_eq!(selection.context, VoiceContext::Sales);
    assert!((selection.confidence - 0.8).abs() < f64::EPSILON);

    let prefer = VoiceMetadata {
        preferred_pack: Some("broken".into()),
        ..VoiceMetadata::default()
    };
    let selection = manager.select_voice(sales, Some(&prefer));
    assert_eq!(selection.pack_name, "broken");
    assert!((selection.confidence - 1.0).abs() < f64::EPSILON);

    let loaded = store
        .load_named(&selection.pack_name, LoadOptions::default())
        .expect("selected pack loads");
    assert_eq!(loaded.pack.name(), "broken");
}

// ── Pack test runner ──

#[test]
fn fixture_pack_tests_pass() {
    let report = run_pack_tests(&acme(), None);
    assert_eq!(report.total(), 5);
    assert!(report.all_passed(), "{}", report.format_report());
}

#[test]
fn pack_tests_can_be_filtered_by_tag() {
    let report = run_pack_tests(&acme(), Some("vocabulary"));
    let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["vocab-01", "vocab-02"]);
}
