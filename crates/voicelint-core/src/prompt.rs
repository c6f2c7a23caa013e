//! Prompts for handing a rewrite to a language model.
//!
//! Only the text is built here; sending it anywhere is the caller's job.

use std::fmt::Write;

use serde::Serialize;

use crate::context::ContentContext;
use crate::pack::Pack;
use crate::types::Violation;

const MAX_ATTRIBUTES: usize = 3;
const MAX_VOCABULARY_RULES: usize = 10;
const MAX_FORBIDDEN: usize = 15;
const MAX_DO_NOT: usize = 10;
const MAX_VIOLATIONS: usize = 10;

/// System and user prompt for a model-assisted rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewritePrompt {
    /// Brand voice description and editing instructions.
    pub system: String,
    /// The text, its context, and the violations to fix.
    pub user: String,
}

impl RewritePrompt {
    /// Builds both prompts from a pack and a validation run.
    #[must_use]
    pub fn build(
        pack: &Pack,
        text: &str,
        violations: &[Violation],
        context: Option<&ContentContext>,
    ) -> Self {
        Self {
            system: system_prompt(pack),
            user: user_prompt(text, violations, context),
        }
    }
}

fn system_prompt(pack: &Pack) -> String {
    let voice = &pack.voice;
    let mut out = String::from(
        "You are a brand copy editor. Your job is to rewrite text to match a specific brand voice while fixing style violations.\n\nBRAND VOICE:\n",
    );

    if let Some(summary) = &voice.tone.summary {
        let _ = writeln!(out, "Tone: {summary}");
    }

    let mut attributes: Vec<_> = voice.tone.attributes.iter().collect();
    attributes.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    if !attributes.is_empty() {
        let names: Vec<&str> = attributes
            .iter()
            .take(MAX_ATTRIBUTES)
            .map(|a| a.name.as_str())
            .collect();
        let _ = writeln!(out, "Key attributes: {}", names.join(", "));
    }

    if !voice.vocabulary.rules.is_empty() {
        out.push_str("\nVOCABULARY RULES:\n");
        for rule in voice.vocabulary.rules.iter().take(MAX_VOCABULARY_RULES) {
            let _ = writeln!(
                out,
                "- Use \"{}\" instead of: {}",
                rule.preferred,
                rule.avoid.join(", ")
            );
        }
    }

    if !voice.vocabulary.forbidden.is_empty() {
        let forbidden: Vec<&str> = voice
            .vocabulary
            .forbidden
            .iter()
            .take(MAX_FORBIDDEN)
            .map(String::as_str)
            .collect();
        let _ = writeln!(
            out,
            "\nFORBIDDEN WORDS (never use):\n{}",
            forbidden.join(", ")
        );
    }

    if !voice.do_not.is_empty() {
        out.push_str("\nPATTERNS TO AVOID:\n");
        for rule in voice.do_not.iter().take(MAX_DO_NOT) {
            let _ = writeln!(out, "- \"{}\": {}", rule.pattern, rule.reason);
            if let Some(suggestion) = &rule.suggestion {
                let _ = writeln!(out, "  Suggestion: {suggestion}");
            }
        }
    }

    out.push_str(
        "\nINSTRUCTIONS:\n\
         1. Fix all violations while preserving the original meaning\n\
         2. Match the brand voice and tone described above\n\
         3. Keep the same approximate length\n\
         4. Preserve proper nouns, technical terms, and product names\n\
         5. Return ONLY the rewritten text, no explanations or quotes\n",
    );
    out
}

fn user_prompt(text: &str, violations: &[Violation], context: Option<&ContentContext>) -> String {
    let mut out = String::new();

    if let Some(ctx) = context {
        if let Some(content_type) = ctx.content_type {
            let _ = writeln!(out, "Content type: {content_type}");
        }
        if let Some(component) = &ctx.component {
            let _ = writeln!(out, "UI component: {component}");
        }
    }

    let _ = writeln!(out, "\nTEXT TO REWRITE:\n\"{text}\"");

    if !violations.is_empty() {
        out.push_str("\nVIOLATIONS TO FIX:\n");
        for v in violations.iter().take(MAX_VIOLATIONS) {
            match &v.suggestion {
                Some(s) => {
                    let _ = writeln!(out, "- {} (suggestion: {})", v.message, s.message);
                }
                None => {
                    let _ = writeln!(out, "- {}", v.message);
                }
            }
        }
    }

    out.push_str(
        "\nRewrite the text to fix these issues while maintaining the brand voice. Return only the rewritten text.",
    );
    out
}
