//! Context types for rule execution.

use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledCtaRules, CompiledRules};
use crate::pack::{CtaRules, Pack, Voice};

/// Kind of content being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Interface copy: buttons, labels, empty states.
    UiCopy,
    /// Marketing copy.
    Marketing,
    /// Documentation.
    Docs,
    /// Support replies and help articles.
    Support,
    /// Anything else.
    General,
}

impl ContentType {
    /// Returns the kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UiCopy => "ui-copy",
            Self::Marketing => "marketing",
            Self::Docs => "docs",
            Self::Support => "support",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ui-copy" => Ok(Self::UiCopy),
            "marketing" => Ok(Self::Marketing),
            "docs" => Ok(Self::Docs),
            "support" => Ok(Self::Support),
            "general" => Ok(Self::General),
            other => Err(format!(
                "unknown content type `{other}`, expected: ui-copy, marketing, docs, support, general"
            )),
        }
    }
}

/// Where a piece of text will be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentContext {
    /// Content type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// UI component, e.g. "button".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl ContentContext {
    /// Context for a UI component.
    #[must_use]
    pub fn component(component: impl Into<String>) -> Self {
        Self {
            content_type: None,
            component: Some(component.into()),
        }
    }

    /// Context for a content type.
    #[must_use]
    pub fn of_type(content_type: ContentType) -> Self {
        Self {
            content_type: Some(content_type),
            component: None,
        }
    }

    /// Returns true if the component is a button.
    #[must_use]
    pub fn is_button(&self) -> bool {
        self.component
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("button"))
    }
}

/// Everything a rule needs to check one text.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The text under validation.
    pub text: &'a str,
    /// Voice of the pack.
    pub voice: &'a Voice,
    /// Compiled voice matchers.
    pub compiled: &'a CompiledRules,
    /// CTA rules of the pack.
    pub cta_rules: &'a CtaRules,
    /// Compiled CTA matchers.
    pub compiled_cta: &'a CompiledCtaRules,
    /// Caller-supplied content context.
    pub content: Option<&'a ContentContext>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context over a pack, compiling its matchers on first use.
    #[must_use]
    pub fn new(pack: &'a Pack, text: &'a str, content: Option<&'a ContentContext>) -> Self {
        Self {
            text,
            voice: &pack.voice,
            compiled: pack.voice.compiled(),
            cta_rules: &pack.cta_rules,
            compiled_cta: pack.cta_rules.compiled(),
            content,
        }
    }

    /// Number of whitespace-separated words in the text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Returns true if the caller marked the text as a button.
    #[must_use]
    pub fn is_button(&self) -> bool {
        self.content.is_some_and(ContentContext::is_button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_round_trips_kebab_case() {
        let ctx: ContentContext =
            serde_yaml::from_str("type: ui-copy\ncomponent: button\n").unwrap();
        assert_eq!(ctx.content_type, Some(ContentType::UiCopy));
        assert!(ctx.is_button());
        assert_eq!("ui-copy".parse::<ContentType>(), Ok(ContentType::UiCopy));
        assert!("blog".parse::<ContentType>().is_err());
    }

    #[test]
    fn button_detection_ignores_case() {
        assert!(ContentContext::component("Button").is_button());
        assert!(!ContentContext::component("hero").is_button());
        assert!(!ContentContext::of_type(ContentType::Docs).is_button());
    }
}
