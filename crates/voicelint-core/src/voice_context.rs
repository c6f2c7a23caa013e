//! Picks a pack for a text from its content category.
//!
//! Selection is a fixed cascade, so identical input always yields the
//! same context and pack:
//!
//! 1. an explicitly preferred pack that exists (confidence 1.0),
//! 2. channel / content-type hints in the metadata,
//! 3. keyword lists over the text and subject
//!    (legal, support, sales, marketing, product, internal),
//! 4. `email`.
//!
//! The chosen context is then resolved through the explicit mapping table
//! (confidence 0.8) or the default pack (confidence 0.6).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pack::PackCatalog;

/// Content category used to route a text to a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceContext {
    /// Email.
    Email,
    /// Blog posts and articles.
    Blog,
    /// Social media.
    Social,
    /// Marketing announcements.
    Marketing,
    /// Customer support.
    Support,
    /// Legal and compliance copy.
    Legal,
    /// Internal communication.
    Internal,
    /// Product and release notes.
    Product,
    /// Sales and pricing.
    Sales,
}

impl VoiceContext {
    /// All contexts in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Email,
        Self::Blog,
        Self::Social,
        Self::Marketing,
        Self::Support,
        Self::Legal,
        Self::Internal,
        Self::Product,
        Self::Sales,
    ];

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Blog => "blog",
            Self::Social => "social",
            Self::Marketing => "marketing",
            Self::Support => "support",
            Self::Legal => "legal",
            Self::Internal => "internal",
            Self::Product => "product",
            Self::Sales => "sales",
        }
    }
}

impl std::fmt::Display for VoiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoiceContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown context `{s}` (expected one of: {})", names.join(", "))
            })
    }
}

/// Hints about where a text will be published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMetadata {
    /// Delivery channel, e.g. "email" or "twitter".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Subject line or title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Intended audience. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    /// Free-form content type, e.g. "article".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Pack to use if it exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_pack: Option<String>,
}

/// Explicit context → pack mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualVoice {
    /// Context being mapped.
    pub context: VoiceContext,
    /// Pack name.
    #[serde(alias = "packName")]
    pub pack: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Routing table for a [`VoiceContextManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiVoiceConfig {
    /// Pack for contexts without an explicit mapping.
    pub default_pack: String,
    /// Wins over `default_pack` when falling back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_pack: Option<String>,
    /// Explicit mappings, at most one per context.
    #[serde(default, alias = "contextPacks")]
    pub contexts: Vec<ContextualVoice>,
}

impl Default for MultiVoiceConfig {
    fn default() -> Self {
        Self {
            default_pack: "saas".to_string(),
            fallback_pack: None,
            contexts: Vec::new(),
        }
    }
}

impl MultiVoiceConfig {
    fn fallback(&self) -> &str {
        self.fallback_pack.as_deref().unwrap_or(&self.default_pack)
    }
}

/// Outcome of [`VoiceContextManager::select_voice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    /// Selected pack.
    pub pack_name: String,
    /// Detected context.
    pub context: VoiceContext,
    /// 1.0 explicit pack, 0.8 mapped context, 0.6 default fallback.
    pub confidence: f64,
    /// Human-readable reason.
    pub reason: String,
}

/// One row of [`VoiceContextManager::list_context_mappings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMapping {
    /// Context.
    pub context: VoiceContext,
    /// Pack it resolves to.
    pub pack_name: String,
    /// Whether the pack comes from the default rather than a mapping.
    pub is_default: bool,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

const LEGAL_KEYWORDS: &[&str] = &[
    "terms of service",
    "privacy policy",
    "legal",
    "disclaimer",
    "liability",
    "warranty",
    "agreement",
    "contract",
    "compliance",
    "gdpr",
    "ccpa",
    "terms and conditions",
    "intellectual property",
];

const SUPPORT_KEYWORDS: &[&str] = &[
    "help",
    "support",
    "issue",
    "problem",
    "bug",
    "error",
    "troubleshoot",
    "assistance",
    "contact us",
    "customer service",
    "ticket",
    "resolve",
    "solution",
    "how to",
    "faq",
];

const SALES_KEYWORDS: &[&str] = &[
    "pricing",
    "buy",
    "purchase",
    "sale",
    "discount",
    "offer",
    "free trial",
    "demo",
    "quote",
    "proposal",
    "upgrade",
    "plan",
    "package",
    "subscription",
    "billing",
];

const MARKETING_KEYWORDS: &[&str] = &[
    "newsletter",
    "announcement",
    "launch",
    "new feature",
    "campaign",
    "promotion",
    "webinar",
    "event",
    "update",
    "introducing",
    "excited to share",
    "now available",
];

const PRODUCT_KEYWORDS: &[&str] = &[
    "feature",
    "functionality",
    "release",
    "version",
    "update",
    "changelog",
    "roadmap",
    "development",
    "improvement",
    "enhancement",
    "specification",
    "documentation",
];

const INTERNAL_KEYWORDS: &[&str] = &[
    "team",
    "internal",
    "employee",
    "staff",
    "meeting",
    "memo",
    "hr",
    "onboarding",
    "policy",
    "process",
    "workflow",
    "project",
    "deadline",
    "status update",
];

/// Keyword lists in the order they are tried.
const KEYWORD_CHECKS: [(VoiceContext, &[&str]); 6] = [
    (VoiceContext::Legal, LEGAL_KEYWORDS),
    (VoiceContext::Support, SUPPORT_KEYWORDS),
    (VoiceContext::Sales, SALES_KEYWORDS),
    (VoiceContext::Marketing, MARKETING_KEYWORDS),
    (VoiceContext::Product, PRODUCT_KEYWORDS),
    (VoiceContext::Internal, INTERNAL_KEYWORDS),
];

/// Writing tips for a context.
#[must_use]
pub fn contextual_tips(context: VoiceContext) -> &'static [&'static str; 4] {
    match context {
        VoiceContext::Email => &[
            "Use clear, actionable subject lines",
            "Keep paragraphs short for mobile reading",
            "Include clear CTAs",
            "Use personal pronouns appropriately",
        ],
        VoiceContext::Blog => &[
            "Write scannable headlines",
            "Use subheadings to break up content",
            "Include takeaways and actionable insights",
            "Optimize for SEO while maintaining voice",
        ],
        VoiceContext::Social => &[
            "Keep it concise and engaging",
            "Use platform-appropriate tone",
            "Include relevant hashtags",
            "Encourage interaction",
        ],
        VoiceContext::Marketing => &[
            "Focus on benefits over features",
            "Create urgency without pressure",
            "Use social proof",
            "Include clear value propositions",
        ],
        VoiceContext::Support => &[
            "Be empathetic and solution-focused",
            "Use clear, step-by-step instructions",
            "Acknowledge customer concerns",
            "Provide escalation paths",
        ],
        VoiceContext::Legal => &[
            "Use plain language when possible",
            "Be precise and unambiguous",
            "Include necessary disclaimers",
            "Follow compliance requirements",
        ],
        VoiceContext::Internal => &[
            "Be direct and efficient",
            "Use company-specific terminology",
            "Focus on actions and outcomes",
            "Consider company culture",
        ],
        VoiceContext::Product => &[
            "Focus on user value",
            "Use consistent terminology",
            "Be clear about functionality",
            "Consider technical audience",
        ],
        VoiceContext::Sales => &[
            "Focus on customer needs",
            "Use consultative approach",
            "Be specific about value",
            "Create trust and credibility",
        ],
    }
}

/// Selects packs by content context.
///
/// The catalog is the whitelist of pack names; a [`crate::PackStore`]
/// lists its root directory, tests can pass a plain `Vec<String>`.
///
/// ```
/// use voicelint_core::{VoiceContext, VoiceContextManager, MultiVoiceConfig};
///
/// let packs = vec!["saas".to_string()];
/// let manager = VoiceContextManager::new(MultiVoiceConfig::default(), packs);
/// let selection = manager.select_voice("Read our privacy policy.", None);
/// assert_eq!(selection.context, VoiceContext::Legal);
/// assert_eq!(selection.pack_name, "saas");
/// ```
#[derive(Debug, Clone)]
pub struct VoiceContextManager<C> {
    config: MultiVoiceConfig,
    catalog: C,
}

impl<C: PackCatalog> VoiceContextManager<C> {
    /// Creates a manager over `catalog`.
    #[must_use]
    pub fn new(config: MultiVoiceConfig, catalog: C) -> Self {
        Self { config, catalog }
    }

    /// Current routing table.
    #[must_use]
    pub fn config(&self) -> &MultiVoiceConfig {
        &self.config
    }

    /// Replaces the routing table.
    pub fn update_config(&mut self, config: MultiVoiceConfig) {
        self.config = config;
    }

    /// Maps `context` to `pack`, replacing any existing mapping.
    pub fn add_context_voice(&mut self, voice: ContextualVoice) {
        self.config.contexts.retain(|c| c.context != voice.context);
        self.config.contexts.push(voice);
    }

    /// Removes the mapping for `context`. Returns whether one existed.
    pub fn remove_context_voice(&mut self, context: VoiceContext) -> bool {
        let before = self.config.contexts.len();
        self.config.contexts.retain(|c| c.context != context);
        self.config.contexts.len() != before
    }

    /// Classifies `text` without resolving a pack.
    #[must_use]
    pub fn detect_context(&self, text: &str, metadata: Option<&VoiceMetadata>) -> VoiceContext {
        detect_context(text, metadata)
    }

    /// Selects a pack for `text`.
    #[must_use]
    pub fn select_voice(&self, text: &str, metadata: Option<&VoiceMetadata>) -> VoiceSelection {
        let context = detect_context(text, metadata);

        let preferred = metadata.and_then(|m| m.preferred_pack.as_deref());
        if let Some(pack) = preferred {
            if self.catalog.contains_pack(pack) {
                return self.selected(pack, context, 1.0, "Explicitly requested".to_string());
            }
            debug!(pack, "preferred pack is not available, ignoring");
        }

        let mapped = self
            .config
            .contexts
            .iter()
            .find(|c| c.context == context && self.catalog.contains_pack(&c.pack));
        if let Some(mapping) = mapped {
            return self.selected(
                &mapping.pack,
                context,
                0.8,
                format!("Matched context: {context}"),
            );
        }

        self.selected(
            self.config.fallback(),
            context,
            0.6,
            format!("Using default pack for context: {context}"),
        )
    }

    fn selected(
        &self,
        pack: &str,
        context: VoiceContext,
        confidence: f64,
        reason: String,
    ) -> VoiceSelection {
        debug!(pack, %context, confidence, "selected voice");
        VoiceSelection {
            pack_name: pack.to_string(),
            context,
            confidence,
            reason,
        }
    }

    /// One row per context: explicit mappings first, then the contexts
    /// that fall back to the default pack, in canonical order.
    #[must_use]
    pub fn list_context_mappings(&self) -> Vec<ContextMapping> {
        let mut rows: Vec<ContextMapping> = self
            .config
            .contexts
            .iter()
            .map(|c| ContextMapping {
                context: c.context,
                pack_name: c.pack.clone(),
                is_default: false,
                description: c.description.clone(),
            })
            .collect();

        for context in VoiceContext::ALL {
            if self.config.contexts.iter().any(|c| c.context == context) {
                continue;
            }
            rows.push(ContextMapping {
                context,
                pack_name: self.config.default_pack.clone(),
                is_default: true,
                description: Some("Falls back to default pack".to_string()),
            });
        }
        rows
    }

    /// Writing tips for a context.
    #[must_use]
    pub fn contextual_tips(&self, context: VoiceContext) -> &'static [&'static str; 4] {
        contextual_tips(context)
    }
}

/// Classifies a text into a [`VoiceContext`].
#[must_use]
pub fn detect_context(text: &str, metadata: Option<&VoiceMetadata>) -> VoiceContext {
    let channel = metadata
        .and_then(|m| m.channel.as_deref())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let content_type = metadata
        .and_then(|m| m.content_type.as_deref())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if channel.contains("email") || content_type.contains("email") {
        return VoiceContext::Email;
    }
    if ["social", "twitter", "linkedin"]
        .iter()
        .any(|k| channel.contains(k))
    {
        return VoiceContext::Social;
    }
    if channel.contains("blog") || content_type.contains("blog") || content_type.contains("article")
    {
        return VoiceContext::Blog;
    }

    let text = text.to_lowercase();
    let subject = metadata
        .and_then(|m| m.subject.as_deref())
        .map(str::to_lowercase)
        .unwrap_or_default();
    KEYWORD_CHECKS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|k| text.contains(k) || subject.contains(k))
        })
        .map_or(VoiceContext::Email, |(context, _)| *context)
}
