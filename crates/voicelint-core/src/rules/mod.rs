//! Built-in voice rules.
//!
//! | Rule | Emits | Severity |
//! |------|-------|----------|
//! | [`ForbiddenTerms`] | `vocabulary.forbidden` | error |
//! | [`PreferredTerms`] | `vocabulary.preferred` | pack policy |
//! | [`DoNotPatterns`] | `doNot.*` | per pattern |
//! | [`SentenceLength`] | `constraints.maxSentenceLength` | error |
//! | [`ParagraphLength`] | `constraints.maxParagraphLength` | info |
//! | [`Contractions`] | `constraints.contractions` | warning / info |
//! | [`OxfordComma`] | `constraints.oxfordComma` | info |
//! | [`CtaAntiPatterns`] | `cta.antiPattern` | per pattern |
//! | [`CtaGuidelines`] | `cta.maxWords`, `cta.avoidWord`, `cta.capitalization` | info / error |
//! | [`CtaContextual`] | `cta.contextForbidden` | warning |

mod constraints;
mod cta;
mod do_not;
mod vocabulary;

pub use constraints::{Contractions, OxfordComma, ParagraphLength, SentenceLength};
pub use cta::{CtaAntiPatterns, CtaContextual, CtaGuidelines, SHORT_TEXT_WORDS};
pub use do_not::DoNotPatterns;
pub use vocabulary::{ForbiddenTerms, PreferredTerms};

use crate::rule::RuleBox;

/// Returns every built-in rule in evaluation order.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ForbiddenTerms),
        Box::new(PreferredTerms),
        Box::new(DoNotPatterns),
        Box::new(SentenceLength),
        Box::new(ParagraphLength),
        Box::new(Contractions),
        Box::new(OxfordComma),
        Box::new(CtaAntiPatterns),
        Box::new(CtaGuidelines),
        Box::new(CtaContextual),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_names_are_unique() {
        let rules = default_rules();
        let names: HashSet<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), rules.len());
        assert!(rules.iter().all(|r| !r.description().is_empty()));
    }
}
