//! Rule trait for defining voice checks.

use crate::context::RuleContext;
use crate::types::Violation;

/// A check run against one text.
///
/// Rules read the pack through [`RuleContext`] and never mutate it. The
/// validator assigns violation ids, so rules leave [`Violation::id`] empty.
///
/// # Example
///
/// ```
/// use voicelint_core::{Rule, RuleContext, Severity, Violation};
///
/// pub struct NoExclamations;
///
/// impl Rule for NoExclamations {
///     fn name(&self) -> &'static str { "custom.noExclamations" }
///
///     fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
///         ctx.text
///             .match_indices('!')
///             .map(|(i, m)| {
///                 Violation::new(self.name(), Severity::Info, "Avoid exclamation marks")
///                     .at(ctx.text, i, i + m.len())
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Dotted rule id, or the id prefix for rules that emit several
    /// (e.g., "doNot").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks the text and returns any violations found, in text order.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pack;
    use crate::types::Severity;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test.rule"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
            vec![Violation::new(self.name(), Severity::Info, "Test violation").at(ctx.text, 0, 4)]
        }
    }

    #[test]
    fn test_rule_trait() {
        let p = pack("name: v\n");
        let ctx = RuleContext::new(&p, "text here", None);
        let rule = TestRule;
        assert_eq!(rule.name(), "test.rule");
        assert_eq!(rule.description(), "A test rule");
        let found = rule.check(&ctx);
        assert_eq!(found[0].text.as_deref(), Some("text"));
    }
}
