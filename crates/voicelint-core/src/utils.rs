//! Text helpers shared by rules and the rewriter.

use std::sync::OnceLock;

use regex::Regex;

/// Compiles a pattern built into this crate.
///
/// Pack-supplied patterns never come through here; they go through
/// [`crate::compiler`], which drops invalid ones.
#[allow(clippy::expect_used)]
pub(crate) fn builtin_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

/// Compiles a built-in pattern once and returns the cached matcher.
pub(crate) fn static_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| builtin_regex(pattern))
}

/// Lowercases `s` and joins alphanumeric runs with `-`.
///
/// ```
/// use voicelint_core::utils::slugify;
/// assert_eq!(slugify("Going Forward!"), "going-forward");
/// ```
#[must_use]
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Adapts the case of `replacement` to the text it replaces.
///
/// An all-caps original (two or more letters) gives an all-caps
/// replacement; a capitalized original capitalizes the first letter.
/// Otherwise the replacement is returned unchanged.
#[must_use]
pub fn match_case(original: &str, replacement: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if letters.first().is_some_and(|c| c.is_uppercase()) {
        return capitalize_first(replacement);
    }
    replacement.to_string()
}

/// Uppercases the first character.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Returns `(start, end)` of `s` with surrounding whitespace removed,
/// relative to `offset`.
pub(crate) fn trimmed_span(s: &str, offset: usize) -> Option<(usize, usize)> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = s.len() - s.trim_start().len();
    Some((offset + lead, offset + lead + trimmed.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("  Click -- HERE  "), "click-here");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn match_case_follows_original() {
        assert_eq!(match_case("Utilize", "use"), "Use");
        assert_eq!(match_case("UTILIZE", "use"), "USE");
        assert_eq!(match_case("utilize", "use"), "use");
        assert_eq!(match_case("I'm", "I am"), "I am");
        assert_eq!(match_case("i am", "I'm"), "I'm");
    }

    #[test]
    fn trimmed_span_skips_whitespace() {
        assert_eq!(trimmed_span("  abc ", 10), Some((12, 15)));
        assert_eq!(trimmed_span("   ", 0), None);
    }
}
