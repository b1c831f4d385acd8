use crate::errors::Result;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use tracing::debug;

/// A single `pattern -> replacement` substitution.
///
/// Patterns are regular expressions, matched case-sensitively. Replacement
/// text is inserted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl Rule {
    const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

/// The emerald-to-blue migration table.
///
/// Order matters: compound gradient patterns come before the single-class
/// patterns they contain, otherwise a short rule would rewrite part of a
/// gradient and the long rule would never match.
pub static COLOR_RULES: &[Rule] = &[
    // Gradients
    Rule::new(
        r"bg-gradient-to-r from-emerald-600 via-blue-600 to-purple-600",
        "bg-gradient-to-r from-blue-600 via-blue-700 to-blue-800",
    ),
    Rule::new(
        r"hover:from-emerald-700 hover:via-blue-700 hover:to-purple-700",
        "hover:from-blue-700 hover:via-blue-800 hover:to-blue-900",
    ),
    Rule::new(
        r"from-purple-600 via-blue-600 to-emerald-600",
        "from-blue-800 via-blue-700 to-blue-600",
    ),
    Rule::new(r"from-emerald-600 to-blue-600", "from-blue-600 to-blue-700"),
    Rule::new(
        r"hover:from-emerald-700 hover:to-blue-700",
        "hover:from-blue-700 hover:to-blue-800",
    ),
    // Gradients and borders with alpha
    Rule::new(
        r"bg-gradient-to-r from-emerald-600/20 via-blue-600/20 to-purple-600/20",
        "bg-gradient-to-r from-blue-600/20 via-blue-700/20 to-blue-800/20",
    ),
    Rule::new(r"border-emerald-600/30", "border-blue-600/30"),
    Rule::new(
        r"from-emerald-100 via-blue-100 to-purple-100",
        "from-blue-100 via-blue-200 to-blue-300",
    ),
    Rule::new(
        r"from-emerald-900/20 via-blue-900/20 to-purple-900/20",
        "from-blue-900/20 via-blue-800/20 to-blue-700/20",
    ),
    Rule::new(r"from-emerald-50 to-blue-50", "from-blue-50 to-blue-100"),
    // Single classes
    Rule::new(r"text-emerald-600", "text-blue-600"),
    Rule::new(r"text-emerald-500", "text-blue-500"),
    Rule::new(r"border-emerald-600", "border-blue-600"),
    Rule::new(r"border-emerald-500", "border-blue-500"),
    Rule::new(r"hover:text-emerald-600", "hover:text-blue-600"),
    Rule::new(r"hover:bg-emerald-600", "hover:bg-blue-600"),
    Rule::new(r"hover:border-emerald-600/30", "hover:border-blue-600/30"),
    Rule::new(r"bg-emerald-600", "bg-blue-600"),
    Rule::new(r"bg-emerald-700", "bg-blue-700"),
    Rule::new(r"bg-emerald-100", "bg-blue-100"),
    Rule::new(r"bg-emerald-900", "bg-blue-900"),
    Rule::new(r"hover:bg-emerald-700", "hover:bg-blue-700"),
    // Group hover
    Rule::new(r"group-hover:text-emerald-600", "group-hover:text-blue-600"),
];

/// The result of running a `RuleSet` over a piece of text.
#[derive(Debug)]
pub struct Transformed<'a> {
    pub content: Cow<'a, str>,
    /// Total substitutions across all rules.
    pub changes: usize,
    /// `true` when `content` differs from the input.
    pub modified: bool,
}

/// An ordered list of compiled rules.
pub struct RuleSet {
    rules: Vec<(Regex, &'static str)>,
}

impl RuleSet {
    /// Compiles `rules`, keeping their order.
    pub fn new(rules: &[Rule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|r| Ok((Regex::new(r.pattern)?, r.replacement)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The built-in color migration table.
    pub fn colors() -> Result<Self> {
        Self::new(COLOR_RULES)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule in order, each one to the output of the previous.
    ///
    /// Each rule replaces all non-overlapping matches. No allocation happens
    /// unless some rule matches.
    pub fn apply<'a>(&self, text: &'a str) -> Transformed<'a> {
        let mut content = Cow::Borrowed(text);
        let mut changes = 0;

        for (regex, replacement) in &self.rules {
            let matches = regex.find_iter(content.as_ref()).count();
            if matches == 0 {
                continue;
            }
            debug!(pattern = regex.as_str(), matches, "rule matched");
            changes += matches;
            content = Cow::Owned(
                regex
                    .replace_all(content.as_ref(), NoExpand(replacement))
                    .into_owned(),
            );
        }

        let modified = content.as_ref() != text;
        Transformed {
            content,
            changes,
            modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> RuleSet {
        RuleSet::colors().unwrap()
    }

    #[test]
    fn test_all_color_rules_compile() {
        assert_eq!(colors().len(), COLOR_RULES.len());
    }

    #[test]
    fn test_compound_gradient_wins_over_single_classes() {
        let out = colors().apply("bg-gradient-to-r from-emerald-600 via-blue-600 to-purple-600");
        assert_eq!(
            out.content,
            "bg-gradient-to-r from-blue-600 via-blue-700 to-blue-800"
        );
        assert!(out.modified);
        assert_eq!(out.changes, 1);
    }

    #[test]
    fn test_replacement_is_global() {
        let out = colors().apply("text-emerald-600 hover:text-emerald-600");
        assert_eq!(out.content, "text-blue-600 hover:text-blue-600");
        assert_eq!(out.changes, 2);
    }

    #[test]
    fn test_unrelated_text_is_borrowed() {
        let out = colors().apply("text-red-600");
        assert!(!out.modified);
        assert_eq!(out.changes, 0);
        assert!(matches!(out.content, Cow::Borrowed("text-red-600")));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let out = colors().apply("TEXT-EMERALD-600 Text-Emerald-600");
        assert!(!out.modified);
    }

    #[test]
    fn test_later_rules_see_earlier_output() {
        let rules = RuleSet::new(&[Rule::new("a", "b"), Rule::new("b", "c")]).unwrap();
        let out = rules.apply("ab");
        assert_eq!(out.content, "cc");
        assert_eq!(out.changes, 3);
    }

    #[test]
    fn test_replacement_is_not_expanded() {
        let rules = RuleSet::new(&[Rule::new("(x)", "$1-$0")]).unwrap();
        assert_eq!(rules.apply("x").content, "$1-$0");
    }

    #[test]
    fn test_changes_without_difference_is_unmodified() {
        let rules = RuleSet::new(&[Rule::new("same", "same")]).unwrap();
        let out = rules.apply("same");
        assert_eq!(out.changes, 1);
        assert!(!out.modified);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let input = r#"<div className="bg-emerald-600 hover:bg-emerald-700 border-emerald-600/30">
  <a className="group-hover:text-emerald-600 from-emerald-50 to-blue-50" />
  <p className="bg-gradient-to-r from-emerald-600/20 via-blue-600/20 to-purple-600/20" />
</div>
"#;
        let rules = colors();
        let first = rules.apply(input).content.into_owned();
        assert!(!first.contains("emerald"));

        let second = rules.apply(&first);
        assert!(!second.modified);
        assert_eq!(second.changes, 0);
    }

    #[test]
    fn test_outputs_never_reintroduce_patterns() {
        let rules = colors();
        for rule in COLOR_RULES {
            let out = rules.apply(rule.replacement);
            assert!(!out.modified, "{} is rewritten again", rule.replacement);
        }
    }
}
