//! Symbolic alias rewriting.
//!
//! Machine descriptions may name hardware positions symbolically and supply
//! rules that rewrite those names into concrete addresses. Rules run in the
//! order given, each seeing the output of the previous one.

use std::fmt;
use std::sync::Arc;

type Matcher = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type Rewrite = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// An ordered (matcher, rewrite) pair applied to a position code.
#[derive(Clone)]
pub struct AliasRule {
    pattern: String,
    matcher: Matcher,
    rewrite: Rewrite,
}

impl AliasRule {
    /// Creates a rule from arbitrary matcher and rewrite closures.
    ///
    /// `pattern` is only used to describe the rule.
    pub fn new<M, R>(pattern: impl Into<String>, matcher: M, rewrite: R) -> Self
    where
        M: Fn(&str) -> bool + Send + Sync + 'static,
        R: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            pattern: pattern.into(),
            matcher: Arc::new(matcher),
            rewrite: Arc::new(rewrite),
        }
    }

    /// Replaces every occurrence of `pattern` with `replacement`.
    #[must_use]
    pub fn substring(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let replacement = replacement.into();
        let needle = pattern.clone();
        let find = pattern.clone();
        Self::new(
            pattern,
            move |code| !find.is_empty() && code.contains(find.as_str()),
            move |code| code.replace(needle.as_str(), &replacement),
        )
    }

    /// Replaces the whole code when it equals `pattern` exactly.
    #[must_use]
    pub fn exact(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let replacement = replacement.into();
        let find = pattern.clone();
        Self::new(pattern, move |code| code == find, move |_| replacement.clone())
    }

    /// Replaces a leading `prefix` with `replacement`, keeping the remainder.
    #[must_use]
    pub fn prefix(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let replacement = replacement.into();
        let find = prefix.clone();
        let strip = prefix.clone();
        Self::new(
            prefix,
            move |code| !find.is_empty() && code.starts_with(find.as_str()),
            move |code| {
                let rest = code.strip_prefix(strip.as_str()).unwrap_or(code);
                format!("{replacement}{rest}")
            },
        )
    }

    /// The pattern this rule was built from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if this rule applies to `code`.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        (self.matcher)(code)
    }

    /// Rewrites `code` if the rule applies, otherwise returns it unchanged.
    #[must_use]
    pub fn apply(&self, code: &str) -> String {
        if self.matches(code) {
            (self.rewrite)(code)
        } else {
            code.to_string()
        }
    }
}

impl fmt::Debug for AliasRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasRule")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Applies every rule to `code` in order and returns the rewritten code.
///
/// Returns `code` unchanged when no rule matches.
#[must_use]
pub fn resolve_alias(code: &str, rules: &[AliasRule]) -> String {
    rules
        .iter()
        .fold(code.to_string(), |current, rule| rule.apply(&current))
}
