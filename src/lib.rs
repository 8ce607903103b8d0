extern crate self as deinflector;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
pub mod errors;
pub mod languages;
pub mod processors;

pub use api::{
    Candidate, DeinflectDetails, Deinflector, Language, VariantRun, deinflect, deinflect_verbose_with, deinflect_with,
};
pub use engine::{
    BudgetExceeded, CompiledRule, CompiledTransform, ConditionMask, ConditionRegistry, DEFAULT_MAX_DEPTH,
    DeinflectionResult, InflectionRule, LevelMetrics, MAX_LEAF_CONDITIONS, MaskFlags, Resolution, ResolveMetrics,
    ResolveOptions, Resolver, RuleFault, TraceFrame, TransformDescriptor, resolve, resolve_with,
};
pub use errors::{ConfigurationError, DeinflectError};

// --- Configuration model -----------------------------------------------------
//
// Everything below is the *declarative* side of a language table. Tables are
// plain values; `TransformDescriptor::compile` validates them and turns
// condition ids into masks.

/// A grammatical condition (part of speech, number, tense, ...).
///
/// A condition without `sub_conditions` is a leaf and owns one bit of the
/// language's condition mask. A condition with sub-conditions stands for
/// "any of" them and expands to the union of their bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Whether a candidate carrying this condition is an acceptable lemma.
    pub is_dictionary_form: bool,
    pub sub_conditions: &'static [&'static str],
}

impl Condition {
    pub fn is_leaf(&self) -> bool {
        self.sub_conditions.is_empty()
    }
}

/// Rewrite function of an `Other` rule.
pub type Deinflect = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Match function for predicate patterns.
pub type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Matcher used by `Other` rules: either a regular expression or an arbitrary
/// predicate over the current text.
pub enum Pattern {
    /// Match a regular expression anywhere in the text (anchor it when the
    /// rule needs to). Usually built with `re!`, which compiles the
    /// expression once per call site.
    Regex(Regex),

    /// Match with a closure. Used for matchers regular expressions cannot
    /// express without look-around (word-order rewrites, "not at the start").
    Predicate(Predicate),
}

impl Pattern {
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(text),
            Pattern::Predicate(pred) => pred(text),
        }
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Pattern::Predicate(_) => f.write_str("Predicate(<function>)"),
        }
    }
}

/// Structural variant of a rule.
///
/// The literal variants carry their strings as data so the resolver can
/// match them without calling into user code; only `Other` runs a closure.
pub enum RuleKind {
    Prefix { inflected: String, deinflected: String },
    Suffix { inflected: String, deinflected: String },
    WholeWord { inflected: String, deinflected: String },
    Other { pattern: Pattern, deinflect: Deinflect },
}

impl std::fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Prefix { inflected, deinflected } => write!(f, "Prefix({inflected:?} -> {deinflected:?})"),
            RuleKind::Suffix { inflected, deinflected } => write!(f, "Suffix({inflected:?} -> {deinflected:?})"),
            RuleKind::WholeWord { inflected, deinflected } => {
                write!(f, "WholeWord({inflected:?} -> {deinflected:?})")
            }
            RuleKind::Other { pattern, .. } => f.debug_struct("Other").field("pattern", pattern).finish(),
        }
    }
}

/// A single reversible transformation: recognize an inflected shape and
/// rewrite it towards the dictionary form.
///
/// `conditions_in` lists the conditions the current text must carry for the
/// rule to fire; `conditions_out` the conditions of the rewritten text. An
/// empty list means "unconstrained" in both positions.
#[derive(Debug)]
pub struct Rule {
    pub kind: RuleKind,
    pub conditions_in: &'static [&'static str],
    pub conditions_out: &'static [&'static str],
}

impl Rule {
    pub fn prefix(
        inflected: impl Into<String>,
        deinflected: impl Into<String>,
        conditions_in: &'static [&'static str],
        conditions_out: &'static [&'static str],
    ) -> Self {
        let kind = RuleKind::Prefix { inflected: inflected.into(), deinflected: deinflected.into() };
        Rule { kind, conditions_in, conditions_out }
    }

    pub fn suffix(
        inflected: impl Into<String>,
        deinflected: impl Into<String>,
        conditions_in: &'static [&'static str],
        conditions_out: &'static [&'static str],
    ) -> Self {
        let kind = RuleKind::Suffix { inflected: inflected.into(), deinflected: deinflected.into() };
        Rule { kind, conditions_in, conditions_out }
    }

    pub fn whole_word(
        inflected: impl Into<String>,
        deinflected: impl Into<String>,
        conditions_in: &'static [&'static str],
        conditions_out: &'static [&'static str],
    ) -> Self {
        let kind = RuleKind::WholeWord { inflected: inflected.into(), deinflected: deinflected.into() };
        Rule { kind, conditions_in, conditions_out }
    }

    pub fn other(
        pattern: Pattern,
        deinflect: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
        conditions_in: &'static [&'static str],
        conditions_out: &'static [&'static str],
    ) -> Self {
        let kind = RuleKind::Other { pattern, deinflect: Box::new(deinflect) };
        Rule { kind, conditions_in, conditions_out }
    }

    /// `Other` rule that rewrites the first match of `regex` with
    /// `replacement` (`${1}`-style capture references).
    pub fn regex_replace(
        regex: Regex,
        replacement: impl Into<String>,
        conditions_in: &'static [&'static str],
        conditions_out: &'static [&'static str],
    ) -> Self {
        let replacement = replacement.into();
        let re = regex.clone();
        Rule::other(
            Pattern::Regex(regex),
            move |text: &str| Some(re.replace(text, replacement.as_str()).into_owned()),
            conditions_in,
            conditions_out,
        )
    }

    /// Returns true when the rule's pattern recognizes `text`.
    pub fn matches(&self, text: &str) -> bool {
        match &self.kind {
            RuleKind::Prefix { inflected, .. } => text.starts_with(inflected.as_str()),
            RuleKind::Suffix { inflected, .. } => text.ends_with(inflected.as_str()),
            RuleKind::WholeWord { inflected, .. } => text == inflected,
            RuleKind::Other { pattern, .. } => pattern.is_match(text),
        }
    }

    /// Rewrite `text` towards its dictionary form.
    ///
    /// Returns `None` when the rule does not apply to `text`, including the
    /// case where an `Other` rewrite decides it has nothing to do.
    pub fn apply(&self, text: &str) -> Option<String> {
        match &self.kind {
            RuleKind::Prefix { inflected, deinflected } => {
                text.strip_prefix(inflected.as_str()).map(|rest| format!("{deinflected}{rest}"))
            }
            RuleKind::Suffix { inflected, deinflected } => {
                text.strip_suffix(inflected.as_str()).map(|stem| format!("{stem}{deinflected}"))
            }
            RuleKind::WholeWord { inflected, deinflected } => (text == inflected).then(|| deinflected.clone()),
            RuleKind::Other { pattern, deinflect } => {
                if pattern.is_match(text) {
                    deinflect(text)
                } else {
                    None
                }
            }
        }
    }
}

/// A named group of rules implementing one grammatical phenomenon
/// ("past", "plural", "eclipsis", ...).
#[derive(Debug)]
pub struct Transform {
    /// Stable key; this is what traces record.
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: Option<&'static str>,
    pub rules: Vec<Rule>,
}

/// The declarative rule table of one language.
///
/// Declaration order matters: leaf conditions are numbered in order, and the
/// resolver evaluates transforms and rules in order.
#[derive(Debug)]
pub struct LanguageTransforms {
    pub language: &'static str,
    pub conditions: Vec<Condition>,
    pub transforms: Vec<Transform>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_rules_rewrite_their_end_of_the_word() {
        let suffix = Rule::suffix("ies", "y", &[], &[]);
        assert!(suffix.matches("tries"));
        assert_eq!(suffix.apply("tries").as_deref(), Some("try"));
        assert_eq!(suffix.apply("tried"), None);

        let prefix = Rule::prefix("un", "", &[], &[]);
        assert!(prefix.matches("unhappy"));
        assert_eq!(prefix.apply("unhappy").as_deref(), Some("happy"));
        assert!(!prefix.matches("sun"));

        let whole = Rule::whole_word("soy", "ser", &[], &[]);
        assert!(whole.matches("soy"));
        assert!(!whole.matches("soya"));
        assert_eq!(whole.apply("soy").as_deref(), Some("ser"));
    }

    #[test]
    fn regex_replace_uses_capture_groups() {
        let rule = Rule::regex_replace(Regex::new(r"^ge(\w+)t$").unwrap(), "${1}en", &[], &["vw"]);
        assert!(rule.matches("gemacht"));
        assert_eq!(rule.apply("gemacht").as_deref(), Some("machen"));
        assert_eq!(rule.apply("machen"), None);
    }

    #[test]
    fn predicate_patterns_gate_other_rules() {
        let rule = Rule::other(
            Pattern::Predicate(Box::new(|text: &str| text.contains(' '))),
            |text: &str| text.split(' ').next().map(str::to_string),
            &[],
            &[],
        );
        assert!(!rule.matches("walk"));
        assert_eq!(rule.apply("walk"), None);
        assert_eq!(rule.apply("walk it").as_deref(), Some("walk"));
    }
}
