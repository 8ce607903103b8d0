//! Visited-state keys for the chain search.
//!
//! Rules are heavily reusable across branches (many prefixes combine with the
//! same suffix rule), so without memoization the search is exponential in
//! chain length. The resolver keeps a set of `StateKey`s and never expands the
//! same state twice.
//!
//! ## What counts as "the same state"
//!
//! The key is the current text *and* its condition mask. The same text under
//! different conditions is a different state: it can be fed to different
//! rules, and both may be valid lemmas.
//!
//! The same key is the result key: a `(lemma, conditions)` pair is emitted at
//! most once, and breadth-first order makes the first emission the one with
//! the shortest trace.

use super::conditions::ConditionMask;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StateKey {
    pub(crate) text: String,
    pub(crate) conditions: ConditionMask,
}

impl StateKey {
    pub(crate) fn new(text: &str, conditions: ConditionMask) -> Self {
        StateKey { text: text.to_string(), conditions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_text_under_different_conditions_are_distinct_states() {
        let mut seen = HashSet::new();
        assert!(seen.insert(StateKey::new("walk", ConditionMask::from_bits(0b01))));
        assert!(seen.insert(StateKey::new("walk", ConditionMask::from_bits(0b10))));
        assert!(seen.insert(StateKey::new("walk", ConditionMask::UNCONSTRAINED)));
        assert!(!seen.insert(StateKey::new("walk", ConditionMask::from_bits(0b01))));
    }

    #[test]
    fn unconstrained_differs_from_empty_mask() {
        assert_ne!(StateKey::new("a", ConditionMask::UNCONSTRAINED), StateKey::new("a", ConditionMask::empty()));
    }
}
