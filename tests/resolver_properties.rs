//! Property-based tests for the resolver
//!
//! These run arbitrary words through the built-in tables and through a small
//! table whose rules can grow words and form cycles, and check the properties
//! every resolution must have regardless of input:
//! - the input itself is always the first result
//! - the search terminates and traces never exceed the depth limit
//! - results are deterministic and unique per (text, conditions)
//! - every result other than the input carries a dictionary-form condition

use deinflector::{
    Condition, LanguageTransforms, ResolveOptions, Rule, TransformDescriptor, Transform, languages, resolve_with,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// Words shaped like English inflections, with the occasional particle.
fn english_word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Bare words
        "[a-z]{1,12}",
        // Common suffixes
        "[a-z]{1,8}(s|es|ies|ed|ied|ing|er|est|ly|able)",
        // Prefixed
        "un[a-z]{1,8}(est|ed|s)?",
        // Phrasal shapes
        "[a-z]{2,8}(ed|s|ing)? (it )?(up|out|off|down)",
    ]
}

/// A table whose rules lengthen, shorten and cycle words.
fn looping_table() -> LanguageTransforms {
    LanguageTransforms {
        language: "xx",
        conditions: vec![
            Condition { id: "a", display_name: "A", is_dictionary_form: true, sub_conditions: &[] },
            Condition { id: "b", display_name: "B", is_dictionary_form: false, sub_conditions: &[] },
        ],
        transforms: vec![
            Transform {
                name: "grow",
                display_name: "grow",
                description: None,
                rules: vec![Rule::suffix("", "x", &[], &["b"]), Rule::prefix("", "y", &["b"], &["a"])],
            },
            Transform {
                name: "swap",
                display_name: "swap",
                description: None,
                rules: vec![Rule::suffix("x", "z", &["b"], &["b"]), Rule::suffix("z", "x", &["b"], &["b"])],
            },
            Transform {
                name: "trim",
                display_name: "trim",
                description: None,
                rules: vec![Rule::suffix("a", "", &[], &["a"]), Rule::suffix("e", "", &["a"], &["b"])],
            },
        ],
    }
}

fn summary(results: &[deinflector::DeinflectionResult]) -> Vec<(String, Vec<&'static str>)> {
    results.iter().map(|r| (r.lemma.clone(), r.trace_names())).collect()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn input_is_always_the_first_result(word in english_word_strategy()) {
            let english = &languages::builtin().language("en").unwrap().descriptor;
            let resolution = resolve_with(english, &word, &ResolveOptions::default());

            prop_assert_eq!(&resolution.results[0].lemma, &word);
            prop_assert!(resolution.results[0].is_identity());
        }

        #[test]
        fn builtin_results_are_unique_and_dictionary_forms(word in english_word_strategy()) {
            let english = &languages::builtin().language("en").unwrap().descriptor;
            let resolution = resolve_with(english, &word, &ResolveOptions::default());

            let mut seen = HashSet::new();
            for result in &resolution.results {
                prop_assert!(seen.insert((result.lemma.clone(), result.conditions)), "duplicate {:?}", result);
                if !result.is_identity() {
                    prop_assert!(english.is_dictionary_form(result.conditions), "{:?}", result);
                }
            }
        }

        #[test]
        fn search_terminates_within_the_depth_limit(word in "[a-e]{0,6}", max_depth in 0usize..6) {
            let descriptor = TransformDescriptor::compile(looping_table()).unwrap();
            let options = ResolveOptions { max_depth, ..ResolveOptions::default() };
            let resolution = resolve_with(&descriptor, &word, &options);

            prop_assert!(!resolution.results.is_empty());
            prop_assert!(resolution.metrics.max_depth_reached <= max_depth);
            for result in &resolution.results {
                prop_assert!(result.trace.len() <= max_depth, "{:?}", result);
            }
        }

        #[test]
        fn resolution_is_deterministic(word in "[a-e]{0,6}") {
            let descriptor = TransformDescriptor::compile(looping_table()).unwrap();
            let options = ResolveOptions { max_depth: 4, ..ResolveOptions::default() };

            let first = resolve_with(&descriptor, &word, &options);
            let second = resolve_with(&descriptor, &word, &options);
            prop_assert_eq!(summary(&first.results), summary(&second.results));
            prop_assert_eq!(first.metrics.steps, second.metrics.steps);
        }

        #[test]
        fn step_budget_bounds_work(word in english_word_strategy(), budget in 0usize..50) {
            let english = &languages::builtin().language("en").unwrap().descriptor;
            let options = ResolveOptions { step_budget: Some(budget), ..ResolveOptions::default() };
            let resolution = resolve_with(english, &word, &options);

            prop_assert!(resolution.metrics.steps <= budget);
            prop_assert_eq!(&resolution.results[0].lemma, &word);
        }
    }
}
