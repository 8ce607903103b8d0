//! Descriptor compilation.
//!
//! This module holds the *static* side of the engine: a `LanguageTransforms`
//! table is validated once and turned into a `TransformDescriptor`, which the
//! resolver consumes.
//!
//! Resolution is split into two phases:
//!
//! 1. **Compile** (this module): compile the condition hierarchy, check
//!    transform names, and resolve each rule's condition id lists into
//!    `ConditionMask`s.
//! 2. **Run** (see `resolver.rs`): search deinflection chains for one input.
//!
//! All configuration errors surface in phase 1; phase 2 cannot fail.
//!
//! ## Invariants
//!
//! - Transform order and rule order are the declaration order of the table.
//!   The resolver relies on that for deterministic output.
//! - A descriptor is immutable after `compile` and is `Send + Sync`, so one
//!   instance can serve any number of concurrent resolutions.

use super::conditions::{ConditionMask, ConditionRegistry};
use crate::errors::{ConfigurationError, Result};
use crate::{LanguageTransforms, Rule};
use std::collections::HashMap;

/// A rule together with its compiled condition masks.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: Rule,
    pub conditions_in: ConditionMask,
    pub conditions_out: ConditionMask,
}

/// A transform whose rules have been compiled.
#[derive(Debug)]
pub struct CompiledTransform {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: Option<&'static str>,
    pub rules: Vec<CompiledRule>,
}

/// User-facing label of a transform, for presenting traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionRule {
    pub name: String,
    pub description: Option<String>,
}

/// A compiled language table: condition registry plus transforms.
#[derive(Debug)]
pub struct TransformDescriptor {
    language: &'static str,
    conditions: ConditionRegistry,
    transforms: Vec<CompiledTransform>,
    by_name: HashMap<&'static str, usize>,
}

impl TransformDescriptor {
    /// Validate `table` and compile it.
    ///
    /// Fails when the condition hierarchy is malformed, when two transforms
    /// share a name, or when a rule names a condition the table does not
    /// declare.
    pub fn compile(table: LanguageTransforms) -> Result<Self> {
        let LanguageTransforms { language, conditions, transforms } = table;
        let registry = ConditionRegistry::compile(&conditions)?;

        let mut by_name = HashMap::with_capacity(transforms.len());
        let mut compiled = Vec::with_capacity(transforms.len());

        for transform in transforms {
            if by_name.insert(transform.name, compiled.len()).is_some() {
                return Err(ConfigurationError::DuplicateTransform(transform.name.to_string()));
            }

            let name = transform.name;
            let rules = transform
                .rules
                .into_iter()
                .enumerate()
                .map(|(rule_index, rule)| {
                    let expand = |ids: &[&str]| {
                        registry.expand(ids).map_err(|err| match err {
                            ConfigurationError::UndeclaredCondition(condition) => {
                                let transform = name.to_string();
                                ConfigurationError::UnknownCondition { transform, rule_index, condition }
                            }
                            other => other,
                        })
                    };
                    let conditions_in = expand(rule.conditions_in)?;
                    let conditions_out = expand(rule.conditions_out)?;
                    Ok(CompiledRule { rule, conditions_in, conditions_out })
                })
                .collect::<Result<Vec<_>>>()?;

            compiled.push(CompiledTransform {
                name,
                display_name: transform.display_name,
                description: transform.description,
                rules,
            });
        }

        let descriptor = TransformDescriptor { language, conditions: registry, transforms: compiled, by_name };
        log::debug!(
            "compiled descriptor language={} conditions={} transforms={} rules={}",
            descriptor.language,
            descriptor.conditions.len(),
            descriptor.transforms.len(),
            descriptor.rule_count()
        );
        Ok(descriptor)
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    pub fn transforms(&self) -> &[CompiledTransform] {
        &self.transforms
    }

    pub fn transform(&self, name: &str) -> Option<&CompiledTransform> {
        self.by_name.get(name).map(|&idx| &self.transforms[idx])
    }

    pub fn rule_count(&self) -> usize {
        self.transforms.iter().map(|t| t.rules.len()).sum()
    }

    /// Mask of `ids`, skipping ids this language does not declare.
    pub fn condition_flags(&self, ids: &[&str]) -> ConditionMask {
        self.conditions.condition_flags(ids)
    }

    /// Whether a candidate carrying `conditions` is an acceptable lemma.
    pub fn is_dictionary_form(&self, conditions: ConditionMask) -> bool {
        conditions.is_unconstrained() || conditions.intersects(self.conditions.dictionary_mask())
    }

    /// Map transform names (as recorded in traces) to display labels.
    /// Unknown names are passed through without a description.
    pub fn user_facing_rules(&self, names: &[&str]) -> Vec<InflectionRule> {
        names
            .iter()
            .map(|&name| match self.transform(name) {
                Some(t) => InflectionRule {
                    name: t.display_name.to_string(),
                    description: t.description.map(str::to_string),
                },
                None => InflectionRule { name: name.to_string(), description: None },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Transform};

    fn conditions() -> Vec<Condition> {
        vec![
            condition! { id: "n", name: "Noun", dictionary_form: true, sub: ["np", "ns"] },
            condition! { id: "np", name: "Noun plural", dictionary_form: true },
            condition! { id: "ns", name: "Noun singular", dictionary_form: true },
            condition! { id: "adj", name: "Adjective", dictionary_form: true },
        ]
    }

    #[test]
    fn compiles_rule_masks_from_condition_ids() {
        let table = LanguageTransforms {
            language: "xx",
            conditions: conditions(),
            transforms: vec![
                transform! {
                    name: "plural",
                    description: "Plural form of a noun",
                    rules: [suffix!("s", "", ["np"], ["ns"])],
                },
                transform! {
                    name: "possessive",
                    rules: [suffix!("'s", "", ["n"], ["n"]), suffix!("-ish", "", [], [])],
                },
            ],
        };
        let descriptor = TransformDescriptor::compile(table).unwrap();
        assert_eq!(descriptor.language(), "xx");
        assert_eq!(descriptor.rule_count(), 3);

        let plural = descriptor.transform("plural").unwrap();
        assert_eq!(plural.rules[0].conditions_in.bits(), 0b001);
        assert_eq!(plural.rules[0].conditions_out.bits(), 0b010);

        let possessive = descriptor.transform("possessive").unwrap();
        assert_eq!(possessive.rules[0].conditions_in.bits(), 0b011);
        assert!(possessive.rules[1].conditions_in.is_unconstrained());
        assert!(possessive.rules[1].conditions_out.is_unconstrained());
    }

    #[test]
    fn unknown_rule_condition_is_reported_with_its_rule() {
        let table = LanguageTransforms {
            language: "xx",
            conditions: conditions(),
            transforms: vec![transform! {
                name: "adverb",
                rules: [suffix!("ly", "", ["adj"], ["adj"]), suffix!("ily", "y", ["adv"], ["adj"])],
            }],
        };
        assert_eq!(
            TransformDescriptor::compile(table).unwrap_err(),
            ConfigurationError::UnknownCondition {
                transform: "adverb".to_string(),
                rule_index: 1,
                condition: "adv".to_string()
            }
        );
    }

    #[test]
    fn duplicate_transform_names_are_rejected() {
        let table = LanguageTransforms {
            language: "xx",
            conditions: conditions(),
            transforms: vec![
                transform! { name: "plural", rules: [suffix!("s", "", ["np"], ["ns"])] },
                transform! { name: "plural", rules: [suffix!("es", "", ["np"], ["ns"])] },
            ],
        };
        assert_eq!(
            TransformDescriptor::compile(table).unwrap_err(),
            ConfigurationError::DuplicateTransform("plural".to_string())
        );
    }

    #[test]
    fn user_facing_rules_use_display_names() {
        let table = LanguageTransforms {
            language: "xx",
            conditions: conditions(),
            transforms: vec![Transform {
                name: "pl",
                display_name: "plural",
                description: Some("Plural form of a noun"),
                rules: vec![suffix!("s", "", ["np"], ["ns"])],
            }],
        };
        let descriptor = TransformDescriptor::compile(table).unwrap();
        assert_eq!(
            descriptor.user_facing_rules(&["pl", "mystery"]),
            vec![
                InflectionRule { name: "plural".to_string(), description: Some("Plural form of a noun".to_string()) },
                InflectionRule { name: "mystery".to_string(), description: None },
            ]
        );
    }

    #[test]
    fn descriptors_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformDescriptor>();
    }
}
