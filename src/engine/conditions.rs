//! Condition registry and condition masks.
//!
//! A language declares its grammatical conditions as a small hierarchy. This
//! module compiles that hierarchy into fixed-width bitmasks so the resolver
//! can test rule compatibility with a single `&`.
//!
//! ## Numbering
//!
//! - Every *leaf* condition (no sub-conditions) receives one bit, numbered
//!   densely in declaration order.
//! - A *parent* condition owns no bit. Its mask is the union of the masks of
//!   everything reachable through `sub_conditions`.
//!
//! ```text
//! n   = { np, ns }      np -> bit 0      n  -> 0b011
//! np                    ns -> bit 1      np -> 0b001
//! ns                    adj -> bit 2     adj -> 0b100
//! adj
//! ```
//!
//! ## Unconstrained vs. empty
//!
//! A rule that declares no conditions is *unconstrained*: it fires from any
//! state, and a text it produces is compatible with any rule downstream. That
//! is different from a mask with no bits, which is what an empty intersection
//! produces and which must fail every test. `ConditionMask` therefore keeps a
//! `MaskFlags::UNCONSTRAINED` flag next to its bits.
//!
//! ## Invariants
//!
//! - Ids are unique, every sub-condition id exists, the hierarchy is acyclic.
//! - At most `MAX_LEAF_CONDITIONS` leaves; larger tables are rejected rather
//!   than truncated.

use crate::Condition;
use crate::errors::{ConfigurationError, Result};
use std::collections::HashMap;
use std::fmt;

/// Width of a condition mask.
pub const MAX_LEAF_CONDITIONS: usize = u64::BITS as usize;

bitflags::bitflags! {
    /// Flags kept alongside the bits of a `ConditionMask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaskFlags: u8 {
        /// No constraint was declared; compatible with everything.
        const UNCONSTRAINED = 1 << 0;
    }
}

/// A set of leaf conditions, or the "unconstrained" marker.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionMask {
    bits: u64,
    flags: MaskFlags,
}

impl ConditionMask {
    /// The mask of a rule (or text) that declares no conditions.
    pub const UNCONSTRAINED: ConditionMask = ConditionMask { bits: 0, flags: MaskFlags::UNCONSTRAINED };

    /// A constrained mask with no bits. Compatible with nothing but an
    /// unconstrained mask.
    pub const fn empty() -> Self {
        ConditionMask { bits: 0, flags: MaskFlags::empty() }
    }

    pub const fn from_bits(bits: u64) -> Self {
        ConditionMask { bits, flags: MaskFlags::empty() }
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    pub fn flags(self) -> MaskFlags {
        self.flags
    }

    pub fn is_unconstrained(self) -> bool {
        self.flags.contains(MaskFlags::UNCONSTRAINED)
    }

    /// True when both masks share at least one leaf bit.
    pub fn intersects(self, other: ConditionMask) -> bool {
        self.bits & other.bits != 0
    }

    /// Whether a text carrying `self` may be fed to a rule requiring
    /// `required`.
    pub fn is_compatible_with(self, required: ConditionMask) -> bool {
        self.is_unconstrained() || required.is_unconstrained() || self.intersects(required)
    }

    pub fn union(self, other: ConditionMask) -> ConditionMask {
        ConditionMask::from_bits(self.bits | other.bits)
    }
}

impl fmt::Debug for ConditionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() { f.write_str("Unconstrained") } else { write!(f, "Conditions({:#b})", self.bits) }
    }
}

/// One compiled condition.
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub is_dictionary_form: bool,
    /// Bit index for leaves, `None` for parents.
    pub bit: Option<u32>,
    /// Own bit for leaves, union of descendants for parents.
    pub mask: ConditionMask,
}

/// The compiled condition hierarchy of one language.
#[derive(Debug, Clone, Default)]
pub struct ConditionRegistry {
    conditions: Vec<CompiledCondition>,
    by_id: HashMap<&'static str, usize>,
    dictionary_bits: u64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

impl ConditionRegistry {
    /// Validate and compile `conditions`.
    pub fn compile(conditions: &[Condition]) -> Result<Self> {
        let mut by_id: HashMap<&'static str, usize> = HashMap::with_capacity(conditions.len());
        for (idx, condition) in conditions.iter().enumerate() {
            if by_id.insert(condition.id, idx).is_some() {
                return Err(ConfigurationError::DuplicateCondition(condition.id.to_string()));
            }
        }

        let leaf_count = conditions.iter().filter(|c| c.is_leaf()).count();
        if leaf_count > MAX_LEAF_CONDITIONS {
            return Err(ConfigurationError::TooManyConditions { count: leaf_count, max: MAX_LEAF_CONDITIONS });
        }

        // Leaves first, in declaration order.
        let mut bits: Vec<Option<u32>> = vec![None; conditions.len()];
        let mut masks: Vec<u64> = vec![0; conditions.len()];
        let mut next_bit = 0u32;
        for (idx, condition) in conditions.iter().enumerate() {
            if condition.is_leaf() {
                bits[idx] = Some(next_bit);
                masks[idx] = 1u64 << next_bit;
                next_bit += 1;
            }
        }

        let mut state = vec![Visit::Pending; conditions.len()];
        let mut path = Vec::new();
        for idx in 0..conditions.len() {
            expand_closure(idx, conditions, &by_id, &mut state, &mut masks, &mut path)?;
        }

        let mut dictionary_bits = 0u64;
        let compiled: Vec<CompiledCondition> = conditions
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                if c.is_dictionary_form {
                    dictionary_bits |= masks[idx];
                }
                CompiledCondition {
                    id: c.id,
                    display_name: c.display_name,
                    is_dictionary_form: c.is_dictionary_form,
                    bit: bits[idx],
                    mask: ConditionMask::from_bits(masks[idx]),
                }
            })
            .collect();

        Ok(ConditionRegistry { conditions: compiled, by_id, dictionary_bits })
    }

    /// Union of the masks of `ids`. An empty list is `UNCONSTRAINED`.
    pub fn expand(&self, ids: &[&str]) -> Result<ConditionMask> {
        if ids.is_empty() {
            return Ok(ConditionMask::UNCONSTRAINED);
        }
        let mut mask = ConditionMask::empty();
        for id in ids {
            let condition = self.get(id).ok_or_else(|| ConfigurationError::UndeclaredCondition(id.to_string()))?;
            mask = mask.union(condition.mask);
        }
        Ok(mask)
    }

    /// Like `expand`, but silently skips unknown ids. Used for condition
    /// names coming from outside the table (dictionary part-of-speech tags).
    pub fn condition_flags(&self, ids: &[&str]) -> ConditionMask {
        ids.iter().filter_map(|id| self.get(id)).fold(ConditionMask::empty(), |acc, c| acc.union(c.mask))
    }

    /// Union of the leaf bits that count as dictionary forms.
    ///
    /// A parent flagged as a dictionary form contributes all of its leaves.
    pub fn dictionary_mask(&self) -> ConditionMask {
        ConditionMask::from_bits(self.dictionary_bits)
    }

    pub fn get(&self, id: &str) -> Option<&CompiledCondition> {
        self.by_id.get(id).map(|&idx| &self.conditions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledCondition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.conditions.iter().filter(|c| c.bit.is_some()).count()
    }

    /// Ids of the leaves set in `mask`, in bit order.
    pub fn names(&self, mask: ConditionMask) -> Vec<&'static str> {
        self.conditions
            .iter()
            .filter(|c| matches!(c.bit, Some(bit) if mask.bits() & (1u64 << bit) != 0))
            .map(|c| c.id)
            .collect()
    }
}

/// Depth-first closure of `idx` over `sub_conditions`, memoized in `masks`.
/// `path` holds the ids currently on the DFS stack, for cycle reports.
fn expand_closure(
    idx: usize,
    conditions: &[Condition],
    by_id: &HashMap<&'static str, usize>,
    state: &mut [Visit],
    masks: &mut [u64],
    path: &mut Vec<&'static str>,
) -> Result<u64> {
    match state[idx] {
        Visit::Done => return Ok(masks[idx]),
        Visit::InProgress => {
            let id = conditions[idx].id;
            let start = path.iter().position(|p| *p == id).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            return Err(ConfigurationError::CyclicConditions(cycle));
        }
        Visit::Pending => {}
    }

    let condition = &conditions[idx];
    state[idx] = Visit::InProgress;
    path.push(condition.id);

    let mut mask = masks[idx];
    for sub in condition.sub_conditions {
        let sub_idx = *by_id.get(sub).ok_or_else(|| ConfigurationError::UnknownSubCondition {
            condition: condition.id.to_string(),
            sub_condition: sub.to_string(),
        })?;
        mask |= expand_closure(sub_idx, conditions, by_id, state, masks, path)?;
    }

    path.pop();
    masks[idx] = mask;
    state[idx] = Visit::Done;
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_like() -> Vec<Condition> {
        vec![
            condition! { id: "v", name: "Verb", dictionary_form: true, sub: ["v_phr"] },
            condition! { id: "v_phr", name: "Phrasal verb", dictionary_form: true },
            condition! { id: "n", name: "Noun", dictionary_form: true, sub: ["np", "ns"] },
            condition! { id: "np", name: "Noun plural", dictionary_form: true },
            condition! { id: "ns", name: "Noun singular", dictionary_form: true },
            condition! { id: "adj", name: "Adjective", dictionary_form: true },
        ]
    }

    #[test]
    fn leaves_get_dense_bits_in_declaration_order() {
        let registry = ConditionRegistry::compile(&english_like()).unwrap();
        assert_eq!(registry.leaf_count(), 4);
        assert_eq!(registry.get("v_phr").unwrap().bit, Some(0));
        assert_eq!(registry.get("np").unwrap().bit, Some(1));
        assert_eq!(registry.get("ns").unwrap().bit, Some(2));
        assert_eq!(registry.get("adj").unwrap().bit, Some(3));
        assert_eq!(registry.get("n").unwrap().bit, None);
    }

    #[test]
    fn parents_expand_to_their_leaves() {
        let registry = ConditionRegistry::compile(&english_like()).unwrap();
        let n = registry.expand(&["n"]).unwrap();
        let np = registry.expand(&["np"]).unwrap();
        assert_eq!(n.bits(), 0b0110);
        assert!(n.is_compatible_with(np));
        assert_eq!(registry.expand(&["v"]).unwrap(), registry.expand(&["v_phr"]).unwrap());
        assert_eq!(registry.names(n), vec!["np", "ns"]);
    }

    #[test]
    fn nested_hierarchies_expand_transitively() {
        let conditions = vec![
            condition! { id: "word", name: "Any word", dictionary_form: false, sub: ["n", "adj"] },
            condition! { id: "n", name: "Noun", dictionary_form: false, sub: ["np", "ns"] },
            condition! { id: "np", name: "Plural", dictionary_form: false },
            condition! { id: "ns", name: "Singular", dictionary_form: true },
            condition! { id: "adj", name: "Adjective", dictionary_form: true },
        ];
        let registry = ConditionRegistry::compile(&conditions).unwrap();
        assert_eq!(registry.expand(&["word"]).unwrap().bits(), 0b111);
        assert_eq!(registry.dictionary_mask().bits(), 0b110);
    }

    #[test]
    fn empty_list_is_unconstrained_not_empty() {
        let registry = ConditionRegistry::compile(&english_like()).unwrap();
        let unconstrained = registry.expand(&[]).unwrap();
        assert!(unconstrained.is_unconstrained());

        let adj = registry.expand(&["adj"]).unwrap();
        let n = registry.expand(&["n"]).unwrap();
        assert!(unconstrained.is_compatible_with(adj));
        assert!(adj.is_compatible_with(unconstrained));
        assert!(!adj.is_compatible_with(n));
        assert!(!ConditionMask::empty().is_compatible_with(adj));
    }

    #[test]
    fn dictionary_mask_only_counts_flagged_conditions() {
        let conditions = vec![
            condition! { id: "plural", name: "Plural", dictionary_form: false },
            condition! { id: "singular", name: "Singular", dictionary_form: true },
        ];
        let registry = ConditionRegistry::compile(&conditions).unwrap();
        assert_eq!(registry.dictionary_mask().bits(), 0b10);
    }

    #[test]
    fn unknown_sub_condition_is_rejected() {
        let conditions = vec![condition! { id: "n", name: "Noun", dictionary_form: true, sub: ["np"] }];
        let err = ConditionRegistry::compile(&conditions).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownSubCondition { condition: "n".to_string(), sub_condition: "np".to_string() }
        );
    }

    #[test]
    fn cycles_are_rejected_with_their_path() {
        let conditions = vec![
            condition! { id: "a", name: "A", dictionary_form: true, sub: ["b"] },
            condition! { id: "b", name: "B", dictionary_form: true, sub: ["c"] },
            condition! { id: "c", name: "C", dictionary_form: true, sub: ["a"] },
        ];
        let err = ConditionRegistry::compile(&conditions).unwrap_err();
        assert_eq!(err, ConfigurationError::CyclicConditions(vec!["a".into(), "b".into(), "c".into(), "a".into()]));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let conditions = vec![
            condition! { id: "n", name: "Noun", dictionary_form: true },
            condition! { id: "n", name: "Noun again", dictionary_form: true },
        ];
        assert_eq!(
            ConditionRegistry::compile(&conditions).unwrap_err(),
            ConfigurationError::DuplicateCondition("n".to_string())
        );
    }

    #[test]
    fn too_many_leaves_are_rejected() {
        static IDS: [&str; 65] = [
            "c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9", "c10", "c11", "c12", "c13", "c14", "c15",
            "c16", "c17", "c18", "c19", "c20", "c21", "c22", "c23", "c24", "c25", "c26", "c27", "c28", "c29",
            "c30", "c31", "c32", "c33", "c34", "c35", "c36", "c37", "c38", "c39", "c40", "c41", "c42", "c43",
            "c44", "c45", "c46", "c47", "c48", "c49", "c50", "c51", "c52", "c53", "c54", "c55", "c56", "c57",
            "c58", "c59", "c60", "c61", "c62", "c63", "c64",
        ];
        let conditions: Vec<Condition> = IDS
            .iter()
            .map(|&id| Condition { id, display_name: id, is_dictionary_form: true, sub_conditions: &[] })
            .collect();
        assert_eq!(
            ConditionRegistry::compile(&conditions).unwrap_err(),
            ConfigurationError::TooManyConditions { count: 65, max: 64 }
        );
        assert!(ConditionRegistry::compile(&conditions[..64]).is_ok());
    }

    #[test]
    fn expand_rejects_undeclared_ids() {
        let registry = ConditionRegistry::compile(&english_like()).unwrap();
        assert_eq!(
            registry.expand(&["adj", "pron"]).unwrap_err(),
            ConfigurationError::UndeclaredCondition("pron".to_string())
        );
    }

    #[test]
    fn condition_flags_ignore_unknown_ids() {
        let registry = ConditionRegistry::compile(&english_like()).unwrap();
        let mask = registry.condition_flags(&["adj", "interjection"]);
        assert_eq!(mask, registry.expand(&["adj"]).unwrap());
        assert!(!registry.condition_flags(&["interjection"]).is_unconstrained());
    }
}
