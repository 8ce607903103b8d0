//! Deinflection engine.
//!
//! This module is the heart of the crate: it compiles declarative language
//! tables and searches for deinflection chains.
//!
//! ## How the parts work together
//!
//! ```text
//! LanguageTransforms ──┐
//!                      │  TransformDescriptor::compile   (descriptor.rs)
//!                      │    - ConditionRegistry::compile (conditions.rs)
//!                      │    - condition ids -> ConditionMask per rule
//!                      └───────────────┬───────────────
//!                                      │  (immutable, shared)
//! surface text ── Resolver::run ───────┤                 (resolver.rs)
//!                   - seed identity node
//!                   - expand level by level (breadth-first)
//!                   - gate rules by condition masks
//!                   - skip visited (text, conditions) states (dedup.rs)
//!                   - emit dictionary-form candidates
//!                                      │
//!                                      v
//!                    Resolution { results, metrics } (metrics.rs)
//! ```
//!
//! The search is bounded by `ResolveOptions::max_depth` and, optionally, by a
//! step budget and a time budget. Exhausting a budget returns the partial
//! result set; it is never an error.
//!
//! ## Responsibilities by module
//!
//! - `conditions.rs`: condition hierarchy, leaf bit numbering, `ConditionMask`.
//! - `descriptor.rs`: validates a `LanguageTransforms` table and compiles each
//!   rule's condition lists into masks.
//! - `resolver.rs`: the bounded breadth-first chain search.
//! - `dedup.rs`: the visited-state key.
//! - `metrics.rs`: per-run counters, per-level timings, faults and stop reason.
//!
//! ## Debugging
//!
//! The engine logs through the `log` facade: `debug` per run, `trace` per
//! produced candidate, `warn` for rule faults and exhausted budgets.

#[path = "engine/conditions.rs"]
mod conditions;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/descriptor.rs"]
mod descriptor;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolver.rs"]
mod resolver;

pub use conditions::{ConditionMask, ConditionRegistry, MAX_LEAF_CONDITIONS, MaskFlags};
pub use descriptor::{CompiledRule, CompiledTransform, InflectionRule, TransformDescriptor};
pub use metrics::{BudgetExceeded, LevelMetrics, ResolveMetrics, RuleFault};
pub use resolver::{
    DEFAULT_MAX_DEPTH, DeinflectionResult, Resolution, ResolveOptions, Resolver, TraceFrame, resolve, resolve_with,
};
