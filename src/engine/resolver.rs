//! Bounded breadth-first chain search.
//!
//! This module is the operational core of the engine. Given a compiled
//! `TransformDescriptor` and a surface string it:
//!
//! - seeds the search with the untouched input (always the first result);
//! - expands the frontier level by level, trying every rule of every
//!   transform in declaration order against every node;
//! - gates each rule by condition compatibility (see `conditions.rs`);
//! - drops rewrites whose `(text, conditions)` state was already visited
//!   (see `dedup.rs`);
//! - emits every new state whose conditions allow a dictionary form, and keeps
//!   expanding it (morphology stacks).
//!
//! ## Level structure
//!
//! ```text
//! depth 0   "unhappiest"                        (identity, unconstrained)
//!              │ superlative        │ un-
//! depth 1   "unhappy" [adj]      "happiest" [adj]
//!              │ un-                │ superlative
//! depth 2   "happy" [adj]        ("happy" [adj] already visited)
//! ```
//!
//! The search stops when the frontier is empty, when the next level would
//! exceed `max_depth`, or when a step/time budget is exhausted. None of these
//! are errors; the last two mark the result as partial in the metrics.
//!
//! ## Faults
//!
//! `Other` rules run caller-supplied closures. A panic inside one is caught,
//! logged, and recorded as a `RuleFault`; the rule simply does not fire for
//! that node and the search goes on.

use super::conditions::ConditionMask;
use super::dedup::StateKey;
use super::descriptor::{CompiledTransform, TransformDescriptor};
use super::metrics::{BudgetExceeded, LevelMetrics, ResolveMetrics, RuleFault};
use crate::Rule;
use std::any::Any;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Default bound on chain length. Real tables rarely stack more than four or
/// five layers.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Options that bound a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum number of rule applications in one chain.
    pub max_depth: usize,
    /// Maximum number of rule evaluations for the whole run.
    pub step_budget: Option<usize>,
    /// Wall-clock budget for the whole run.
    pub time_budget: Option<Duration>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions { max_depth: DEFAULT_MAX_DEPTH, step_budget: None, time_budget: None }
    }
}

/// One applied rule in a deinflection chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// Transform name (stable key).
    pub transform: &'static str,
    pub display_name: &'static str,
    /// Index of the rule inside its transform.
    pub rule_index: usize,
    /// Text the rule was applied to.
    pub text: String,
}

/// A lemma candidate and the chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeinflectionResult {
    pub lemma: String,
    /// Frames in application order, surface form first.
    pub trace: Vec<TraceFrame>,
    pub conditions: ConditionMask,
}

impl DeinflectionResult {
    /// True for the untouched input.
    pub fn is_identity(&self) -> bool {
        self.trace.is_empty()
    }

    /// Transform display names in application order.
    pub fn trace_names(&self) -> Vec<&'static str> {
        self.trace.iter().map(|frame| frame.display_name).collect()
    }

    /// Transform display names from the lemma outward, e.g. `["un-",
    /// "superlative"]` for "unhappiest" -> "happy".
    pub fn inflection_chain(&self) -> Vec<&'static str> {
        self.trace.iter().rev().map(|frame| frame.display_name).collect()
    }
}

/// Results of one run plus its metrics.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub results: Vec<DeinflectionResult>,
    pub metrics: ResolveMetrics,
}

/// Resolver-internal search state.
struct SearchNode {
    text: String,
    conditions: ConditionMask,
    trace: Vec<TraceFrame>,
    depth: usize,
}

impl SearchNode {
    fn to_result(&self) -> DeinflectionResult {
        DeinflectionResult { lemma: self.text.clone(), trace: self.trace.clone(), conditions: self.conditions }
    }
}

/// Per-run mutable state. Owned by one `run` call, never shared.
struct Search {
    visited: HashSet<StateKey>,
    results: Vec<DeinflectionResult>,
    metrics: ResolveMetrics,
    deadline: Option<Instant>,
}

/// Runs chain searches against one descriptor.
///
/// A `Resolver` only borrows the descriptor; create as many as needed, on as
/// many threads as needed.
#[derive(Debug, Clone)]
pub struct Resolver<'d> {
    descriptor: &'d TransformDescriptor,
    options: ResolveOptions,
}

impl<'d> Resolver<'d> {
    pub fn new(descriptor: &'d TransformDescriptor, options: ResolveOptions) -> Self {
        Resolver { descriptor, options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Search every deinflection chain of `text`.
    pub fn run(&self, text: &str) -> Resolution {
        let start = Instant::now();
        let mut search = Search {
            visited: HashSet::new(),
            results: Vec::new(),
            metrics: ResolveMetrics::default(),
            deadline: self.options.time_budget.and_then(|budget| start.checked_add(budget)),
        };

        let conditions = ConditionMask::UNCONSTRAINED;
        let seed = SearchNode { text: text.to_string(), conditions, trace: Vec::new(), depth: 0 };
        search.visited.insert(StateKey::new(&seed.text, seed.conditions));
        search.results.push(seed.to_result());

        let mut frontier = vec![seed];
        let mut depth = 0;
        while !frontier.is_empty() {
            if depth >= self.options.max_depth {
                search.metrics.depth_limited = frontier.len();
                break;
            }

            let level_start = Instant::now();
            let mut level = LevelMetrics { depth, ..LevelMetrics::default() };
            let mut next = Vec::new();
            let mut flow = ControlFlow::Continue(());
            for node in &frontier {
                if search.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    flow = ControlFlow::Break(BudgetExceeded::Deadline);
                    break;
                }
                level.expanded += 1;
                flow = self.expand(node, &mut search, &mut level, &mut next);
                if flow.is_break() {
                    break;
                }
            }
            level.duration = level_start.elapsed();
            search.metrics.levels.push(level);
            if !next.is_empty() {
                search.metrics.max_depth_reached = depth + 1;
            }

            if let ControlFlow::Break(reason) = flow {
                search.metrics.stopped_by = Some(reason);
                log::warn!(
                    "resolution of {:?} stopped early ({:?}) after {} steps; results are partial",
                    text,
                    reason,
                    search.metrics.steps
                );
                break;
            }

            frontier = next;
            depth += 1;
        }

        search.metrics.total = start.elapsed();
        log::debug!(
            "resolved language={} input={:?} results={} steps={} depth={} elapsed={:?}",
            self.descriptor.language(),
            text,
            search.results.len(),
            search.metrics.steps,
            search.metrics.max_depth_reached,
            search.metrics.total
        );

        Resolution { results: search.results, metrics: search.metrics }
    }

    /// Try every rule against `node`, pushing new states onto `next`.
    fn expand(
        &self,
        node: &SearchNode,
        search: &mut Search,
        level: &mut LevelMetrics,
        next: &mut Vec<SearchNode>,
    ) -> ControlFlow<BudgetExceeded> {
        let dictionary_mask = self.descriptor.conditions().dictionary_mask();

        for transform in self.descriptor.transforms() {
            for (rule_index, compiled) in transform.rules.iter().enumerate() {
                if self.options.step_budget.is_some_and(|budget| search.metrics.steps >= budget) {
                    return ControlFlow::Break(BudgetExceeded::Steps);
                }
                search.metrics.steps += 1;

                if !node.conditions.is_compatible_with(compiled.conditions_in) {
                    continue;
                }
                let Some(text) = apply_guarded(transform, rule_index, &compiled.rule, &node.text, &mut search.metrics)
                else {
                    continue;
                };
                search.metrics.rule_hits += 1;

                let conditions = compiled.conditions_out;
                if !search.visited.insert(StateKey::new(&text, conditions)) {
                    search.metrics.revisits += 1;
                    continue;
                }

                let mut trace = Vec::with_capacity(node.trace.len() + 1);
                trace.extend_from_slice(&node.trace);
                trace.push(TraceFrame {
                    transform: transform.name,
                    display_name: transform.display_name,
                    rule_index,
                    text: node.text.clone(),
                });
                let child = SearchNode { text, conditions, trace, depth: node.depth + 1 };
                level.produced += 1;

                if conditions.is_unconstrained() || conditions.intersects(dictionary_mask) {
                    log::trace!(
                        "[{}#{}] {:?} -> {:?} {:?}",
                        transform.name,
                        rule_index,
                        node.text,
                        child.text,
                        child.conditions
                    );
                    search.results.push(child.to_result());
                    level.emitted += 1;
                }
                next.push(child);
            }
        }

        ControlFlow::Continue(())
    }
}

/// Apply `rule` to `text`, turning a panic into a recorded fault.
fn apply_guarded(
    transform: &CompiledTransform,
    rule_index: usize,
    rule: &Rule,
    text: &str,
    metrics: &mut ResolveMetrics,
) -> Option<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.apply(text))) {
        Ok(rewritten) => rewritten,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::warn!("rule fault in '{}' #{} on {:?}: {}", transform.name, rule_index, text, message);
            metrics.faults.push(RuleFault { transform: transform.name, rule_index, text: text.to_string(), message });
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Resolve `text` against `descriptor` with default options.
pub fn resolve(descriptor: &TransformDescriptor, text: &str) -> Vec<DeinflectionResult> {
    resolve_with(descriptor, text, &ResolveOptions::default()).results
}

/// Resolve `text` against `descriptor`, returning results and metrics.
pub fn resolve_with(descriptor: &TransformDescriptor, text: &str, options: &ResolveOptions) -> Resolution {
    Resolver::new(descriptor, options.clone()).run(text)
}
