//! Resolver run metrics.
//!
//! Every `Resolution` carries a `ResolveMetrics` value. It records how much
//! work the search did, per-level timings, any rule faults that were
//! swallowed, and whether a budget cut the search short.
//!
//! ## Design notes
//!
//! - A *step* is one rule evaluated against one node (compatibility test,
//!   match and rewrite). The step budget counts these.
//! - `LevelMetrics` mirrors the breadth-first structure: level `d` expands the
//!   nodes created at depth `d`.

use std::time::Duration;

/// Why the resolver stopped before exhausting its frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetExceeded {
    /// `ResolveOptions::step_budget` rule evaluations were spent.
    Steps,
    /// `ResolveOptions::time_budget` elapsed.
    Deadline,
}

/// A rule that panicked while matching or rewriting. The rule is treated as
/// not having fired for that node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFault {
    pub transform: &'static str,
    pub rule_index: usize,
    /// Text the rule was evaluated against.
    pub text: String,
    pub message: String,
}

/// Work done while expanding one breadth-first level.
#[derive(Debug, Default, Clone)]
pub struct LevelMetrics {
    pub depth: usize,
    pub duration: Duration,
    /// Nodes expanded at this level.
    pub expanded: usize,
    /// New (unvisited) states created.
    pub produced: usize,
    /// Of those, how many were emitted as results.
    pub emitted: usize,
}

#[derive(Debug, Default, Clone)]
pub struct ResolveMetrics {
    pub total: Duration,
    pub steps: usize,
    /// Rule evaluations that rewrote the text (new state or not).
    pub rule_hits: usize,
    /// Rewrites discarded because their state had been visited.
    pub revisits: usize,
    /// Deepest level that produced at least one node.
    pub max_depth_reached: usize,
    /// Nodes left unexpanded because they sat at `max_depth`.
    pub depth_limited: usize,
    pub levels: Vec<LevelMetrics>,
    pub faults: Vec<RuleFault>,
    pub stopped_by: Option<BudgetExceeded>,
}

impl ResolveMetrics {
    /// True when a budget cut the search short and results may be partial.
    pub fn is_partial(&self) -> bool {
        self.stopped_by.is_some()
    }
}
