//! Error types.
//!
//! Only configuration can fail. Resolution itself never returns an error: a
//! misbehaving rule is skipped (see `RuleFault`) and an exhausted budget just
//! cuts the search short (see `BudgetExceeded`).

/// Result type defaulting to [`ConfigurationError`].
pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;

/// A malformed language table, reported while compiling it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("condition '{0}' is declared more than once")]
    DuplicateCondition(String),

    #[error("condition '{condition}' references unknown sub-condition '{sub_condition}'")]
    UnknownSubCondition { condition: String, sub_condition: String },

    /// The path starts and ends with the same condition id.
    #[error("condition hierarchy contains a cycle: {}", .0.join(" -> "))]
    CyclicConditions(Vec<String>),

    #[error("{count} leaf conditions declared, but a condition mask holds at most {max}")]
    TooManyConditions { count: usize, max: usize },

    #[error("condition '{0}' is not declared")]
    UndeclaredCondition(String),

    #[error("transform '{transform}' rule #{rule_index} references unknown condition '{condition}'")]
    UnknownCondition { transform: String, rule_index: usize, condition: String },

    #[error("transform '{0}' is declared more than once")]
    DuplicateTransform(String),

    #[error("language '{0}' is registered more than once")]
    DuplicateLanguage(String),
}

/// Errors surfaced by [`Deinflector`](crate::Deinflector) lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeinflectError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}
