//! Error types surfaced by the planner's public API.
//!
//! Most "failures" inside the decision core are not errors at all: a goal
//! that cannot proceed reports `GoalStatus::Failed` and its parent picks a
//! different tactic next tick, and a gate or commitment refusal is a normal
//! transient outcome. The types here cover the few genuinely exceptional
//! paths: invalid configuration and misassembled brains.

/// Invalid [`crate::PlannerConfig`] contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration field `{field}` is out of range")]
    OutOfRange { field: &'static str },

    #[error("configuration window `{field}` has min above max")]
    InvertedWindow { field: &'static str },
}

/// Errors constructing or driving an agent brain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("invalid planner configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("an agent brain needs at least one goal evaluator")]
    NoEvaluators,
}
