//! Combat-agent decision core.
//!
//! A deterministic, tick-driven planner for game NPCs, split into four
//! cooperating layers:
//!
//! - [`scoring`]: utility scoring of the discrete behavior states, with a
//!   switch threshold as the first line of anti-oscillation defense
//! - [`gate`]: debounce, dwell, and ping-pong guarding on top of the
//!   scorer's recommendations, with survival exceptions
//! - [`goals`] + [`evaluators`]: a hierarchical goal system choosing and
//!   running tactics, with commitment hysteresis at the strategic level
//! - [`brain`]: the per-agent orchestrator tying the layers into one
//!   fixed per-tick pipeline
//!
//! The crate is pure decision logic: it reads the world through the
//! [`agent_core::AgentWorld`] collaborators and writes back exactly one
//! field (the agent's activity) plus navigation commands. No wall clock,
//! no global RNG; time and randomness come in through the world, so a
//! scenario replays identically from the same inputs.

pub mod brain;
pub mod config;
pub mod error;
pub mod evaluators;
pub mod gate;
pub mod goals;
pub mod reflector;
pub mod scoring;

pub use brain::{AgentBrain, BrainSnapshot};
pub use config::PlannerConfig;
pub use error::{ConfigError, PlannerError};
pub use evaluators::{
    CommitmentManager, EliminateEnemyEvaluator, ExploreEvaluator, GoalEvaluator,
};
pub use gate::{TransitionGate, TransitionOptions, TransitionRejection};
pub use reflector::BehaviorReflector;
pub use scoring::{BehaviorScoreSet, BestState, SelectionReason, UtilityScorer};
