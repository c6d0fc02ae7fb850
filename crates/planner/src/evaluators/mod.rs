//! Strategic goal selection.
//!
//! Each evaluator rates how desirable its strategic goal is right now and
//! can build a fresh instance of it. The brain runs all evaluators every
//! tick, filters the winner through the [`CommitmentManager`], and installs
//! the winning goal at the top level.

mod commitment;

pub use commitment::CommitmentManager;

use agent_core::{AgentWorld, BehaviorKind};
use goal_stack::Goal;

use crate::PlannerConfig;
use crate::goals::{EliminateEnemyGoal, ExploreGoal};

/// Rates and constructs one kind of strategic goal.
pub trait GoalEvaluator<W: AgentWorld> {
    /// Desirability in `[0, 1]` given the current world.
    fn desirability(&self, world: &W, cfg: &PlannerConfig) -> f32;

    /// Builds a fresh, inactive instance of the goal.
    fn build_goal(&self, cfg: &PlannerConfig) -> Box<dyn Goal<W>>;

    /// The discrete activity this goal represents while running.
    fn activity(&self) -> BehaviorKind;

    /// Must match the `name()` of the goal `build_goal` produces.
    fn name(&self) -> &'static str;
}

/// Rates the eliminate-enemy campaign.
///
/// Worth pursuing only with some trace of an enemy; scaled down when the
/// agent is hurt or dry, up when the target is actually visible, and by
/// the agent's aggression either way.
pub struct EliminateEnemyEvaluator;

impl<W: AgentWorld + 'static> GoalEvaluator<W> for EliminateEnemyEvaluator {
    fn desirability(&self, world: &W, cfg: &PlannerConfig) -> f32 {
        let agent = world.state();
        let perception = world.perception();

        let any_trace = perception.has_target()
            || perception.last_known_target_position().is_some();
        if !any_trace || !agent.can_engage() {
            return 0.0;
        }

        let mut score = cfg.eliminate_base_weight;

        let ratio = agent.health_ratio();
        if ratio < cfg.critical_health_ratio {
            score *= 0.2;
        } else if ratio < cfg.low_health_ratio {
            score *= 0.5;
        }

        if !agent.ammo.has_usable_ammo() {
            score *= 0.3;
        }

        if perception.is_target_visible() {
            score *= 1.5;
        } else if perception.last_known_target_position().is_some() {
            score *= 1.2;
        }

        score *= 0.75 + 0.5 * agent.personality.aggression;
        score.clamp(0.0, 1.0)
    }

    fn build_goal(&self, cfg: &PlannerConfig) -> Box<dyn Goal<W>> {
        Box::new(EliminateEnemyGoal::new(cfg))
    }

    fn activity(&self) -> BehaviorKind {
        BehaviorKind::Combat
    }

    fn name(&self) -> &'static str {
        "eliminate-enemy"
    }
}

/// Rates exploration: a low constant, so there is always a viable
/// strategic goal even when every other evaluator reads zero.
pub struct ExploreEvaluator;

impl<W: AgentWorld + 'static> GoalEvaluator<W> for ExploreEvaluator {
    fn desirability(&self, world: &W, cfg: &PlannerConfig) -> f32 {
        if world.state().is_dead() {
            return 0.0;
        }
        cfg.explore_base_weight
    }

    fn build_goal(&self, cfg: &PlannerConfig) -> Box<dyn Goal<W>> {
        Box::new(ExploreGoal::new(cfg))
    }

    fn activity(&self) -> BehaviorKind {
        BehaviorKind::Patrol
    }

    fn name(&self) -> &'static str {
        "explore"
    }
}
