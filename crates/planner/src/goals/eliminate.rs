//! Strategic goal: destroy the acquired enemy.

use agent_core::AgentWorld;
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;
use crate::goals::{AttackGoal, SearchForEnemyGoal, TacticalRetreatGoal};

/// Campaign-level goal that owns one tactical child at a time and re-plans
/// it on a fixed interval.
///
/// Planning picks by situation: a visible target means attack (or a
/// retreat first, when the agent is too hurt to trade), a remembered
/// position means search, and neither means the enemy is gone and the
/// campaign completes. Re-planning keeps a child of the right kind
/// running instead of restarting it.
pub struct EliminateEnemyGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    last_plan_at_ms: u64,
    status: GoalStatus,
}

impl<W: AgentWorld> EliminateEnemyGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            last_plan_at_ms: 0,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> EliminateEnemyGoal<W> {
    fn desired_tactic(&self, ctx: &W) -> Option<&'static str> {
        if ctx.perception().is_target_visible() {
            let hurt = ctx.state().health_ratio() < self.cfg.low_health_ratio;
            if hurt {
                Some("tactical-retreat")
            } else {
                Some("attack")
            }
        } else if ctx.perception().has_target()
            || ctx.perception().last_known_target_position().is_some()
        {
            Some("search-for-enemy")
        } else {
            None
        }
    }

    fn plan(&mut self, ctx: &mut W) {
        self.last_plan_at_ms = ctx.time().now_ms;

        if ctx.perception().is_target_dead() {
            // A running attack gets to finish its post-kill wind-down; once
            // it is gone there is nothing left to eliminate.
            if self.subgoals.front_name() == Some("attack") {
                return;
            }
            self.subgoals.clear(ctx);
            self.status = GoalStatus::Completed;
            return;
        }

        let desired = self.desired_tactic(ctx);
        let Some(desired) = desired else {
            tracing::debug!("no trace of the enemy, campaign over");
            self.subgoals.clear(ctx);
            self.status = GoalStatus::Completed;
            return;
        };

        if self.subgoals.front_name() == Some(desired) {
            return;
        }

        tracing::debug!(tactic = desired, "eliminate re-planned");
        self.subgoals.clear(ctx);
        let child: Box<dyn Goal<W>> = match desired {
            "attack" => Box::new(AttackGoal::new(&self.cfg)),
            "tactical-retreat" => Box::new(TacticalRetreatGoal::new(&self.cfg)),
            _ => Box::new(SearchForEnemyGoal::new(&self.cfg)),
        };
        self.subgoals.push_front(child);
    }
}

impl<W: AgentWorld + 'static> Goal<W> for EliminateEnemyGoal<W> {
    fn activate(&mut self, ctx: &mut W) {
        self.status = GoalStatus::Active;
        self.plan(ctx);
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let stale = ctx.time().elapsed_since(self.last_plan_at_ms) >= self.cfg.replan_interval_ms;
        if stale || !self.subgoals.has_subgoals() {
            self.plan(ctx);
            if self.status.is_terminal() {
                return self.status;
            }
        }
        self.subgoals.process_front(ctx);
        self.status
    }

    fn terminate(&mut self, ctx: &mut W) {
        self.subgoals.clear(ctx);
        ctx.navigation().stop_movement();
    }

    fn status(&self) -> GoalStatus {
        self.status
    }

    fn name(&self) -> &'static str {
        "eliminate-enemy"
    }
}
