//! Directed search for a lost enemy.

use agent_core::AgentWorld;
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;
use crate::goals::{CautiousApproachGoal, PatrolGoal};

/// Sweeps for a contact, starting from the remembered last-known position
/// when there is one.
///
/// The first leg creeps up on the last-known position cautiously; after
/// that the goal degenerates to random sweeps. Completes as soon as the
/// target is seen again, or when the search window runs out.
pub struct SearchForEnemyGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    tried_last_known: bool,
    started_at_ms: u64,
    status: GoalStatus,
}

impl<W: AgentWorld> SearchForEnemyGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            tried_last_known: false,
            started_at_ms: 0,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> Goal<W> for SearchForEnemyGoal<W> {
    fn activate(&mut self, ctx: &mut W) {
        self.started_at_ms = ctx.time().now_ms;
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        if ctx.perception().is_target_visible() {
            tracing::debug!("search found the target");
            self.status = GoalStatus::Completed;
            return self.status;
        }
        if ctx.time().elapsed_since(self.started_at_ms) >= self.cfg.search_duration_ms {
            tracing::debug!("search window exhausted");
            self.status = GoalStatus::Completed;
            return self.status;
        }

        if !self.subgoals.has_subgoals() {
            let last_known = if self.tried_last_known {
                None
            } else {
                ctx.perception().last_known_target_position()
            };
            match last_known {
                Some(pos) => {
                    self.tried_last_known = true;
                    self.subgoals
                        .push_back(Box::new(CautiousApproachGoal::new(pos, &self.cfg)));
                }
                None => match ctx.navigation().find_valid_random_position() {
                    Some(waypoint) => self
                        .subgoals
                        .push_back(Box::new(PatrolGoal::new(waypoint, &self.cfg))),
                    None => return self.status,
                },
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
        "search-for-enemy"
    }
}
