//! Endless exploration of the walkable area.

use agent_core::AgentWorld;
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;
use crate::goals::PatrolGoal;

/// Wanders between random valid positions forever.
///
/// Never completes and never fails: a finished or failed patrol leg is
/// simply replaced with a new one, and when navigation cannot produce a
/// position this tick the goal idles and tries again next tick. It exists
/// to be interrupted by something more important.
pub struct ExploreGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    status: GoalStatus,
}

impl<W: AgentWorld> ExploreGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> Goal<W> for ExploreGoal<W> {
    fn activate(&mut self, _ctx: &mut W) {
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        if !self.subgoals.has_subgoals() {
            match ctx.navigation().find_valid_random_position() {
                Some(waypoint) => {
                    tracing::debug!(?waypoint, "explore picked next waypoint");
                    self.subgoals
                        .push_back(Box::new(PatrolGoal::new(waypoint, &self.cfg)));
                }
                // Navigation not ready: idle this tick, retry next.
                None => return self.status,
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
        "explore"
    }
}
