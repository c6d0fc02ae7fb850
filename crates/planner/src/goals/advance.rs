//! Advance toward a tactical position.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

/// Moves to an assault position, with a shortcut: once the live target is
/// visible inside engagement range, getting to the exact position no
/// longer matters and the goal completes where it stands.
pub struct AdvanceGoal {
    position: Vec3,
    tolerance: f32,
    engagement_range: f32,
    status: GoalStatus,
}

impl AdvanceGoal {
    pub fn new(position: Vec3, cfg: &PlannerConfig) -> Self {
        Self {
            position,
            tolerance: cfg.assault_tolerance,
            engagement_range: cfg.engagement_range,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld> Goal<W> for AdvanceGoal {
    fn activate(&mut self, ctx: &mut W) {
        let speed = ctx.state().speed_factor;
        if !ctx.navigation().move_to(self.position, speed) {
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        if ctx.perception().is_target_visible() {
            if let Some(target) = ctx.perception().target_position() {
                if ctx.state().position.distance(target) <= self.engagement_range {
                    self.status = GoalStatus::Completed;
                    return self.status;
                }
            }
        }

        let arrived = ctx.navigation().is_at_destination()
            || ctx.state().position.distance(self.position) <= self.tolerance;
        if arrived {
            self.status = GoalStatus::Completed;
        }
        self.status
    }

    fn terminate(&mut self, ctx: &mut W) {
        ctx.navigation().stop_movement();
    }

    fn status(&self) -> GoalStatus {
        self.status
    }

    fn name(&self) -> &'static str {
        "advance"
    }
}
