//! Hunt a target that slipped out of sight.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

/// Moves toward the target's last known position, sweeping a random valid
/// position instead when nothing was remembered.
///
/// Completes on any of: target back in sight, arrival at the search point,
/// or the hunt timeout. Completion (not failure) in every case; losing a
/// target for good is a normal outcome, not a broken precondition.
pub struct HuntGoal {
    last_known: Option<Vec3>,
    arrival_threshold: f32,
    timeout_ms: u64,
    started_at_ms: u64,
    status: GoalStatus,
}

impl HuntGoal {
    pub fn new(last_known: Option<Vec3>, cfg: &PlannerConfig) -> Self {
        Self {
            last_known,
            arrival_threshold: cfg.arrival_threshold,
            timeout_ms: cfg.hunt_timeout_ms,
            started_at_ms: 0,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld> Goal<W> for HuntGoal {
    fn activate(&mut self, ctx: &mut W) {
        self.started_at_ms = ctx.time().now_ms;
        let speed = ctx.state().speed_factor;

        let dest = match self.last_known {
            Some(pos) => Some(pos),
            None => ctx.navigation().find_valid_random_position(),
        };
        let Some(dest) = dest else {
            self.status = GoalStatus::Failed;
            return;
        };

        if !ctx.navigation().move_to(dest, speed) {
            self.status = GoalStatus::Failed;
            return;
        }
        self.last_known = Some(dest);
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        if ctx.perception().is_target_visible() {
            tracing::debug!("hunt reacquired target");
            self.status = GoalStatus::Completed;
            return self.status;
        }

        if ctx.time().elapsed_since(self.started_at_ms) >= self.timeout_ms {
            tracing::debug!("hunt timed out");
            self.status = GoalStatus::Completed;
            return self.status;
        }

        let arrived = ctx.navigation().is_at_destination()
            || self
                .last_known
                .is_some_and(|d| ctx.state().position.distance(d) <= self.arrival_threshold);
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
        "hunt"
    }
}
