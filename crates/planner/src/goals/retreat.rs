//! Fall back from an engagement that is going badly.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

/// Moves to a position away from the target and holds until safe.
///
/// Safety means the target is no longer visible or the retreat position is
/// reached, whichever comes first.
pub struct TacticalRetreatGoal {
    retreat_distance: f32,
    arrival_threshold: f32,
    dest: Option<Vec3>,
    status: GoalStatus,
}

impl TacticalRetreatGoal {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            retreat_distance: cfg.retreat_distance,
            arrival_threshold: cfg.arrival_threshold,
            dest: None,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld> Goal<W> for TacticalRetreatGoal {
    fn activate(&mut self, ctx: &mut W) {
        let position = ctx.state().position;
        let speed = ctx.state().speed_factor;

        // Straight away from the threat; any valid spot near that line
        // will do, and a random one beats standing still.
        let candidate = ctx
            .perception()
            .target_position()
            .or_else(|| ctx.perception().last_known_target_position())
            .map(|threat| {
                let away = (position - threat).normalized();
                position + away.scale(self.retreat_distance)
            });

        let dest = match candidate {
            Some(c) => ctx
                .navigation()
                .find_valid_position(c, self.retreat_distance * 0.5),
            None => None,
        }
        .or_else(|| ctx.navigation().find_valid_random_position());

        let Some(dest) = dest else {
            self.status = GoalStatus::Failed;
            return;
        };
        if !ctx.navigation().move_to(dest, speed) {
            self.status = GoalStatus::Failed;
            return;
        }
        self.dest = Some(dest);
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let safe = !ctx.perception().is_target_visible();
        let arrived = ctx.navigation().is_at_destination()
            || self
                .dest
                .is_some_and(|d| ctx.state().position.distance(d) <= self.arrival_threshold);
        if safe || arrived {
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
        "tactical-retreat"
    }
}
