//! Short repositioning move around a focus point.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

const MANEUVER_SALT: u64 = 0x4D41_4E56;

/// Which sidestep pattern the seeded coin chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Strafe,
    Circle,
}

/// Repositions relative to a focus point (a target, a corpse, a last-known
/// contact), choosing strafe or circle on a seeded 50/50.
///
/// Strafe is checked first on an even coin; the ordering is part of the
/// deterministic contract. Completes on arrival or after the maneuver
/// window elapses.
pub struct TacticalManeuverGoal {
    focus: Vec3,
    strafe_distance: f32,
    arrival_threshold: f32,
    duration_ms: u64,
    started_at_ms: u64,
    dest: Option<Vec3>,
    status: GoalStatus,
}

impl TacticalManeuverGoal {
    pub fn new(focus: Vec3, cfg: &PlannerConfig) -> Self {
        Self {
            focus,
            strafe_distance: cfg.strafe_distance,
            arrival_threshold: cfg.arrival_threshold,
            duration_ms: cfg.maneuver_duration_ms,
            started_at_ms: 0,
            dest: None,
            status: GoalStatus::Inactive,
        }
    }

    fn candidate(&self, position: Vec3, pattern: Pattern) -> Vec3 {
        let to_focus = (self.focus - position).normalized();
        let side = to_focus.perpendicular().normalized();
        match pattern {
            Pattern::Strafe => position + side.scale(self.strafe_distance),
            // Quarter-orbit: sideways with a forward lean, keeping roughly
            // the same distance to the focus.
            Pattern::Circle => {
                position + (side + to_focus.scale(0.5)).normalized().scale(self.strafe_distance)
            }
        }
    }
}

impl<W: AgentWorld> Goal<W> for TacticalManeuverGoal {
    fn activate(&mut self, ctx: &mut W) {
        let time = ctx.time();
        self.started_at_ms = time.now_ms;

        let pattern = if ctx.rng().chance(time.seed(MANEUVER_SALT), 50) {
            Pattern::Strafe
        } else {
            Pattern::Circle
        };
        tracing::debug!(?pattern, "maneuver pattern chosen");

        let position = ctx.state().position;
        let speed = ctx.state().speed_factor;
        let candidate = self.candidate(position, pattern);

        let Some(dest) = ctx
            .navigation()
            .find_valid_position(candidate, self.strafe_distance)
        else {
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
        if ctx.time().elapsed_since(self.started_at_ms) >= self.duration_ms {
            self.status = GoalStatus::Completed;
            return self.status;
        }
        let arrived = ctx.navigation().is_at_destination()
            || self
                .dest
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
        "tactical-maneuver"
    }
}
