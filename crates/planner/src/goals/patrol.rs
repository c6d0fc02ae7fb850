//! Waypoint patrol leg.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

/// Walks to a single waypoint and completes on arrival.
///
/// The simplest leaf: parents (exploration, search) re-issue a fresh one
/// per waypoint rather than looping inside the goal.
pub struct PatrolGoal {
    waypoint: Vec3,
    arrival_threshold: f32,
    status: GoalStatus,
}

impl PatrolGoal {
    pub fn new(waypoint: Vec3, cfg: &PlannerConfig) -> Self {
        Self {
            waypoint,
            arrival_threshold: cfg.arrival_threshold,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld> Goal<W> for PatrolGoal {
    fn activate(&mut self, ctx: &mut W) {
        let speed = ctx.state().speed_factor;
        if !ctx.navigation().is_ready() || !ctx.navigation().move_to(self.waypoint, speed) {
            tracing::debug!(waypoint = ?self.waypoint, "patrol leg unreachable");
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let arrived = ctx.navigation().is_at_destination()
            || ctx.state().position.distance(self.waypoint) <= self.arrival_threshold;
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
        "patrol"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentState, StubWorld};
    use goal_stack::process;

    #[test]
    fn completes_on_arrival() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        let mut goal = PatrolGoal::new(Vec3::new(20.0, 0.0, 0.0), &cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        assert_eq!(
            world.navigation.last_order(),
            Some((Vec3::new(20.0, 0.0, 0.0), 1.0))
        );

        world.navigation.arrive();
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Completed);
    }

    #[test]
    fn fails_when_navigation_is_down() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        world.navigation.ready = false;

        let mut goal = PatrolGoal::new(Vec3::new(20.0, 0.0, 0.0), &cfg);
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Failed);
    }
}
