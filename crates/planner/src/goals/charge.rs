//! Direct pursuit of a visible target.

use agent_core::AgentWorld;
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;
use crate::goals::AdvanceGoal;

/// Closes straight on the target, re-aiming at its current position on a
/// fixed interval so a moving target stays tracked.
///
/// Self-repeating like dodge: when an advance leg finishes, the goal
/// resets to `Inactive` and the parent decides whether to keep charging.
pub struct ChargeGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    last_aim_at_ms: u64,
    status: GoalStatus,
}

impl<W: AgentWorld> ChargeGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            last_aim_at_ms: 0,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> ChargeGoal<W> {
    fn aim(&mut self, ctx: &mut W) -> bool {
        let Some(target) = ctx
            .perception()
            .target_position()
            .or_else(|| ctx.perception().last_known_target_position())
        else {
            return false;
        };
        self.last_aim_at_ms = ctx.time().now_ms;
        self.subgoals.clear(ctx);
        self.subgoals
            .push_front(Box::new(AdvanceGoal::new(target, &self.cfg)));
        true
    }
}

impl<W: AgentWorld + 'static> Goal<W> for ChargeGoal<W> {
    fn activate(&mut self, ctx: &mut W) {
        if !self.aim(ctx) {
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        if ctx.time().elapsed_since(self.last_aim_at_ms) >= self.cfg.charge_reaim_interval_ms
            && !self.aim(ctx)
        {
            // Target evaporated mid-charge.
            self.status = GoalStatus::Completed;
            return self.status;
        }

        match self.subgoals.process_front(ctx) {
            Some(status) if status.is_terminal() => {
                self.status = GoalStatus::Inactive;
            }
            Some(_) => {}
            None => self.status = GoalStatus::Inactive,
        }
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
        "charge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentState, StubWorld, Vec3};
    use goal_stack::process;

    fn world_with_target(at: Vec3) -> StubWorld {
        let mut world = StubWorld::new(AgentState::new(100.0));
        world.perception.has_target = true;
        world.perception.target_visible = true;
        world.perception.target_position = Some(at);
        world
    }

    #[test]
    fn re_aims_at_the_moving_target() {
        let cfg = PlannerConfig::default();
        let mut world = world_with_target(Vec3::new(50.0, 0.0, 0.0));
        let mut goal: ChargeGoal<StubWorld> = ChargeGoal::new(&cfg);

        process(&mut goal, &mut world);
        assert_eq!(
            world.navigation.last_order().map(|(d, _)| d),
            Some(Vec3::new(50.0, 0.0, 0.0))
        );

        // Target moved; past the re-aim interval the order follows it.
        world.perception.target_position = Some(Vec3::new(50.0, 0.0, 30.0));
        world.advance(cfg.charge_reaim_interval_ms + 1);
        process(&mut goal, &mut world);
        assert_eq!(
            world.navigation.last_order().map(|(d, _)| d),
            Some(Vec3::new(50.0, 0.0, 30.0))
        );
    }

    #[test]
    fn fails_without_any_target_position() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        let mut goal: ChargeGoal<StubWorld> = ChargeGoal::new(&cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Failed);
    }
}
