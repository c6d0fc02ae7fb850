//! Slow approach with surveillance pauses.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus};

use crate::PlannerConfig;

const PAUSE_SALT: u64 = 0x4341_5554;

/// Approaches a position at reduced speed, stopping at randomized
/// intervals to look around before moving on.
///
/// The speed reduction is applied to the agent's `speed_factor` on
/// activation and restored on terminate, so every movement order issued
/// while this goal runs inherits it.
pub struct CautiousApproachGoal {
    dest: Vec3,
    arrival_threshold: f32,
    cautious_speed: f32,
    pause_interval_min_ms: u64,
    pause_interval_max_ms: u64,
    pause_duration_ms: u64,
    next_pause_at_ms: u64,
    paused_until_ms: Option<u64>,
    saved_speed: f32,
    status: GoalStatus,
}

impl CautiousApproachGoal {
    pub fn new(dest: Vec3, cfg: &PlannerConfig) -> Self {
        Self {
            dest,
            arrival_threshold: cfg.arrival_threshold,
            cautious_speed: cfg.cautious_speed_factor,
            pause_interval_min_ms: cfg.cautious_pause_interval_min_ms,
            pause_interval_max_ms: cfg.cautious_pause_interval_max_ms,
            pause_duration_ms: cfg.cautious_pause_duration_ms,
            next_pause_at_ms: 0,
            paused_until_ms: None,
            saved_speed: 1.0,
            status: GoalStatus::Inactive,
        }
    }

    fn schedule_next_pause<W: AgentWorld>(&mut self, ctx: &W) {
        let time = ctx.time();
        let interval = ctx.rng().range_u32(
            time.seed(PAUSE_SALT),
            self.pause_interval_min_ms as u32,
            self.pause_interval_max_ms as u32,
        ) as u64;
        self.next_pause_at_ms = time.now_ms + interval;
    }
}

impl<W: AgentWorld> Goal<W> for CautiousApproachGoal {
    fn activate(&mut self, ctx: &mut W) {
        self.saved_speed = ctx.state().speed_factor;
        ctx.state_mut().speed_factor = self.cautious_speed;
        self.schedule_next_pause(ctx);

        let speed = self.cautious_speed;
        if !ctx.navigation().move_to(self.dest, speed) {
            ctx.state_mut().speed_factor = self.saved_speed;
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let now = ctx.time().now_ms;

        if let Some(until) = self.paused_until_ms {
            if now < until {
                return self.status;
            }
            // Pause over: resume and schedule the next one.
            self.paused_until_ms = None;
            self.schedule_next_pause(ctx);
            let speed = self.cautious_speed;
            if !ctx.navigation().move_to(self.dest, speed) {
                self.status = GoalStatus::Failed;
                return self.status;
            }
        } else if now >= self.next_pause_at_ms {
            tracing::debug!("cautious approach pausing to look around");
            ctx.navigation().stop_movement();
            self.paused_until_ms = Some(now + self.pause_duration_ms);
            return self.status;
        }

        let arrived = ctx.navigation().is_at_destination()
            || ctx.state().position.distance(self.dest) <= self.arrival_threshold;
        if arrived {
            self.status = GoalStatus::Completed;
        }
        self.status
    }

    fn terminate(&mut self, ctx: &mut W) {
        ctx.state_mut().speed_factor = self.saved_speed;
        ctx.navigation().stop_movement();
    }

    fn status(&self) -> GoalStatus {
        self.status
    }

    fn name(&self) -> &'static str {
        "cautious-approach"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentState, StubWorld};
    use goal_stack::process;

    #[test]
    fn reduces_speed_and_restores_on_terminate() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        let mut goal = CautiousApproachGoal::new(Vec3::new(30.0, 0.0, 0.0), &cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        assert_eq!(world.agent.speed_factor, cfg.cautious_speed_factor);
        assert_eq!(
            world.navigation.last_order().map(|(_, s)| s),
            Some(cfg.cautious_speed_factor)
        );

        goal.terminate(&mut world);
        assert_eq!(world.agent.speed_factor, 1.0);
    }

    #[test]
    fn pauses_then_resumes() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        let mut goal = CautiousApproachGoal::new(Vec3::new(30.0, 0.0, 0.0), &cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        let orders_before = world.navigation.move_orders.len();

        // Jump past the longest possible pause interval: must stop.
        world.advance(cfg.cautious_pause_interval_max_ms + 1);
        process(&mut goal, &mut world);
        assert_eq!(world.navigation.stops, 1);

        // Jump past the pause window: must re-issue the movement order.
        world.advance(cfg.cautious_pause_duration_ms + 1);
        process(&mut goal, &mut world);
        assert!(world.navigation.move_orders.len() > orders_before);
    }

    #[test]
    fn completes_on_arrival() {
        let cfg = PlannerConfig::default();
        let mut world = StubWorld::new(AgentState::new(100.0));
        let mut goal = CautiousApproachGoal::new(Vec3::new(30.0, 0.0, 0.0), &cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        world.navigation.arrive();
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Completed);
    }
}
