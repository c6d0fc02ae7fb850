//! Evasive strafing while under fire.

use agent_core::{AgentWorld, Vec3};
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;

/// Finds free ground to strafe to, probing the agent's left first and the
/// right second. Returns `None` when both sides are blocked, which is the
/// caller's cue to pick a different tactic.
///
/// The left-then-right order is fixed; combined with the seeded oracle it
/// keeps dodge decisions reproducible across runs.
pub fn probe_strafe_space<W: AgentWorld>(ctx: &mut W, cfg: &PlannerConfig) -> Option<Vec3> {
    let position = ctx.state().position;
    let target = ctx.perception().target_position()?;

    let to_target = (target - position).normalized();
    let left = to_target.perpendicular().normalized();

    for side in [left, left.scale(-1.0)] {
        let candidate = position + side.scale(cfg.strafe_distance);
        if let Some(found) = ctx
            .navigation()
            .find_valid_position(candidate, cfg.strafe_distance * 0.5)
        {
            return Some(found);
        }
    }
    None
}

/// One strafe movement to an already validated position.
struct StrafeLeg {
    dest: Vec3,
    arrival_threshold: f32,
    status: GoalStatus,
}

impl StrafeLeg {
    fn new(dest: Vec3, cfg: &PlannerConfig) -> Self {
        Self {
            dest,
            arrival_threshold: cfg.arrival_threshold,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld> Goal<W> for StrafeLeg {
    fn activate(&mut self, ctx: &mut W) {
        let speed = ctx.state().speed_factor;
        if !ctx.navigation().move_to(self.dest, speed) {
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let arrived = ctx.navigation().is_at_destination()
            || ctx.state().position.distance(self.dest) <= self.arrival_threshold;
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
        "strafe-leg"
    }
}

/// Self-repeating evasive goal: runs one strafe leg, then resets itself to
/// `Inactive` so the parent re-decides whether to dodge again or do
/// something better.
///
/// The reset is the point: the parent's selection logic runs between legs
/// instead of this goal looping on its own.
pub struct DodgeGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    status: GoalStatus,
}

impl<W: AgentWorld> DodgeGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> Goal<W> for DodgeGoal<W> {
    fn activate(&mut self, ctx: &mut W) {
        let Some(dest) = probe_strafe_space(ctx, &self.cfg) else {
            tracing::debug!("no strafe space on either side");
            self.status = GoalStatus::Failed;
            return;
        };
        self.subgoals
            .push_front(Box::new(StrafeLeg::new(dest, &self.cfg)));
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        match self.subgoals.process_front(ctx) {
            Some(status) if status.is_terminal() => {
                // Leg finished: drop back to Inactive so the parent gets a
                // fresh decision before the next leg.
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
        "dodge"
    }
}
