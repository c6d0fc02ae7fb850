//! Core goal trait.
//!
//! This module defines the [`Goal`] trait, the fundamental abstraction for
//! all planner behavior. The trait is generic over a context type `C`,
//! allowing goals to read agent state and issue commands to collaborators
//! without the library knowing anything about the game.

use crate::GoalStatus;

/// A unit of planner-driven behavior with an explicit lifecycle.
///
/// Implementors hold their own per-goal state (destinations, timers,
/// subgoals) and receive the context fresh on every call; the context is
/// never stored, so goals stay `'static` and can live across ticks inside
/// a parent or the planner's top-level slot.
///
/// # Contract
///
/// - `activate` is called exactly once, before the first `execute`
/// - `execute` is called once per tick while the goal reports `Active`
/// - `terminate` is called exactly once when the goal leaves `Active`,
///   whether it completed, failed, or is being forcibly replaced
pub trait Goal<C> {
    /// Validate preconditions, compute the goal's objective, and issue the
    /// initial command. On failure the implementation records `Failed` so
    /// the parent can reselect next tick; it must not panic.
    fn activate(&mut self, ctx: &mut C);

    /// Per-tick logic: timers, periodic re-targeting, and the completion
    /// predicate. Returns the status after this tick.
    fn execute(&mut self, ctx: &mut C) -> GoalStatus;

    /// Cleanup on leaving `Active`: stop movement, restore any temporarily
    /// modified agent parameters.
    fn terminate(&mut self, ctx: &mut C);

    /// Current lifecycle status.
    fn status(&self) -> GoalStatus;

    /// Stable name for logging and debug overlays.
    fn name(&self) -> &'static str;
}

/// Blanket implementation for boxed goals.
///
/// This allows `Box<dyn Goal<C>>` to also implement `Goal<C>`, enabling
/// heterogeneous child queues inside composite goals.
impl<C> Goal<C> for Box<dyn Goal<C>> {
    #[inline]
    fn activate(&mut self, ctx: &mut C) {
        (**self).activate(ctx)
    }

    #[inline]
    fn execute(&mut self, ctx: &mut C) -> GoalStatus {
        (**self).execute(ctx)
    }

    #[inline]
    fn terminate(&mut self, ctx: &mut C) {
        (**self).terminate(ctx)
    }

    #[inline]
    fn status(&self) -> GoalStatus {
        (**self).status()
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Drives one tick of a goal, honoring the lifecycle contract.
///
/// Activates the goal if it is still `Inactive` (activation may itself fail
/// and yield a terminal status), executes it while `Active`, and returns the
/// resulting status. Calling `execute` on a goal that was never activated is
/// undefined by the [`Goal`] contract; routing every tick through this
/// helper is how callers stay on the defined path.
pub fn process<C, G: Goal<C> + ?Sized>(goal: &mut G, ctx: &mut C) -> GoalStatus {
    if goal.status().is_inactive() {
        goal.activate(ctx);
    }
    if goal.status().is_active() {
        return goal.execute(ctx);
    }
    goal.status()
}
