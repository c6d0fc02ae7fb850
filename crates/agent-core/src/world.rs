//! The facade the decision core sees the world through.

use crate::{AgentState, Navigation, Perception, RngOracle, TickTime};

/// Everything one agent's planner may touch during a tick.
///
/// The host game implements this per agent; the planner receives it by
/// `&mut` on every call and stores nothing across ticks. Access is
/// single-threaded per agent — there is no cross-agent shared state inside
/// the decision core, so no locking happens here (each agent's brain, gate,
/// and scorer are independent instances).
pub trait AgentWorld {
    /// The agent's vitals, ammo, personality, and published activity.
    fn state(&self) -> &AgentState;

    /// Mutable access for the planner-owned fields (activity, speed factor).
    fn state_mut(&mut self) -> &mut AgentState;

    /// The sensing facade.
    fn perception(&self) -> &dyn Perception;

    /// The movement facade.
    fn navigation(&mut self) -> &mut dyn Navigation;

    /// Current simulation time snapshot.
    fn time(&self) -> TickTime;

    /// Deterministic randomness source.
    fn rng(&self) -> &dyn RngOracle;
}
